//! Remote model contract
//!
//! The generative model is an opaque remote service: given a prompt (or image
//! bytes plus an instruction) it eventually returns text or fails with a
//! human-readable message. No structured error codes, no latency guarantees.
//! Concrete network clients live outside this crate; tests use stubs.

use crate::Result;
use async_trait::async_trait;

/// Client for a hosted generative model.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Single-turn text generation.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Single-turn generation from an image plus an instruction.
    ///
    /// The caller is responsible for downscaling the image before this call;
    /// nothing here bounds the payload size.
    async fn generate_from_image(&self, image: &[u8], instruction: &str) -> Result<String>;

    /// Open a multi-turn conversation and return its handle.
    fn start_chat(&self) -> Box<dyn ChatHandle>;
}

/// Handle to one multi-turn conversation held by the remote service.
///
/// There is no close operation; dropping the handle abandons the
/// conversation on the client side.
#[async_trait]
pub trait ChatHandle: Send {
    /// Send one turn and await the model's reply.
    async fn send_message(&mut self, text: &str) -> Result<String>;
}
