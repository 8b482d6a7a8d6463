//! Conversation controller
//!
//! Mediates between [`SessionState`] and the remote model: issues single-turn
//! and multi-turn requests and translates successes and failures into state
//! writes. Every remote failure is caught at this boundary; nothing below it
//! ever sees a fault beyond `busy` clearing and, on single-turn paths, an
//! error string surfacing as the response.
//!
//! `busy` is a caller-side gate, not a lock: the UI is expected to disable
//! submission while it is set. The only internal serialization is the mutex
//! around the chat handle, which makes overlapping `send_turn` calls resolve
//! in FIFO order instead of corrupting the transcript.

use crate::client::{ChatHandle, GenerativeClient};
use crate::config::AssistantConfig;
use crate::session::SessionState;
use crate::{ParleyError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

type SharedChat = Arc<AsyncMutex<Box<dyn ChatHandle>>>;

pub struct SessionController {
    state: Arc<SessionState>,
    client: Arc<dyn GenerativeClient>,
    config: AssistantConfig,
    chat: Mutex<Option<SharedChat>>,
}

impl SessionController {
    pub fn new(client: Arc<dyn GenerativeClient>, config: AssistantConfig) -> Self {
        info!(model = %config.model_name, "session controller created");
        Self {
            state: SessionState::new(),
            client,
            config,
            chat: Mutex::new(None),
        }
    }

    /// The observable session state. Share this with the UI and the speech
    /// bridge; all writes still go through the controller.
    pub fn state(&self) -> Arc<SessionState> {
        Arc::clone(&self.state)
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Overwrite the prompt. No validation, no other effect.
    pub fn set_prompt(&self, text: impl Into<String>) {
        self.state.set_prompt(text.into());
    }

    /// Acquire a fresh conversation handle for multi-turn mode.
    ///
    /// Calling this again silently abandons the prior conversation; the
    /// remote contract has no close operation, so the old handle is simply
    /// dropped. An in-flight turn keeps its own reference and completes
    /// against the abandoned conversation.
    pub fn start_session(&self) {
        let mut chat = self.chat.lock();
        if chat.is_some() {
            warn!("start_session replacing an existing chat handle");
        }
        *chat = Some(Arc::new(AsyncMutex::new(self.client.start_chat())));
    }

    /// Send one multi-turn message.
    ///
    /// Appends `"Me: {text}\n"` and raises `busy` before the first suspension
    /// point, so both are observable while the remote call is in flight. On
    /// success appends `"Model: {reply}\n"`; on failure the transcript keeps
    /// only the "Me:" line and the error is swallowed (logged only).
    pub async fn send_turn(&self, text: &str) -> Result<()> {
        if self.state.is_disposed() {
            warn!("send_turn called on a disposed session");
            return Err(ParleyError::SessionDisposed);
        }
        let chat = self
            .chat
            .lock()
            .clone()
            .ok_or(ParleyError::NoActiveChat)?;

        let request_id = Uuid::new_v4();
        self.state
            .set_response(format!("{}Me: {}\n", self.state.response(), text));
        self.state.set_busy(true);
        debug!(%request_id, "sending chat turn");

        let result = {
            let mut handle = chat.lock().await;
            handle.send_message(text).await
        };

        match result {
            Ok(reply) => {
                if self.state.is_disposed() {
                    debug!(%request_id, "discarding reply for disposed session");
                } else {
                    self.state
                        .set_response(format!("{}Model: {}\n", self.state.response(), reply));
                }
                self.state.set_busy(false);
            }
            Err(e) => {
                debug!(%request_id, error = %e, "chat turn failed");
                self.state.set_busy(false);
            }
        }
        Ok(())
    }

    /// Single-turn text request. The response is replaced wholesale: cleared
    /// at call start, then set to the reply or to the failure's display
    /// string.
    pub async fn answer(&self, text: &str) -> Result<()> {
        if self.state.is_disposed() {
            warn!("answer called on a disposed session");
            return Err(ParleyError::SessionDisposed);
        }
        let request_id = Uuid::new_v4();
        self.state.set_busy(true);
        self.clear_response();
        debug!(%request_id, "sending single-turn prompt");

        match self.client.generate(text).await {
            Ok(reply) => {
                if self.state.is_disposed() {
                    debug!(%request_id, "discarding reply for disposed session");
                } else {
                    self.state.set_response(reply);
                }
                self.state.set_busy(false);
            }
            Err(e) => {
                debug!(%request_id, error = %e, "single-turn prompt failed");
                self.state.set_busy(false);
                if !self.state.is_disposed() {
                    self.state.set_response(e.to_string());
                }
            }
        }
        Ok(())
    }

    /// Single-turn image description. Same shape as [`answer`](Self::answer)
    /// with the configured instruction attached to the image bytes. The
    /// caller downsizes the image beforehand; payload size is not bounded
    /// here.
    pub async fn describe(&self, image: &[u8]) -> Result<()> {
        if self.state.is_disposed() {
            warn!("describe called on a disposed session");
            return Err(ParleyError::SessionDisposed);
        }
        let request_id = Uuid::new_v4();
        self.state.set_busy(true);
        self.clear_response();
        debug!(%request_id, bytes = image.len(), "sending image description request");

        match self
            .client
            .generate_from_image(image, &self.config.image_instruction)
            .await
        {
            Ok(reply) => {
                if self.state.is_disposed() {
                    debug!(%request_id, "discarding reply for disposed session");
                } else {
                    self.state.set_response(reply);
                }
                self.state.set_busy(false);
            }
            Err(e) => {
                debug!(%request_id, error = %e, "image description failed");
                self.state.set_busy(false);
                if !self.state.is_disposed() {
                    self.state.set_response(e.to_string());
                }
            }
        }
        Ok(())
    }

    /// Flip the speaking flag. Playback itself is the speech bridge's job;
    /// this only raises the signal it observes.
    pub fn toggle_speaking(&self) {
        self.state.set_speaking(!self.state.is_speaking());
    }

    /// Clear the response and stop any speak request.
    pub fn clear_response(&self) {
        self.state.set_response(String::new());
        self.state.set_speaking(false);
    }

    /// Tear the session down. Drops the chat handle; later `send_turn`,
    /// `answer`, and `describe` calls fail fast with
    /// [`ParleyError::SessionDisposed`]. Local writes (`set_prompt`,
    /// `toggle_speaking`, `clear_response`) remain usable.
    pub fn dispose(&self) {
        if self.state.mark_disposed() {
            warn!("dispose called more than once");
            return;
        }
        *self.chat.lock() = None;
        debug!("session disposed");
    }
}
