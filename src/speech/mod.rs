//! Speech bridge
//!
//! Two independent one-directional flows: a push-to-talk capture flow that
//! turns recognizer results into prompt text, and a playback flow that
//! drives a synthesizer off the `speaking` flag. The recognizer and
//! synthesizer engines are opaque; this module only speaks their start/stop
//! contracts.

mod capture;
mod playback;

pub use capture::{CaptureBridge, CaptureState};
pub use playback::PlaybackBridge;

use crate::Result;
use crossbeam_channel::Receiver;

/// Recognition model hint passed to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageModel {
    /// Free-form dictation
    FreeForm,
    /// Web-search style short queries
    WebSearch,
}

/// Queueing behavior for a synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Discard any utterance in progress and start over
    Flush,
    /// Append after the current utterance
    Queue,
}

/// Asynchronous output of a speech recognizer.
#[derive(Debug, Clone)]
pub enum RecognizerEvent {
    /// Transcription candidates, best first
    Result(Vec<String>),
    /// Opaque failure message
    Error(String),
}

/// Speech capture engine contract.
///
/// Results arrive asynchronously on the channel returned by
/// [`events`](Self::events), possibly after the capture gesture has already
/// ended.
pub trait SpeechRecognizer: Send {
    fn start_listening(&mut self, model: LanguageModel, locale: &str) -> Result<()>;

    /// Abandon the current capture, if any.
    fn cancel(&mut self);

    /// Channel on which results and errors are delivered.
    fn events(&self) -> Receiver<RecognizerEvent>;
}

/// Speech synthesis engine contract. No completion callback is consumed by
/// this crate; playback state is driven purely by the `speaking` flag.
pub trait SpeechSynthesizer: Send {
    fn speak(&mut self, text: &str, mode: QueueMode) -> Result<()>;

    /// Stop immediately, regardless of progress.
    fn stop(&mut self);
}
