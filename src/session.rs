//! Session state
//!
//! One `SessionState` per screen: the observable record of that screen's
//! interaction with the model. Reads and subscriptions are public; writes go
//! through the owning [`SessionController`](crate::controller::SessionController)
//! (or the speech bridge), never through subscribers.

use crate::signal::{Signal, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Point-in-time copy of all four fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub prompt: String,
    pub response: String,
    pub busy: bool,
    pub speaking: bool,
}

pub struct SessionState {
    prompt: Signal<String>,
    response: Signal<String>,
    busy: Signal<bool>,
    speaking: Signal<bool>,
    disposed: AtomicBool,
}

impl SessionState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            prompt: Signal::new(String::new()),
            response: Signal::new(String::new()),
            busy: Signal::new(false),
            speaking: Signal::new(false),
            disposed: AtomicBool::new(false),
        })
    }

    pub fn prompt(&self) -> String {
        self.prompt.get()
    }

    pub fn response(&self) -> String {
        self.response.get()
    }

    /// True exactly while a remote call is in flight. The UI must disable
    /// submission while this is set; nothing in this crate enforces that.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    pub fn subscribe_prompt(
        &self,
        callback: impl FnMut(&String) + Send + 'static,
    ) -> Subscription<String> {
        self.prompt.subscribe(callback)
    }

    pub fn subscribe_response(
        &self,
        callback: impl FnMut(&String) + Send + 'static,
    ) -> Subscription<String> {
        self.response.subscribe(callback)
    }

    pub fn subscribe_busy(
        &self,
        callback: impl FnMut(&bool) + Send + 'static,
    ) -> Subscription<bool> {
        self.busy.subscribe(callback)
    }

    pub fn subscribe_speaking(
        &self,
        callback: impl FnMut(&bool) + Send + 'static,
    ) -> Subscription<bool> {
        self.speaking.subscribe(callback)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            prompt: self.prompt(),
            response: self.response(),
            busy: self.is_busy(),
            speaking: self.is_speaking(),
        }
    }

    pub(crate) fn set_prompt(&self, text: String) {
        self.prompt.set(text);
    }

    pub(crate) fn set_response(&self, text: String) {
        self.response.set(text);
    }

    pub(crate) fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    pub(crate) fn set_speaking(&self, speaking: bool) {
        self.speaking.set(speaking);
    }

    /// Mark the session disposed. Returns true if it was already disposed.
    pub(crate) fn mark_disposed(&self) -> bool {
        self.disposed.swap(true, Ordering::SeqCst)
    }
}
