//! Push-to-talk capture flow
//!
//! Gesture state machine: `Idle → Listening` on press, back to `Idle` on
//! release-with-no-result or on result delivery. A result may land after the
//! gesture ended; it still overwrites the prompt. Recognizer errors are
//! absorbed silently and the machine returns to `Idle` with whatever prompt
//! text was last set.

use crate::config::AssistantConfig;
use crate::session::SessionState;
use crate::speech::{LanguageModel, RecognizerEvent, SpeechRecognizer};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Listening,
}

pub struct CaptureBridge {
    recognizer: Box<dyn SpeechRecognizer>,
    events: Receiver<RecognizerEvent>,
    session: Arc<SessionState>,
    state: CaptureState,
    placeholder: String,
    locale: String,
    /// Whether the current gesture has already produced a transcription.
    got_result: bool,
}

impl CaptureBridge {
    pub fn new(
        recognizer: Box<dyn SpeechRecognizer>,
        session: Arc<SessionState>,
        config: &AssistantConfig,
    ) -> Self {
        let events = recognizer.events();
        Self {
            recognizer,
            events,
            session,
            state: CaptureState::Idle,
            placeholder: config.listening_placeholder.clone(),
            locale: config.locale.clone(),
            got_result: false,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Gesture start: arm the recognizer and show the placeholder so the UI
    /// reflects the armed state immediately.
    pub fn press(&mut self) {
        if self.state == CaptureState::Listening {
            return;
        }
        self.got_result = false;
        self.session.set_prompt(self.placeholder.clone());
        match self
            .recognizer
            .start_listening(LanguageModel::FreeForm, &self.locale)
        {
            Ok(()) => {
                self.state = CaptureState::Listening;
            }
            Err(e) => {
                debug!(error = %e, "recognizer failed to start");
                self.session.set_prompt(String::new());
                self.state = CaptureState::Idle;
            }
        }
    }

    /// Gesture end. With no result delivered yet, the placeholder is cleared
    /// back to empty; the recognizer keeps running and a late result will
    /// still overwrite the prompt.
    pub fn release(&mut self) {
        if self.state != CaptureState::Listening {
            return;
        }
        self.state = CaptureState::Idle;
        if !self.got_result {
            self.session.set_prompt(String::new());
        }
    }

    /// Drain pending recognizer events. Call this from the UI tick.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                RecognizerEvent::Result(candidates) => {
                    if let Some(first) = candidates.first() {
                        self.session.set_prompt(first.clone());
                    }
                    self.got_result = true;
                    self.state = CaptureState::Idle;
                }
                RecognizerEvent::Error(message) => {
                    // No retry; absorbed silently
                    debug!(error = %message, "recognizer error ignored");
                    self.state = CaptureState::Idle;
                }
            }
        }
    }

    /// Abandon any capture in progress and clear the placeholder.
    pub fn cancel(&mut self) {
        if self.state == CaptureState::Listening {
            self.recognizer.cancel();
            self.state = CaptureState::Idle;
            if !self.got_result {
                self.session.set_prompt(String::new());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crossbeam_channel::{unbounded, Sender};
    use parking_lot::Mutex;

    struct StubRecognizer {
        rx: Receiver<RecognizerEvent>,
        started: Arc<Mutex<Vec<(LanguageModel, String)>>>,
        fail_start: bool,
    }

    impl StubRecognizer {
        fn new(fail_start: bool) -> (Self, Sender<RecognizerEvent>) {
            let (tx, rx) = unbounded();
            let stub = Self {
                rx,
                started: Arc::new(Mutex::new(Vec::new())),
                fail_start,
            };
            (stub, tx)
        }
    }

    impl SpeechRecognizer for StubRecognizer {
        fn start_listening(&mut self, model: LanguageModel, locale: &str) -> Result<()> {
            if self.fail_start {
                return Err(crate::ParleyError::Recognition("mic unavailable".into()));
            }
            self.started.lock().push((model, locale.to_string()));
            Ok(())
        }

        fn cancel(&mut self) {}

        fn events(&self) -> Receiver<RecognizerEvent> {
            self.rx.clone()
        }
    }

    fn bridge(fail_start: bool) -> (CaptureBridge, Sender<RecognizerEvent>, Arc<SessionState>) {
        let session = SessionState::new();
        let (stub, tx) = StubRecognizer::new(fail_start);
        let bridge =
            CaptureBridge::new(Box::new(stub), Arc::clone(&session), &AssistantConfig::default());
        (bridge, tx, session)
    }

    #[test]
    fn press_starts_free_form_capture_in_configured_locale() {
        let session = SessionState::new();
        let (stub, _tx) = StubRecognizer::new(false);
        let started = Arc::clone(&stub.started);
        let config = AssistantConfig::default().with_locale("de-DE");
        let mut bridge = CaptureBridge::new(Box::new(stub), session, &config);
        bridge.press();
        assert_eq!(
            *started.lock(),
            vec![(LanguageModel::FreeForm, "de-DE".to_string())]
        );
    }

    #[test]
    fn press_shows_placeholder_and_arms() {
        let (mut bridge, _tx, session) = bridge(false);
        bridge.press();
        assert_eq!(bridge.state(), CaptureState::Listening);
        assert_eq!(session.prompt(), "Listening…");
    }

    #[test]
    fn release_without_result_clears_prompt() {
        let (mut bridge, _tx, session) = bridge(false);
        bridge.press();
        bridge.release();
        assert_eq!(bridge.state(), CaptureState::Idle);
        assert_eq!(session.prompt(), "");
    }

    #[test]
    fn result_during_gesture_overwrites_prompt() {
        let (mut bridge, tx, session) = bridge(false);
        bridge.press();
        tx.send(RecognizerEvent::Result(vec![
            "turn on the lights".to_string(),
            "turn off the lights".to_string(),
        ]))
        .unwrap();
        bridge.poll_events();
        // First candidate wins
        assert_eq!(session.prompt(), "turn on the lights");
        assert_eq!(bridge.state(), CaptureState::Idle);
    }

    #[test]
    fn late_result_after_release_still_lands() {
        let (mut bridge, tx, session) = bridge(false);
        bridge.press();
        bridge.release();
        assert_eq!(session.prompt(), "");
        tx.send(RecognizerEvent::Result(vec!["hello there".to_string()]))
            .unwrap();
        bridge.poll_events();
        assert_eq!(session.prompt(), "hello there");
    }

    #[test]
    fn recognizer_error_is_absorbed() {
        let (mut bridge, tx, session) = bridge(false);
        bridge.press();
        tx.send(RecognizerEvent::Error("audio busy".to_string()))
            .unwrap();
        bridge.poll_events();
        assert_eq!(bridge.state(), CaptureState::Idle);
        // Prompt keeps whatever was last set (the placeholder)
        assert_eq!(session.prompt(), "Listening…");
    }

    #[test]
    fn failed_start_returns_to_idle_with_empty_prompt() {
        let (mut bridge, _tx, session) = bridge(true);
        bridge.press();
        assert_eq!(bridge.state(), CaptureState::Idle);
        assert_eq!(session.prompt(), "");
    }

    #[test]
    fn cancel_abandons_capture_and_clears_placeholder() {
        let (mut bridge, _tx, session) = bridge(false);
        bridge.press();
        bridge.cancel();
        assert_eq!(bridge.state(), CaptureState::Idle);
        assert_eq!(session.prompt(), "");
        // Cancelling while idle does nothing
        session.set_prompt("kept".to_string());
        bridge.cancel();
        assert_eq!(session.prompt(), "kept");
    }

    #[test]
    fn press_while_listening_is_a_no_op() {
        let (mut bridge, _tx, session) = bridge(false);
        bridge.press();
        session.set_prompt("typed over".to_string());
        bridge.press();
        assert_eq!(session.prompt(), "typed over");
        assert_eq!(bridge.state(), CaptureState::Listening);
    }
}
