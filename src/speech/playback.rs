//! Speak-toggle playback flow
//!
//! Subscribes to the `speaking` flag: on a false→true transition the full
//! current response is handed to the synthesizer with flush semantics; on
//! true→false the synthesizer is stopped immediately. The signal does not
//! de-duplicate writes, so the bridge tracks the previous value itself and
//! re-writes of the same value do not restart playback.

use crate::session::SessionState;
use crate::signal::Subscription;
use crate::speech::{QueueMode, SpeechSynthesizer};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

pub struct PlaybackBridge {
    _subscription: Subscription<bool>,
}

impl PlaybackBridge {
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>, session: Arc<SessionState>) -> Self {
        let synthesizer = Arc::new(Mutex::new(synthesizer));
        let reader = Arc::clone(&session);
        let mut previous = session.is_speaking();

        let subscription = session.subscribe_speaking(move |&speaking| {
            if speaking == previous {
                return;
            }
            previous = speaking;
            let mut synth = synthesizer.lock();
            if speaking {
                let text = reader.response();
                if let Err(e) = synth.speak(&text, QueueMode::Flush) {
                    debug!(error = %e, "synthesis failed");
                }
            } else {
                synth.stop();
            }
        });

        Self {
            _subscription: subscription,
        }
    }
}
