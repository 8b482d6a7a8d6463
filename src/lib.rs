pub mod client;
pub mod config;
pub mod controller;
pub mod session;
pub mod signal;
pub mod speech;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParleyError {
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Session has been disposed")]
    SessionDisposed,

    #[error("No active chat session")]
    NoActiveChat,
}

impl ParleyError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Remote and speech failures are typically transient
            ParleyError::Generation(_) => true,
            ParleyError::Recognition(_) => true,
            ParleyError::Synthesis(_) => true,
            // Contract violations require fixing the calling code
            ParleyError::SessionDisposed => false,
            ParleyError::NoActiveChat => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ParleyError::Generation(_) => {
                "Response generation failed. Please try again.".to_string()
            }
            ParleyError::Recognition(_) => {
                "Speech recognition failed. Please try again.".to_string()
            }
            ParleyError::Synthesis(_) => {
                "Text-to-speech failed. Response will be shown as text.".to_string()
            }
            ParleyError::SessionDisposed => {
                "This session has ended. Please start a new one.".to_string()
            }
            ParleyError::NoActiveChat => {
                "No conversation is active. Please start a new chat.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ParleyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_are_recoverable_contract_violations_are_not() {
        assert!(ParleyError::Generation("timeout".into()).is_recoverable());
        assert!(ParleyError::Recognition("no mic".into()).is_recoverable());
        assert!(ParleyError::Synthesis("engine gone".into()).is_recoverable());
        assert!(!ParleyError::SessionDisposed.is_recoverable());
        assert!(!ParleyError::NoActiveChat.is_recoverable());
    }

    #[test]
    fn display_carries_the_remote_message() {
        let err = ParleyError::Generation("quota exceeded".into());
        assert_eq!(err.to_string(), "Generation error: quota exceeded");
        // The user-facing text never leaks the raw message
        assert!(!err.user_message().contains("quota"));
    }
}
