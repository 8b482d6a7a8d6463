//! Assistant configuration

use serde::{Deserialize, Serialize};

/// Configuration for one assistant session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model identifier passed through to the remote client
    pub model_name: String,

    /// Instruction sent alongside image bytes in describe requests
    pub image_instruction: String,

    /// Placeholder written into the prompt while the recognizer is armed
    pub listening_placeholder: String,

    /// BCP-47 locale tag for speech recognition
    pub locale: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model_name: "gemini-pro".to_string(),
            image_instruction: "Describe this image".to_string(),
            listening_placeholder: "Listening…".to_string(),
            locale: "en-US".to_string(),
        }
    }
}

impl AssistantConfig {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    /// Set the instruction used for image description
    pub fn with_image_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.image_instruction = instruction.into();
        self
    }

    /// Set the placeholder shown while listening
    pub fn with_listening_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.listening_placeholder = placeholder.into();
        self
    }

    /// Set the recognition locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_source_app() {
        let config = AssistantConfig::default();
        assert_eq!(config.model_name, "gemini-pro");
        assert_eq!(config.image_instruction, "Describe this image");
        assert_eq!(config.listening_placeholder, "Listening…");
        assert_eq!(config.locale, "en-US");
    }

    #[test]
    fn builder_overrides_fields() {
        let config = AssistantConfig::new("gemini-pro-vision")
            .with_image_instruction("What is in this picture?")
            .with_locale("de-DE");
        assert_eq!(config.model_name, "gemini-pro-vision");
        assert_eq!(config.image_instruction, "What is in this picture?");
        assert_eq!(config.locale, "de-DE");
        // Untouched fields keep their defaults
        assert_eq!(config.listening_placeholder, "Listening…");
    }

    #[test]
    fn config_survives_serialization() {
        let config = AssistantConfig::new("gemini-pro-vision").with_locale("fr-FR");
        let json = serde_json::to_string(&config).unwrap();
        let back: AssistantConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model_name, "gemini-pro-vision");
        assert_eq!(back.locale, "fr-FR");
    }
}
