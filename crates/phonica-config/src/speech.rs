use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_command() -> String {
    "espeak-ng".to_string()
}

fn default_language_prefix() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// eSpeak-compatible synthesizer executable
    #[serde(default = "default_command")]
    pub command: String,
    /// Preferred voice language tag prefix
    #[serde(default = "default_language_prefix")]
    pub language_prefix: String,
}

impl SpeechConfig {
    pub fn new() -> Self {
        Self {
            enabled: default_enabled(),
            command: env::var("PHONICA_SPEECH_CMD").unwrap_or_else(|_| default_command()),
            language_prefix: default_language_prefix(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self::new()
    }
}
