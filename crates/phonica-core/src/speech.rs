use async_trait::async_trait;
use phonica_types::Voice;

use crate::error::SpeechError;

/// On-device speech synthesis
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Installed voices, `None` until the host finishes enumerating them.
    ///
    /// A failed or empty enumeration is `Some(vec![])`.
    fn voices(&self) -> Option<Vec<Voice>>;

    /// Resolves once enumeration has finished, however it ended
    async fn voices_changed(&self);

    /// Queue an utterance
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Stop whatever is being spoken
    fn cancel(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
        }
    }
}

/// First voice whose language tag starts with `prefix`
pub fn select_voice(voices: &[Voice], prefix: &str) -> Option<Voice> {
    voices
        .iter()
        .find(|v| !v.language.is_empty() && v.language.starts_with(prefix))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, language: &str) -> Voice {
        Voice {
            id: id.to_string(),
            name: id.to_string(),
            language: language.to_string(),
        }
    }

    #[test]
    fn test_select_voice_prefers_first_english() {
        let voices = vec![voice("de", "de"), voice("en-gb", "en-gb"), voice("en-us", "en-us")];
        assert_eq!(select_voice(&voices, "en").unwrap().id, "en-gb");
    }

    #[test]
    fn test_select_voice_none_without_match() {
        let voices = vec![voice("fr", "fr"), voice("blank", "")];
        assert!(select_voice(&voices, "en").is_none());
        assert!(select_voice(&[], "en").is_none());
    }
}
