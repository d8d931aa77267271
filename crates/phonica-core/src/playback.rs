use std::sync::Arc;

use crate::audio::AudioPlayer;
use crate::speech::{SpeechSynthesizer, Utterance, select_voice};

/// Plays pronunciation clips, falling back to on-device speech.
///
/// Either capability may be absent on the host; a missing synthesizer turns
/// speech into a silent no-op.
#[derive(Clone)]
pub struct Pronouncer {
    audio: Option<Arc<dyn AudioPlayer>>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    language_prefix: String,
}

impl Pronouncer {
    pub fn new(
        audio: Option<Arc<dyn AudioPlayer>>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
        language_prefix: impl Into<String>,
    ) -> Self {
        Self {
            audio,
            speech,
            language_prefix: language_prefix.into(),
        }
    }

    /// Play `url` if given, otherwise (or if playback is rejected) speak `word`
    pub async fn play(&self, url: Option<&str>, word: Option<&str>) {
        let Some(url) = url else {
            self.speak(word);
            return;
        };

        let url = normalize_audio_url(url);

        let Some(player) = &self.audio else {
            tracing::debug!("No audio player, speaking instead of {}", url);
            self.speak(word);
            return;
        };

        tracing::debug!("Playing {}", url);
        if let Err(e) = player.play(&url).await {
            tracing::warn!("Playback of {} rejected: {}", url, e);
            self.speak(word);
        }
    }

    /// Speak `text` with an English voice when one is installed.
    ///
    /// If the host has not enumerated its voices yet, the utterance is
    /// deferred until enumeration finishes.
    pub fn speak(&self, text: Option<&str>) {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return;
        };
        let Some(speech) = &self.speech else {
            tracing::debug!("Speech synthesis unavailable, skipping '{}'", text);
            return;
        };

        let mut utterance = Utterance::new(text);

        let Some(voices) = speech.voices() else {
            let speech = Arc::clone(speech);
            let prefix = self.language_prefix.clone();
            tokio::spawn(async move {
                speech.voices_changed().await;
                let voices = speech.voices().unwrap_or_default();
                utterance.voice = select_voice(&voices, &prefix);
                if let Err(e) = speech.speak(utterance) {
                    tracing::warn!("Deferred speech failed: {}", e);
                }
            });
            return;
        };

        // No matching voice means the engine default
        utterance.voice = select_voice(&voices, &self.language_prefix);
        speech.cancel();
        if let Err(e) = speech.speak(utterance) {
            tracing::warn!("Speech failed: {}", e);
        }
    }
}

/// Protocol-relative URLs (`//host/path`) are resolved over https
pub fn normalize_audio_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;
    use crate::testing::{RecordingPlayer, RecordingSpeech, SpeechCall, english_voice};

    fn pronouncer(
        audio: Option<Arc<RecordingPlayer>>,
        speech: Option<Arc<RecordingSpeech>>,
    ) -> Pronouncer {
        Pronouncer::new(
            audio.map(|a| a as Arc<dyn AudioPlayer>),
            speech.map(|s| s as Arc<dyn SpeechSynthesizer>),
            "en",
        )
    }

    #[test]
    fn test_protocol_relative_url_gets_https() {
        assert_eq!(
            normalize_audio_url("//example.com/a.mp3"),
            "https://example.com/a.mp3"
        );
        assert_eq!(normalize_audio_url("http://x/a.mp3"), "http://x/a.mp3");
    }

    #[tokio::test]
    async fn test_play_normalizes_before_playing() {
        let player = Arc::new(RecordingPlayer::accepting());
        let speech = Arc::new(RecordingSpeech::with_voices(vec![english_voice()]));

        pronouncer(Some(player.clone()), Some(speech.clone()))
            .play(Some("//example.com/a.mp3"), Some("a"))
            .await;

        assert_eq!(player.played(), vec!["https://example.com/a.mp3"]);
        assert!(speech.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_playback_falls_back_to_speech() {
        let player = Arc::new(RecordingPlayer::rejecting());
        let speech = Arc::new(RecordingSpeech::with_voices(vec![english_voice()]));

        pronouncer(Some(player.clone()), Some(speech.clone()))
            .play(Some("https://x/a.mp3"), Some("colonel"))
            .await;

        assert_eq!(player.played(), vec!["https://x/a.mp3"]);
        assert_eq!(
            speech.calls(),
            vec![
                SpeechCall::Cancel,
                SpeechCall::Speak(Utterance {
                    text: "colonel".to_string(),
                    voice: Some(english_voice()),
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_url_and_no_speech_is_a_noop() {
        let player = Arc::new(RecordingPlayer::accepting());

        pronouncer(Some(player.clone()), None)
            .play(None, Some("colonel"))
            .await;

        assert!(player.played().is_empty());
    }

    #[tokio::test]
    async fn test_speak_waits_for_voices() {
        let speech = Arc::new(RecordingSpeech::enumerating());
        let pronouncer = pronouncer(None, Some(speech.clone()));

        pronouncer.speak(Some("hello"));
        assert!(speech.calls().is_empty());

        speech.publish_voices(vec![english_voice()]);

        let spoken = timeout(Duration::from_secs(2), async {
            loop {
                if !speech.calls().is_empty() {
                    break speech.calls();
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("deferred utterance never issued");

        assert_eq!(
            spoken,
            vec![SpeechCall::Speak(Utterance {
                text: "hello".to_string(),
                voice: Some(english_voice()),
            })]
        );
    }

    #[tokio::test]
    async fn test_speak_without_voices_uses_engine_default() {
        let speech = Arc::new(RecordingSpeech::enumerating());
        let pronouncer = pronouncer(None, Some(speech.clone()));

        pronouncer.speak(Some("first"));
        speech.publish_voices(vec![]);

        timeout(Duration::from_secs(2), async {
            while speech.calls().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("deferred utterance never issued");

        // Enumeration is over, so later utterances go out at once
        pronouncer.speak(Some("second"));

        assert_eq!(
            speech.calls(),
            vec![
                SpeechCall::Speak(Utterance::new("first")),
                SpeechCall::Cancel,
                SpeechCall::Speak(Utterance::new("second")),
            ]
        );
    }

    #[tokio::test]
    async fn test_speak_ignores_empty_text() {
        let speech = Arc::new(RecordingSpeech::with_voices(vec![english_voice()]));
        let pronouncer = pronouncer(None, Some(speech.clone()));

        pronouncer.speak(None);
        pronouncer.speak(Some(""));

        assert!(speech.calls().is_empty());
    }
}
