//! In-memory collaborators for tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use phonica_api::{ApiError, DictionaryEntry, DictionaryProvider, SuggestionProvider};
use phonica_types::Voice;
use tokio::sync::watch;

use crate::audio::AudioPlayer;
use crate::error::{PlaybackError, SpeechError, StorageError};
use crate::speech::{SpeechSynthesizer, Utterance};
use crate::storage::KeyValueStore;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Store whose every operation fails
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// Dictionary answering from a fixed table; unknown words are not found
#[derive(Default)]
pub struct FakeDictionary {
    entries: HashMap<String, Vec<DictionaryEntry>>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl FakeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: &str, entries: Vec<DictionaryEntry>) -> Self {
        self.entries.insert(word.to_lowercase(), entries);
        self
    }

    pub fn delayed(mut self, word: &str, delay: Duration) -> Self {
        self.delays.insert(word.to_lowercase(), delay);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl DictionaryProvider for FakeDictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, ApiError> {
        lock(&self.requests).push(word.to_string());

        let key = word.to_lowercase();
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }

        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| ApiError::Malformed("No Definitions Found".to_string()))
    }
}

#[derive(Default)]
pub struct FakeSuggestions {
    responses: HashMap<String, Vec<String>>,
    delays: HashMap<String, Duration>,
    fail: bool,
    requests: Mutex<Vec<String>>,
}

impl FakeSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, query: &str, list: &[&str]) -> Self {
        self.responses.insert(
            query.to_string(),
            list.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn delayed(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl SuggestionProvider for FakeSuggestions {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApiError> {
        lock(&self.requests).push(query.to_string());

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail {
            return Err(ApiError::Malformed("suggestions offline".to_string()));
        }

        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}

pub struct RecordingPlayer {
    reject: bool,
    played: Mutex<Vec<String>>,
}

impl RecordingPlayer {
    pub fn accepting() -> Self {
        Self {
            reject: false,
            played: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            played: Mutex::new(Vec::new()),
        }
    }

    pub fn played(&self) -> Vec<String> {
        lock(&self.played).clone()
    }
}

#[async_trait]
impl AudioPlayer for RecordingPlayer {
    async fn play(&self, url: &str) -> Result<(), PlaybackError> {
        lock(&self.played).push(url.to_string());
        if self.reject {
            return Err(PlaybackError::Status(403));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechCall {
    Speak(Utterance),
    Cancel,
}

/// Synthesizer that records calls; voices are published on demand
pub struct RecordingSpeech {
    voices: watch::Sender<Option<Vec<Voice>>>,
    calls: Mutex<Vec<SpeechCall>>,
}

impl RecordingSpeech {
    /// Enumeration already finished with `voices`
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self::from_state(Some(voices))
    }

    /// Enumeration still running until [`RecordingSpeech::publish_voices`]
    pub fn enumerating() -> Self {
        Self::from_state(None)
    }

    fn from_state(voices: Option<Vec<Voice>>) -> Self {
        let (voices, _) = watch::channel(voices);
        Self {
            voices,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn publish_voices(&self, voices: Vec<Voice>) {
        self.voices.send_replace(Some(voices));
    }

    pub fn calls(&self) -> Vec<SpeechCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSpeech {
    fn voices(&self) -> Option<Vec<Voice>> {
        self.voices.borrow().clone()
    }

    async fn voices_changed(&self) {
        let mut rx = self.voices.subscribe();
        let _ = rx.wait_for(Option::is_some).await;
    }

    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        lock(&self.calls).push(SpeechCall::Speak(utterance));
        Ok(())
    }

    fn cancel(&self) {
        lock(&self.calls).push(SpeechCall::Cancel);
    }
}

pub fn english_voice() -> Voice {
    Voice {
        id: "en-us".to_string(),
        name: "English_(America)".to_string(),
        language: "en-us".to_string(),
    }
}
