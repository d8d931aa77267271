#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Synthesizer failed to start: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Synthesizer rejected utterance: {0}")]
    Rejected(String),
}

/// Rejected playback, the caller falls back to speech
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("Failed to fetch audio: {0}")]
    Fetch(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Player failed: {0}")]
    Player(#[from] std::io::Error),

    #[error("Player exited with {0}")]
    PlayerExit(String),
}
