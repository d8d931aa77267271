use async_trait::async_trait;

use crate::error::PlaybackError;

/// Remote clip playback
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play the clip at `url`; an error means playback was rejected
    async fn play(&self, url: &str) -> Result<(), PlaybackError>;
}
