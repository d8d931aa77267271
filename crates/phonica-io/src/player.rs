use std::process::Stdio;

use async_trait::async_trait;
use phonica_core::PlaybackError;
use phonica_core::audio::AudioPlayer;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Downloads a clip and pipes it into an external player's stdin
pub struct CommandAudioPlayer {
    client: reqwest::Client,
    program: String,
    args: Vec<String>,
}

impl CommandAudioPlayer {
    pub fn new(program: String, args: Vec<String>, user_agent: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            program,
            args,
        })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PlaybackError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlaybackError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlaybackError::Status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PlaybackError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn pipe(&self, clip: &[u8]) -> Result<(), PlaybackError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(clip).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(PlaybackError::PlayerExit(status.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AudioPlayer for CommandAudioPlayer {
    async fn play(&self, url: &str) -> Result<(), PlaybackError> {
        let clip = self.fetch(url).await?;
        tracing::debug!("Fetched {} bytes from {}", clip.len(), url);
        self.pipe(&clip).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(program: &str, args: &[&str]) -> CommandAudioPlayer {
        CommandAudioPlayer::new(
            program.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
            "phonica-test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_clip_is_rejected() {
        let result = player("cat", &[]).play("http://127.0.0.1:1/a.mp3").await;
        assert!(matches!(result, Err(PlaybackError::Fetch(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pipe_feeds_player_stdin() {
        player("cat", &[]).pipe(b"ID3 fake clip").await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_player_is_rejected() {
        let result = player("false", &[]).pipe(b"").await;
        assert!(matches!(result, Err(PlaybackError::PlayerExit(_))));
    }

    #[tokio::test]
    async fn test_missing_player_is_rejected() {
        let result = player("phonica-no-such-player", &[]).pipe(b"clip").await;
        assert!(matches!(result, Err(PlaybackError::Player(_))));
    }
}
