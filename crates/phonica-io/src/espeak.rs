use std::process::Stdio;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use phonica_core::SpeechError;
use phonica_core::speech::{SpeechSynthesizer, Utterance};
use phonica_types::Voice;
use tokio::process::{Child, Command};
use tokio::sync::watch;

/// Speech through an eSpeak-compatible executable (`espeak-ng`, `espeak`).
///
/// Voices are enumerated in the background after construction, so the list
/// starts unknown, the same way browser engines populate theirs.
pub struct EspeakSynthesizer {
    command: String,
    voices: watch::Sender<Option<Vec<Voice>>>,
    current: Mutex<Option<Child>>,
}

impl EspeakSynthesizer {
    /// `None` when `command` cannot be run on this host
    pub async fn detect(command: &str) -> Option<Arc<Self>> {
        let status = Command::new(command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(_) => Some(Self::spawn(command)),
            Err(e) => {
                tracing::warn!("Speech synthesizer '{}' unavailable: {}", command, e);
                None
            }
        }
    }

    /// Create the synthesizer and start enumerating voices
    pub fn spawn(command: &str) -> Arc<Self> {
        let (voices, _) = watch::channel(None);
        let synth = Arc::new(Self {
            command: command.to_string(),
            voices,
            current: Mutex::new(None),
        });

        let worker = Arc::clone(&synth);
        tokio::spawn(async move {
            let voices = match worker.list_voices().await {
                Ok(voices) => {
                    tracing::info!("{} voices available", voices.len());
                    voices
                }
                Err(e) => {
                    tracing::warn!("Failed to enumerate voices, using engine default: {}", e);
                    Vec::new()
                }
            };
            worker.voices.send_replace(Some(voices));
        });

        synth
    }

    async fn list_voices(&self) -> std::io::Result<Vec<Voice>> {
        let output = Command::new(&self.command)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()
            .await?;

        Ok(parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<Child>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    fn voices(&self) -> Option<Vec<Voice>> {
        self.voices.borrow().clone()
    }

    async fn voices_changed(&self) {
        let mut rx = self.voices.subscribe();
        let _ = rx.wait_for(Option::is_some).await;
    }

    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let mut command = Command::new(&self.command);
        if let Some(voice) = &utterance.voice {
            command.arg("-v").arg(&voice.id);
        }

        let child = command
            .arg("--")
            .arg(&utterance.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        tracing::debug!("Speaking '{}'", utterance.text);
        *self.lock_current() = Some(child);
        Ok(())
    }

    fn cancel(&self) {
        if let Some(mut child) = self.lock_current().take()
            && let Err(e) = child.start_kill()
        {
            tracing::debug!("Cancel found no running utterance: {}", e);
        }
    }
}

/// Parse the `--voices` table:
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File          Other Languages
///  5  af              --/M      Afrikaans          gmw/af
///  5  en-us           --/M      English_(America)  gmw/en-US     (en 10)
/// ```
pub fn parse_voices(table: &str) -> Vec<Voice> {
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 4 {
                return None;
            }
            Some(Voice {
                id: columns[1].to_string(),
                name: columns[3].to_string(),
                language: columns[1].to_string(),
            })
        })
        .collect()
}
