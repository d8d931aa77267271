use std::sync::Arc;

use phonica_api::{DatamuseClient, FreeDictionaryClient};
use phonica_config::Config;
use phonica_core::audio::AudioPlayer;
use phonica_core::history::HistoryStore;
use phonica_core::playback::Pronouncer;
use phonica_core::speech::SpeechSynthesizer;
use phonica_core::{Session, SessionSettings};
use phonica_io::{CommandAudioPlayer, EspeakSynthesizer, FileStore};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Wire the session to this host's services and capabilities
    pub async fn build_session(&self) -> anyhow::Result<Session> {
        let config = self.config.read().await;

        let dictionary =
            FreeDictionaryClient::new(config.api.dictionary_url.clone(), &config.api.user_agent)?;
        let suggester =
            DatamuseClient::new(config.api.suggestion_url.clone(), &config.api.user_agent)?;

        let store = Arc::new(FileStore::new(&config.data_dir));
        let history = HistoryStore::load(
            store,
            config.history.storage_key.clone(),
            config.history.capacity,
        );

        let speech: Option<Arc<dyn SpeechSynthesizer>> = if config.speech.enabled {
            EspeakSynthesizer::detect(&config.speech.command)
                .await
                .map(|s| s as Arc<dyn SpeechSynthesizer>)
        } else {
            tracing::info!("Speech synthesis disabled");
            None
        };

        let audio: Option<Arc<dyn AudioPlayer>> = match config.audio.player_argv() {
            Some((program, args)) if config.audio.enabled => {
                let player = CommandAudioPlayer::new(program, args, &config.api.user_agent)?;
                Some(Arc::new(player) as Arc<dyn AudioPlayer>)
            }
            _ => {
                tracing::info!("Audio playback disabled");
                None
            }
        };

        let pronouncer = Pronouncer::new(audio, speech, config.speech.language_prefix.clone());

        Ok(Session::new(
            Arc::new(dictionary),
            Arc::new(suggester),
            pronouncer,
            history,
            SessionSettings::from_config(&config),
        ))
    }
}
