use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::audio::AudioConfig;
use self::history::HistoryConfig;
use self::speech::SpeechConfig;
use self::suggestions::SuggestionConfig;
use self::ui::UiConfig;

pub mod api;
pub mod audio;
pub mod history;
pub mod speech;
pub mod suggestions;
pub mod ui;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub history: HistoryConfig,
    pub suggestions: SuggestionConfig,
    pub speech: SpeechConfig,
    pub audio: AudioConfig,
    pub ui: UiConfig,

    /// Root for persisted history and profiles
    pub data_dir: PathBuf,
    /// Capacity of the UI <-> backend channels
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let data_dir = env::var("PHONICA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let channel_capacity = env::var("PHONICA_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        Config {
            api: ApiConfig::new(),
            history: HistoryConfig::new(),
            suggestions: SuggestionConfig::default(),
            speech: SpeechConfig::new(),
            audio: AudioConfig::new(),
            ui: UiConfig::default(),

            data_dir,
            channel_capacity,
        }
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.data_dir.join("profiles")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("dev", "phonica", "phonica")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".phonica"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"suggestions":{"display_limit":3},"ui":{"color":false}}"#)
                .unwrap();

        assert_eq!(config.suggestions.display_limit, 3);
        assert_eq!(config.suggestions.min_chars, 2);
        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.ui.definitions_per_meaning, 3);
        assert_eq!(config.ui.color, Some(false));
    }

    #[test]
    fn test_player_argv_splits_command() {
        let audio = AudioConfig {
            enabled: true,
            player_command: "mpv --no-video -".to_string(),
        };
        let (program, args) = audio.player_argv().unwrap();
        assert_eq!(program, "mpv");
        assert_eq!(args, vec!["--no-video", "-"]);

        let empty = AudioConfig {
            enabled: true,
            player_command: "   ".to_string(),
        };
        assert!(empty.player_argv().is_none());
    }
}
