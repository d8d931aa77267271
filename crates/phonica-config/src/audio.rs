use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_player_command() -> String {
    "ffplay -nodisp -autoexit -loglevel quiet -".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AudioConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Player reading the clip from stdin, split on whitespace
    #[serde(default = "default_player_command")]
    pub player_command: String,
}

impl AudioConfig {
    pub fn new() -> Self {
        Self {
            enabled: default_enabled(),
            player_command: env::var("PHONICA_AUDIO_PLAYER")
                .unwrap_or_else(|_| default_player_command()),
        }
    }

    /// Program and arguments of the player command
    pub fn player_argv(&self) -> Option<(String, Vec<String>)> {
        let mut parts = self.player_command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some((program, parts.collect()))
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self::new()
    }
}
