use serde::{Deserialize, Serialize};

fn default_definitions_per_meaning() -> usize {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_definitions_per_meaning")]
    pub definitions_per_meaning: usize,
    /// Force ANSI styling on or off, `None` follows the terminal
    #[serde(default)]
    pub color: Option<bool>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            definitions_per_meaning: default_definitions_per_meaning(),
            color: None,
        }
    }
}
