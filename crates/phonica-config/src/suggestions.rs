use serde::{Deserialize, Serialize};

fn default_min_chars() -> usize {
    2
}

fn default_display_limit() -> usize {
    6
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Trimmed input shorter than this never hits the suggestion service
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            display_limit: default_display_limit(),
        }
    }
}
