use std::env;

use serde::{Deserialize, Serialize};

fn default_storage_key() -> String {
    "pf-history".to_string()
}

fn default_capacity() -> usize {
    20
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    /// Slot name in the key-value store
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl HistoryConfig {
    pub fn new() -> Self {
        Self {
            storage_key: env::var("PHONICA_HISTORY_KEY").unwrap_or_else(|_| default_storage_key()),
            capacity: default_capacity(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
