use std::env;

use serde::{Deserialize, Serialize};

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en/".to_string()
}

fn default_suggestion_url() -> String {
    "https://api.datamuse.com/sug".to_string()
}

fn default_user_agent() -> String {
    format!("phonica/{}", env!("CARGO_PKG_VERSION"))
}

/// Endpoints of the dictionary and suggestion services
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Base path, the escaped word is appended as the last segment
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    /// Base path, the escaped word is sent as the `s` parameter
    #[serde(default = "default_suggestion_url")]
    pub suggestion_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    pub fn new() -> Self {
        Self {
            dictionary_url: env::var("PHONICA_DICTIONARY_URL")
                .unwrap_or_else(|_| default_dictionary_url()),
            suggestion_url: env::var("PHONICA_SUGGESTION_URL")
                .unwrap_or_else(|_| default_suggestion_url()),
            user_agent: env::var("PHONICA_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}
