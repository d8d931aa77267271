mod dictionary;
mod entry;
mod suggestion;

pub use dictionary::FreeDictionaryClient;
pub use entry::{DictionaryEntry, Phonetic, parse_entries, parse_suggestions};
pub use suggestion::DatamuseClient;

/// Dictionary lookup service
#[async_trait::async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Fetch every entry the service knows for `word`
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, ApiError>;
}

/// Spelling suggestion service
#[async_trait::async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Candidate spellings for a partial or misspelled `query`
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
