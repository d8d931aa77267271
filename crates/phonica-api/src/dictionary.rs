use async_trait::async_trait;
use reqwest::Url;

use crate::entry::{DictionaryEntry, parse_entries};
use crate::{ApiError, DictionaryProvider};

/// Client for the dictionaryapi.dev entries endpoint
#[derive(Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl FreeDictionaryClient {
    pub fn new(base_url: String, user_agent: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL with `word` appended as one escaped path segment
    pub fn endpoint(&self, word: &str) -> Result<Url, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidEndpoint {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base"))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

#[async_trait]
impl DictionaryProvider for FreeDictionaryClient {
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, ApiError> {
        let url = self.endpoint(word)?;
        tracing::debug!("Dictionary request: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(format!("Failed to parse response: {}", e)))?;

        parse_entries(&json)
    }
}
