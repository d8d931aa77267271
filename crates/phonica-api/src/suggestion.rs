use async_trait::async_trait;
use reqwest::Url;

use crate::entry::parse_suggestions;
use crate::{ApiError, SuggestionProvider};

/// Client for the Datamuse `/sug` endpoint
#[derive(Clone)]
pub struct DatamuseClient {
    client: reqwest::Client,
    base_url: String,
}

impl DatamuseClient {
    pub fn new(base_url: String, user_agent: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self, query: &str) -> Result<Url, ApiError> {
        Url::parse_with_params(&self.base_url, &[("s", query)]).map_err(|e| {
            ApiError::InvalidEndpoint {
                url: self.base_url.clone(),
                reason: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl SuggestionProvider for DatamuseClient {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApiError> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }

        let url = self.endpoint(query)?;
        tracing::debug!("Suggestion request: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(format!("Failed to parse response: {}", e)))?;

        parse_suggestions(&json)
    }
}
