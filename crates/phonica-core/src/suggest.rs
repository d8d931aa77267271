use phonica_api::SuggestionProvider;

/// Monotonic request counter; only the latest generation may apply its result
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: u64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Whether `input` is long enough to ask for suggestions
pub fn qualifies(input: &str, min_chars: usize) -> bool {
    input.trim().chars().count() >= min_chars
}

/// Fetch suggestions, degrading any failure to an empty list
pub async fn fetch_suggestions(provider: &dyn SuggestionProvider, query: &str) -> Vec<String> {
    match provider.suggest(query).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("Suggestions for '{}' unavailable: {}", query, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSuggestions;

    #[test]
    fn test_generation_supersedes_earlier_requests() {
        let mut generation = RequestGeneration::new();
        let first = generation.next();
        let second = generation.next();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(generation.latest(), 2);
    }

    #[test]
    fn test_qualifies_counts_trimmed_chars() {
        assert!(!qualifies("", 2));
        assert!(!qualifies(" a ", 2));
        assert!(qualifies(" ab", 2));
        assert!(qualifies("éa", 2));
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty() {
        let provider = FakeSuggestions::failing();
        assert!(fetch_suggestions(&provider, "col").await.is_empty());
        assert_eq!(provider.requests(), vec!["col"]);
    }
}
