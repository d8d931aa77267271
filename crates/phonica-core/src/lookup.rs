use phonica_api::{ApiError, DictionaryEntry};
use phonica_types::{LookupOutcome, LookupResult};

/// Advisory shown when the dictionary cannot resolve a word
pub const NOT_FOUND_MESSAGE: &str =
    "Word not found in dictionary API — using speech synthesis fallback.";

/// Turn a dictionary response into the outcome the session records
pub fn resolve(query: &str, response: Result<Vec<DictionaryEntry>, ApiError>) -> LookupOutcome {
    match response {
        Ok(entries) => LookupOutcome::Found(normalize(query, &entries)),
        Err(e) => {
            tracing::info!("Lookup for '{}' failed, falling back: {}", query, e);
            LookupOutcome::Fallback(LookupResult::fallback(query))
        }
    }
}

/// Collect phonetics and audio across every entry; meanings and the
/// canonical word come from the first entry only.
pub fn normalize(query: &str, entries: &[DictionaryEntry]) -> LookupResult {
    let mut phonetics = Vec::new();
    let mut audios = Vec::new();

    for phonetic in entries.iter().flat_map(|e| &e.phonetics) {
        if let Some(text) = &phonetic.text {
            push_unique(&mut phonetics, text);
        }
        if let Some(audio) = &phonetic.audio {
            push_unique(&mut audios, audio);
        }
    }

    let first = entries.first();

    LookupResult {
        word: first
            .and_then(|e| e.word.clone())
            .unwrap_or_else(|| query.to_string()),
        phonetics,
        audios,
        meanings: first.map(|e| e.meanings.clone()).unwrap_or_default(),
    }
}

fn push_unique(set: &mut Vec<String>, value: &str) {
    if !set.iter().any(|v| v == value) {
        set.push(value.to_string());
    }
}
