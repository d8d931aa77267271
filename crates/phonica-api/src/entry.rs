use phonica_types::{Definition, Meaning};
use serde_json::Value;

use crate::ApiError;

/// One entry object of a dictionary response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: Option<String>,
    pub phonetics: Vec<Phonetic>,
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
}

/// Parse a dictionary response body.
///
/// The body must be an array; anything else is the service's way of saying
/// "not found" and is reported as [`ApiError::Malformed`]. Individual entries
/// are read leniently: missing or mistyped fields become empty values and
/// empty strings count as absent.
pub fn parse_entries(body: &Value) -> Result<Vec<DictionaryEntry>, ApiError> {
    let entries = body
        .as_array()
        .ok_or_else(|| ApiError::Malformed("expected an array of entries".to_string()))?;

    Ok(entries.iter().map(parse_entry).collect())
}

/// Parse a suggestion response body, skipping items without a `word`
pub fn parse_suggestions(body: &Value) -> Result<Vec<String>, ApiError> {
    let items = body
        .as_array()
        .ok_or_else(|| ApiError::Malformed("expected an array of suggestions".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| item["word"].as_str())
        .map(str::to_string)
        .collect())
}

fn parse_entry(entry: &Value) -> DictionaryEntry {
    let phonetics = entry["phonetics"]
        .as_array()
        .map(|list| {
            list.iter()
                .map(|p| Phonetic {
                    text: non_empty_str(&p["text"]),
                    audio: non_empty_str(&p["audio"]),
                })
                .collect()
        })
        .unwrap_or_default();

    let meanings = entry["meanings"]
        .as_array()
        .map(|list| list.iter().map(parse_meaning).collect())
        .unwrap_or_default();

    DictionaryEntry {
        word: non_empty_str(&entry["word"]),
        phonetics,
        meanings,
    }
}

fn parse_meaning(meaning: &Value) -> Meaning {
    let definitions = meaning["definitions"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|d| {
                    Some(Definition {
                        definition: d["definition"].as_str()?.to_string(),
                        example: non_empty_str(&d["example"]),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Meaning {
        part_of_speech: meaning["partOfSpeech"].as_str().unwrap_or_default().to_string(),
        definitions,
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_entries_reads_nested_fields() {
        let body = json!([{
            "word": "hello",
            "phonetics": [
                {"text": "/həˈləʊ/", "audio": "//ssl.gstatic.com/hello.mp3"},
                {"text": "/hɛˈləʊ/"},
                null
            ],
            "meanings": [{
                "partOfSpeech": "exclamation",
                "definitions": [
                    {"definition": "used as a greeting", "example": "hello there"},
                    {"definition": "used to attract attention", "example": ""},
                    {"example": "no definition text"}
                ]
            }]
        }]);

        let entries = parse_entries(&body).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.word.as_deref(), Some("hello"));
        assert_eq!(entry.phonetics.len(), 3);
        assert_eq!(entry.phonetics[1].audio, None);
        assert_eq!(entry.phonetics[2], Phonetic::default());

        let definitions = &entry.meanings[0].definitions;
        assert_eq!(entry.meanings[0].part_of_speech, "exclamation");
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].example.as_deref(), Some("hello there"));
        assert_eq!(definitions[1].example, None);
    }

    #[test]
    fn test_parse_entries_rejects_not_found_object() {
        let body = json!({
            "title": "No Definitions Found",
            "message": "Sorry pal, we couldn't find definitions for the word you were looking for."
        });
        assert!(matches!(parse_entries(&body), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_parse_entries_tolerates_missing_sections() {
        let body = json!([{"word": ""}, {"phonetics": "oops", "meanings": 3}]);
        let entries = parse_entries(&body).unwrap();
        assert_eq!(entries, vec![DictionaryEntry::default(), DictionaryEntry::default()]);
    }

    #[test]
    fn test_parse_suggestions_skips_items_without_word() {
        let body = json!([
            {"word": "colonel", "score": 1000},
            {"score": 12},
            {"word": "colonial", "score": 900}
        ]);
        assert_eq!(parse_suggestions(&body).unwrap(), vec!["colonel", "colonial"]);
        assert!(parse_suggestions(&json!("colonel")).is_err());
    }
}
