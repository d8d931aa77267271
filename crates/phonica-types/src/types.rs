use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Suggestion fetch finished for the given request generation
    SuggestionsReady {
        generation: u64,
        suggestions: Vec<String>,
    },
    /// Dictionary lookup finished (found or fallback)
    LookupFinished {
        ticket: LookupTicket,
        outcome: LookupOutcome,
    },
    ShowSession(SessionView),
    BackendReady,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    TextInput(String),
    Search(Option<String>),
    SelectSuggestion(usize),
    SelectHistory(usize),
    /// Play the audio clip at the index, or the default pronunciation
    Play(Option<usize>),
    Reset,
    /// No more input; stop once running lookups have landed
    EndOfInput,
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

/// Normalized outcome of one dictionary lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub word: String,
    pub phonetics: Vec<String>,
    pub audios: Vec<String>,
    pub meanings: Vec<Meaning>,
}

impl LookupResult {
    /// Placeholder used when the dictionary cannot resolve `word`
    pub fn fallback(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    pub fn first_audio(&self) -> Option<&str> {
        self.audios.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.phonetics.is_empty() && self.audios.is_empty() && self.meanings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(LookupResult),
    Fallback(LookupResult),
}

impl LookupOutcome {
    pub fn result(&self) -> &LookupResult {
        match self {
            LookupOutcome::Found(result) | LookupOutcome::Fallback(result) => result,
        }
    }

    pub fn into_result(self) -> LookupResult {
        match self {
            LookupOutcome::Found(result) | LookupOutcome::Fallback(result) => result,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// Installed speech-synthesis voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
}

/// Snapshot of the session as the view renders it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub input: String,
    pub result: Option<LookupResult>,
    pub loading: bool,
    pub error: Option<String>,
    pub suggestions: Vec<String>,
    pub history: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_result_is_empty() {
        let result = LookupResult::fallback("qzxthisisnotaword");
        assert_eq!(result.word, "qzxthisisnotaword");
        assert!(result.is_empty());
        assert_eq!(result.first_audio(), None);
    }

    #[test]
    fn test_meaning_uses_camel_case_part_of_speech() {
        let meaning: Meaning = serde_json::from_str(
            r#"{"partOfSpeech":"noun","definitions":[{"definition":"a greeting"}]}"#,
        )
        .unwrap();
        assert_eq!(meaning.part_of_speech, "noun");
        assert_eq!(meaning.definitions[0].example, None);
    }
}
