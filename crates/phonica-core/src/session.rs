use std::sync::Arc;

use phonica_api::{DictionaryProvider, SuggestionProvider};
use phonica_config::Config;
use phonica_types::{LookupOutcome, LookupResult, LookupTicket, SessionView};

use crate::history::HistoryStore;
use crate::lookup::NOT_FOUND_MESSAGE;
use crate::playback::Pronouncer;
use crate::suggest::{RequestGeneration, qualifies};

/// Limits the session applies to what it fetches and shows
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub min_suggestion_chars: usize,
    pub suggestion_display_limit: usize,
    pub definitions_per_meaning: usize,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_suggestion_chars: config.suggestions.min_chars,
            suggestion_display_limit: config.suggestions.display_limit,
            definitions_per_meaning: config.ui.definitions_per_meaning,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_suggestion_chars: 2,
            suggestion_display_limit: 6,
            definitions_per_meaning: 3,
        }
    }
}

/// What the caller should fetch after an input change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub generation: u64,
    pub query: String,
}

/// What the caller should play for a play action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub url: Option<String>,
    pub word: Option<String>,
}

/// The lookup session: view state plus the collaborators that feed it.
///
/// All mutation goes through these methods. Network work is split into a
/// `begin_*` step that returns a ticket and a `finish_*`/`apply_*` step that
/// takes the response, so an event loop can run the request elsewhere and
/// feed the answer back in.
pub struct Session {
    input: String,
    result: Option<LookupResult>,
    loading: bool,
    error: Option<String>,
    suggestions: Vec<String>,
    history: HistoryStore,

    suggestion_generation: RequestGeneration,
    lookup_generation: RequestGeneration,

    dictionary: Arc<dyn DictionaryProvider>,
    suggester: Arc<dyn SuggestionProvider>,
    pronouncer: Arc<Pronouncer>,
    settings: SessionSettings,
}

impl Session {
    pub fn new(
        dictionary: Arc<dyn DictionaryProvider>,
        suggester: Arc<dyn SuggestionProvider>,
        pronouncer: Pronouncer,
        history: HistoryStore,
        settings: SessionSettings,
    ) -> Self {
        Self {
            input: String::new(),
            result: None,
            loading: false,
            error: None,
            suggestions: Vec::new(),
            history,
            suggestion_generation: RequestGeneration::new(),
            lookup_generation: RequestGeneration::new(),
            dictionary,
            suggester,
            pronouncer: Arc::new(pronouncer),
            settings,
        }
    }

    pub fn dictionary(&self) -> Arc<dyn DictionaryProvider> {
        Arc::clone(&self.dictionary)
    }

    pub fn suggester(&self) -> Arc<dyn SuggestionProvider> {
        Arc::clone(&self.suggester)
    }

    pub fn pronouncer(&self) -> Arc<Pronouncer> {
        Arc::clone(&self.pronouncer)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<&LookupResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    /// Record new input text.
    ///
    /// Returns the suggestion request to run when the trimmed text is long
    /// enough; otherwise the list is cleared and nothing should be fetched.
    /// Either way every earlier request becomes stale.
    pub fn set_input(&mut self, text: impl Into<String>) -> Option<SuggestionRequest> {
        self.input = text.into();
        let generation = self.suggestion_generation.next();

        if !qualifies(&self.input, self.settings.min_suggestion_chars) {
            self.suggestions.clear();
            return None;
        }

        Some(SuggestionRequest {
            generation,
            query: self.input.clone(),
        })
    }

    /// Apply a suggestion response; stale generations are dropped
    pub fn apply_suggestions(&mut self, generation: u64, suggestions: Vec<String>) -> bool {
        if !self.suggestion_generation.is_current(generation) {
            tracing::debug!(
                "Dropping stale suggestions (generation {} < {})",
                generation,
                self.suggestion_generation.latest()
            );
            return false;
        }

        self.suggestions = suggestions;
        true
    }

    /// Start a lookup of `word`, or of the current input when `word` is
    /// absent or empty. Returns `None` (and changes nothing) when the
    /// trimmed query is empty.
    pub fn begin_lookup(&mut self, word: Option<&str>) -> Option<LookupTicket> {
        let query = word
            .filter(|w| !w.is_empty())
            .unwrap_or(&self.input)
            .trim()
            .to_string();

        if query.is_empty() {
            return None;
        }

        self.loading = true;
        self.error = None;
        self.result = None;

        Some(LookupTicket {
            generation: self.lookup_generation.next(),
            query,
        })
    }

    /// Complete a lookup started with [`Session::begin_lookup`].
    ///
    /// History is always updated. View state is only written when the
    /// ticket belongs to the latest lookup; returns whether it was.
    pub fn finish_lookup(&mut self, ticket: LookupTicket, outcome: LookupOutcome) -> bool {
        self.history.record(&outcome.result().word);

        if !self.lookup_generation.is_current(ticket.generation) {
            tracing::debug!("Lookup '{}' superseded, keeping newer view", ticket.query);
            return false;
        }

        match outcome {
            LookupOutcome::Found(result) => {
                self.result = Some(result);
            }
            LookupOutcome::Fallback(result) => {
                self.error = Some(NOT_FOUND_MESSAGE.to_string());
                self.result = Some(result);
            }
        }
        self.loading = false;
        true
    }

    /// Take a suggestion as the input and start looking it up
    pub fn select_suggestion(&mut self, index: usize) -> Option<LookupTicket> {
        let word = self.suggestions.get(index)?.clone();
        self.adopt_input(word.clone());
        self.begin_lookup(Some(&word))
    }

    /// Take a history entry as the input and start looking it up
    pub fn select_history(&mut self, index: usize) -> Option<LookupTicket> {
        let word = self.history.get(index)?.to_string();
        self.adopt_input(word.clone());
        self.begin_lookup(Some(&word))
    }

    /// Clear input, result and error; history is kept
    pub fn reset(&mut self) {
        self.set_input(String::new());
        self.result = None;
        self.error = None;
    }

    /// Resolve a play action against the current result.
    ///
    /// `Some(i)` targets the i-th audio clip; `None` picks the first clip
    /// if there is one and otherwise speaks the word.
    pub fn play_request(&self, index: Option<usize>) -> PlayRequest {
        let word = self.result.as_ref().map(|r| r.word.clone());
        let url = self.result.as_ref().and_then(|r| match index {
            Some(i) => r.audios.get(i).cloned(),
            None => r.first_audio().map(str::to_string),
        });
        PlayRequest { url, word }
    }

    /// Snapshot for rendering, trimmed to the display limits
    pub fn view(&self) -> SessionView {
        let result = self.result.as_ref().map(|r| {
            let mut r = r.clone();
            for meaning in &mut r.meanings {
                meaning
                    .definitions
                    .truncate(self.settings.definitions_per_meaning);
            }
            r
        });

        SessionView {
            input: self.input.clone(),
            result,
            loading: self.loading,
            error: self.error.clone(),
            suggestions: self
                .suggestions
                .iter()
                .take(self.settings.suggestion_display_limit)
                .cloned()
                .collect(),
            history: self.history.entries().to_vec(),
        }
    }

    /// Input set by a selection: no suggestion fetch, in-flight ones are stale
    fn adopt_input(&mut self, word: String) {
        self.input = word;
        self.suggestion_generation.next();
        self.suggestions.clear();
    }
}
