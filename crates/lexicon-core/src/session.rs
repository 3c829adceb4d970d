use lexicon_types::{SessionState, SessionView};
use tokio_util::sync::CancellationToken;

use crate::command::{Command, parse_command};
use crate::notebook::Notebook;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::search::Completion;

pub const USAGE_MESSAGE: &str = "Usage: /add [word] (Must match current result)";

/// Handle for one outstanding analysis
#[derive(Debug, Clone)]
pub struct Ticket {
    pub generation: u64,
    pub query: String,
    /// Cancelled once a newer search supersedes this one
    pub cancel: CancellationToken,
}

/// What `submit_search` and friends did
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input, nothing happened
    Ignored,
    NotebookOpened,
    /// `/add` without a word; state is now `Error(USAGE_MESSAGE)`
    UsageError,
    Saved(String),
    AlreadySaved(String),
    /// `/add` word does not match the current result; nothing changed
    AddMismatch(String),
    /// There is no current result to save; nothing changed
    NoResult,
    /// State is now `Loading`, the caller runs the analysis for this ticket
    Search(Ticket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// Superseded or cancelled, dropped without touching state
    Stale,
}

/// Owner of the search phase and the notebook for one user session
pub struct Session {
    state: SessionState,
    notebook: Notebook,
    notebook_open: bool,
    generation: u64,
    in_flight: Option<CancellationToken>,
    shutdown: CancellationToken,
    preprocessor: DefaultPreprocessor,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_shutdown(CancellationToken::new())
    }

    /// In-flight searches are cancelled along with `shutdown`
    pub fn with_shutdown(shutdown: CancellationToken) -> Self {
        Self {
            state: SessionState::Idle,
            notebook: Notebook::new(),
            notebook_open: false,
            generation: 0,
            in_flight: None,
            shutdown,
            preprocessor: DefaultPreprocessor,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn notebook_open(&self) -> bool {
        self.notebook_open
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Classify raw input and apply it
    pub fn submit_search(&mut self, raw: &str) -> SubmitOutcome {
        let input = self.preprocessor.process(raw);

        match parse_command(&input) {
            Command::Empty => SubmitOutcome::Ignored,
            Command::List => {
                self.notebook_open = true;
                SubmitOutcome::NotebookOpened
            }
            Command::AddMissingArg => {
                self.abandon_in_flight();
                self.state = SessionState::Error(USAGE_MESSAGE.to_string());
                SubmitOutcome::UsageError
            }
            Command::Add(arg) => self.add_matching(arg),
            Command::PlainSearch(word) => {
                if word.starts_with('/') {
                    tracing::warn!(input = %word, "Unrecognized command, searching literally");
                }
                self.begin_search(word)
            }
        }
    }

    /// Save the word of the current result
    pub fn save_current_result(&mut self) -> SubmitOutcome {
        let Some(record) = self.state.record() else {
            return SubmitOutcome::NoResult;
        };
        let word = record.word.clone();
        self.save(word)
    }

    /// Search a saved word again and close the notebook view
    pub fn select_notebook_entry(&mut self, word: &str) -> SubmitOutcome {
        let word = self
            .notebook
            .select_for_search(word)
            .unwrap_or(word)
            .to_string();
        self.notebook_open = false;
        self.submit_search(&word)
    }

    pub fn open_notebook(&mut self) {
        self.notebook_open = true;
    }

    pub fn close_notebook(&mut self) {
        self.notebook_open = false;
    }

    /// Apply a finished analysis if it belongs to the latest search
    pub fn resolve(&mut self, completion: Completion) -> Resolution {
        let Completion {
            generation,
            query,
            result,
        } = completion;

        if generation != self.generation || !self.state.is_loading() {
            tracing::debug!(query = %query, generation, current = self.generation, "Dropping stale analysis");
            return Resolution::Stale;
        }

        match result {
            Ok(record) => {
                tracing::info!(query = %query, word = %record.word, "Analysis ready");
                self.state = SessionState::Success(record);
            }
            Err(lexicon_analyzer::AnalysisError::Cancelled) => {
                tracing::debug!(query = %query, "Analysis cancelled");
                return Resolution::Stale;
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Analysis failed");
                self.state = SessionState::Error(e.user_message().to_string());
            }
        }

        self.in_flight = None;
        Resolution::Applied
    }

    /// Snapshot for the presentation layer
    pub fn view(&self) -> SessionView {
        let is_saved = self
            .state
            .record()
            .is_some_and(|record| self.notebook.contains(&record.word));

        SessionView {
            state: self.state.clone(),
            notebook: self.notebook.list(),
            notebook_open: self.notebook_open,
            is_saved,
        }
    }

    fn add_matching(&mut self, arg: String) -> SubmitOutcome {
        let matches = self.state.record().map(|record| record.is_word(&arg));

        match matches {
            Some(true) => self.save(arg),
            Some(false) => {
                tracing::warn!(arg = %arg, "Ignoring /add for a word that is not the current result");
                SubmitOutcome::AddMismatch(arg)
            }
            None => {
                tracing::warn!(arg = %arg, "Ignoring /add without a current result");
                SubmitOutcome::NoResult
            }
        }
    }

    fn save(&mut self, word: String) -> SubmitOutcome {
        if self.notebook.add(&word) {
            tracing::info!(word = %word, total = self.notebook.len(), "Saved to notebook");
            SubmitOutcome::Saved(word)
        } else {
            SubmitOutcome::AlreadySaved(word)
        }
    }

    fn begin_search(&mut self, query: String) -> SubmitOutcome {
        self.abandon_in_flight();

        let cancel = self.shutdown.child_token();
        self.in_flight = Some(cancel.clone());
        self.state = SessionState::Loading {
            query: query.clone(),
        };
        tracing::debug!(query = %query, generation = self.generation, "Search started");

        SubmitOutcome::Search(Ticket {
            generation: self.generation,
            query,
            cancel,
        })
    }

    /// Invalidate whatever search is outstanding
    fn abandon_in_flight(&mut self) {
        self.generation += 1;
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}
