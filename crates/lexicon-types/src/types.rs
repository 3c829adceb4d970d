use serde::{Deserialize, Serialize};

/// Pronunciation block of an analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phonetics {
    pub ipa: String,
    pub syllables: String,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Etymology {
    /// Prefix + root + suffix breakdown
    pub root_analysis: String,
    pub backstory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cognate {
    pub word: String,
    pub connection: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    pub word: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nuance {
    pub synonyms: Vec<Synonym>,
    pub antonym: String,
    pub examples: Vec<String>,
}

/// One complete word analysis as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconRecord {
    pub word: String,
    pub phonetics: Phonetics,
    pub etymology: Etymology,
    pub cognates: Vec<Cognate>,
    pub nuance: Nuance,
}

impl LexiconRecord {
    /// Case-insensitive comparison against the analyzed word
    pub fn is_word(&self, other: &str) -> bool {
        self.word.to_lowercase() == other.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookEntry {
    pub word: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

/// Search phase of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Success(LexiconRecord),
    Error(String),
}

impl SessionState {
    pub fn record(&self) -> Option<&LexiconRecord> {
        match self {
            SessionState::Success(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }
}

/// Snapshot handed to the presentation layer after every transition
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub state: SessionState,
    pub notebook: Vec<NotebookEntry>,
    pub notebook_open: bool,
    /// Current result is already in the notebook
    pub is_saved: bool,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    Render(SessionView),
    /// One-line hint that does not change the session state
    Notice(String),
    BackendReady,
}

/// Intents forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit(String),
    SaveCurrent,
    SelectEntry(String),
    OpenNotebook,
    CloseNotebook,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etymology_uses_camel_case_keys() {
        let etymology = Etymology {
            root_analysis: "sub- + lime".to_string(),
            backstory: "story".to_string(),
        };
        let json = serde_json::to_value(&etymology).unwrap();
        assert_eq!(json["rootAnalysis"], "sub- + lime");
        assert!(json.get("root_analysis").is_none());
    }

    #[test]
    fn test_is_word_ignores_case() {
        let record: LexiconRecord = serde_json::from_value(serde_json::json!({
            "word": "Serendipity",
            "phonetics": { "ipa": "/ˌserənˈdɪpəti/", "syllables": "ser-en-DIP-i-ty", "tip": "tip" },
            "etymology": { "rootAnalysis": "Serendip + -ity", "backstory": "story" },
            "cognates": [],
            "nuance": { "synonyms": [], "antonym": "misfortune", "examples": [] }
        }))
        .unwrap();

        assert!(record.is_word("serendipity"));
        assert!(record.is_word("SERENDIPITY"));
        assert!(!record.is_word("serendip"));
    }

    #[test]
    fn test_session_state_defaults_to_idle() {
        let state = SessionState::default();
        assert_eq!(state, SessionState::Idle);
        assert!(state.record().is_none());
        assert!(!state.is_loading());
    }
}
