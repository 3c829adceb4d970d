use std::time::Duration;

use lexicon_types::LexiconRecord;

pub mod prompt;
pub mod schema;
pub mod validate;

pub use prompt::PromptSpec;
pub use validate::{ExamplePolicy, parse_record};

/// The only failure text a user ever sees, whatever went wrong
pub const BACKEND_FAILURE_MESSAGE: &str =
    "Could not analyze the word. Please try again or check your spelling.";

/// Word analysis provider interface
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Request a full analysis of `word`.
    ///
    /// Issues exactly one backend request. The word is sent as given, callers
    /// trim it beforehand.
    async fn analyze(&self, word: &str) -> Result<LexiconRecord, AnalysisError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Network, HTTP, payload and schema failures all land here
    #[error("backend failure: {0}")]
    BackendFailure(#[from] BackendCause),

    /// Superseded by a newer search before it resolved
    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Text to show in place of the result
    pub fn user_message(&self) -> &'static str {
        BACKEND_FAILURE_MESSAGE
    }
}

/// Underlying reason for a [`AnalysisError::BackendFailure`], kept for logs
#[derive(Debug, thiserror::Error)]
pub enum BackendCause {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("response carried no payload")]
    EmptyPayload,

    #[error("payload is not valid JSON for the lexicon schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("schema violation: {0}")]
    Schema(String),
}
