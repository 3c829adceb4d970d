use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_explanation_language() -> String {
    "Chinese (Simplified)".to_string()
}

fn default_example_count() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_strict_examples() -> bool {
    false
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Never read from or written to config files, only from the environment
    #[serde(skip)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Language of the explanatory prose; IPA and quotes stay English
    #[serde(default = "default_explanation_language")]
    pub explanation_language: String,
    #[serde(default = "default_example_count")]
    pub example_count: usize,
    /// 0 disables the timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Reject records whose example count differs from `example_count`
    #[serde(default = "default_strict_examples")]
    pub strict_examples: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            explanation_language: default_explanation_language(),
            example_count: default_example_count(),
            request_timeout_secs: default_request_timeout_secs(),
            strict_examples: default_strict_examples(),
        }
    }
}

// api_key is kept out of Debug output so it never lands in logs
impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("explanation_language", &self.explanation_language)
            .field("example_count", &self.example_count)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("strict_examples", &self.strict_examples)
            .finish_non_exhaustive()
    }
}
