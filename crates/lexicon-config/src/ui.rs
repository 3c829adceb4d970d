use serde::{Deserialize, Serialize};

fn default_show_hints() -> bool {
    true
}

fn default_suggestions() -> Vec<String> {
    vec!["Serendipity".to_string(), "Nostalgia".to_string()]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Show starter suggestions while nothing has been searched
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_hints: default_show_hints(),
            suggestions: default_suggestions(),
        }
    }
}
