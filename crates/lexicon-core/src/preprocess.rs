pub trait Preprocessor {
    /// Default input cleanup: trim, drop line breaks. Characters are never
    /// rewritten, the search term reaches the backend as typed.
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        text.replace(['\n', '\r'], " ").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
