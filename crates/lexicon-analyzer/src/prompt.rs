/// Knobs of the tutor instruction sent with every request
#[derive(Debug, Clone)]
pub struct PromptSpec {
    /// Language for explanations; IPA and quotations always stay English
    pub explanation_language: String,
    pub example_count: usize,
}

impl Default for PromptSpec {
    fn default() -> Self {
        Self {
            explanation_language: "Chinese (Simplified)".to_string(),
            example_count: 5,
        }
    }
}

impl PromptSpec {
    /// Build the full instruction for `word`
    pub fn render(&self, word: &str) -> String {
        let language = &self.explanation_language;
        let count = self.example_count;

        format!(
            "Role: You are LexiconMaster, an engaging English tutor specializing in etymology and phonetics.\n\
             Task: Analyze the English word: \"{word}\".\n\
             \n\
             Requirements:\n\
             1. Tone: Enthusiastic, storytelling, yet academic.\n\
             2. Language: Explanations MUST be in {language}. Examples and IPA must be in English.\n\
             3. Phonetics: Provide standard IPA, a syllable breakdown and a helpful pronunciation tip in {language}.\n\
             4. Etymology: Break the word into prefix + root + suffix, then tell a mini-story about its journey from ancient roots to modern meaning.\n\
             5. Examples: Provide exactly {count} distinct quotes from literature, famous speeches, or popular movies/TV shows.\n\
             \n\
             Return the result strictly as JSON matching the provided schema."
        )
    }
}
