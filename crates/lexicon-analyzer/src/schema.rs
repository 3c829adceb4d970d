use serde_json::{Value, json};

/// Structured-output schema sent to the backend.
///
/// Field names and nesting mirror [`lexicon_types::LexiconRecord`]; every
/// property is required.
pub fn lexicon_schema(explanation_language: &str) -> Value {
    let string = |description: String| json!({ "type": "STRING", "description": description });

    json!({
        "type": "OBJECT",
        "properties": {
            "word": string("The word being analyzed".to_string()),
            "phonetics": {
                "type": "OBJECT",
                "properties": {
                    "ipa": string("International Phonetic Alphabet transcription".to_string()),
                    "syllables": string("Syllable breakdown (e.g., am-BIG-yu-us)".to_string()),
                    "tip": string(format!("Pronunciation tip in {explanation_language} (sounds like/rhymes with)")),
                },
                "required": ["ipa", "syllables", "tip"],
            },
            "etymology": {
                "type": "OBJECT",
                "properties": {
                    "rootAnalysis": string("Prefix + Root + Suffix breakdown".to_string()),
                    "backstory": string(format!("The engaging origin story in {explanation_language}.")),
                },
                "required": ["rootAnalysis", "backstory"],
            },
            "cognates": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "word": { "type": "STRING" },
                        "connection": string(format!("Brief explanation of connection in {explanation_language}")),
                    },
                    "required": ["word", "connection"],
                },
            },
            "nuance": {
                "type": "OBJECT",
                "properties": {
                    "synonyms": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "word": { "type": "STRING" },
                                "context": string(format!("Usage context in {explanation_language}")),
                            },
                            "required": ["word", "context"],
                        },
                    },
                    "antonym": { "type": "STRING" },
                    "examples": {
                        "type": "ARRAY",
                        "items": string("Quotes from literature, speeches, movies".to_string()),
                    },
                },
                "required": ["synonyms", "antonym", "examples"],
            },
        },
        "required": ["word", "phonetics", "etymology", "cognates", "nuance"],
    })
}
