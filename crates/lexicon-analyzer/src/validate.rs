use lexicon_types::LexiconRecord;

use crate::BackendCause;

/// How the example count requested in the prompt is treated on the way back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamplePolicy {
    /// Any number of examples is accepted, the count is only a prompt request
    Lenient,
    /// Exactly this many examples or the record is rejected
    Exactly(usize),
}

/// Parse backend text into a complete record.
///
/// Checks JSON parseability, structural shape, and that no string field is
/// blank. Content (IPA accuracy, quote authenticity) is not judged.
pub fn parse_record(text: &str, policy: ExamplePolicy) -> Result<LexiconRecord, BackendCause> {
    if text.trim().is_empty() {
        return Err(BackendCause::EmptyPayload);
    }

    let record: LexiconRecord = serde_json::from_str(text)?;

    if let Some(field) = first_blank_field(&record) {
        return Err(BackendCause::Schema(format!("field `{field}` is empty")));
    }

    if let ExamplePolicy::Exactly(expected) = policy {
        let got = record.nuance.examples.len();
        if got != expected {
            return Err(BackendCause::Schema(format!(
                "expected {expected} examples, got {got}"
            )));
        }
    }

    Ok(record)
}

fn first_blank_field(record: &LexiconRecord) -> Option<String> {
    fn blank(s: &str) -> bool {
        s.trim().is_empty()
    }

    let scalars = [
        ("word", &record.word),
        ("phonetics.ipa", &record.phonetics.ipa),
        ("phonetics.syllables", &record.phonetics.syllables),
        ("phonetics.tip", &record.phonetics.tip),
        ("etymology.rootAnalysis", &record.etymology.root_analysis),
        ("etymology.backstory", &record.etymology.backstory),
        ("nuance.antonym", &record.nuance.antonym),
    ];
    if let Some((name, _)) = scalars.iter().find(|(_, value)| blank(value.as_str())) {
        return Some(name.to_string());
    }

    for (i, cognate) in record.cognates.iter().enumerate() {
        if blank(&cognate.word) || blank(&cognate.connection) {
            return Some(format!("cognates[{i}]"));
        }
    }
    for (i, synonym) in record.nuance.synonyms.iter().enumerate() {
        if blank(&synonym.word) || blank(&synonym.context) {
            return Some(format!("nuance.synonyms[{i}]"));
        }
    }
    record
        .nuance
        .examples
        .iter()
        .position(|example| blank(example.as_str()))
        .map(|i| format!("nuance.examples[{i}]"))
}
