use std::fmt::Write;

use chrono::{Local, TimeZone};
use lexicon_config::ui::UiConfig;
use lexicon_types::{LexiconRecord, NotebookEntry, SessionState, SessionView};

const RULE: &str = "────────────────────────────────────────────────────────";

/// Whole screen for one session snapshot
pub fn render_view(view: &SessionView, ui: &UiConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LexiconMaster · Notebook ({})", view.notebook.len());

    match &view.state {
        SessionState::Idle => {
            if ui.show_hints {
                out.push_str(&render_hints(ui));
            }
        }
        SessionState::Loading { query } => {
            let _ = writeln!(out, "Analyzing \"{query}\" ...");
        }
        SessionState::Error(message) => {
            let _ = writeln!(out, "! {message}");
        }
        SessionState::Success(record) => {
            out.push_str(&render_record(record, view.is_saved));
        }
    }

    if view.notebook_open {
        out.push_str(&render_notebook(&view.notebook));
    }

    out
}

pub fn render_hints(ui: &UiConfig) -> String {
    let mut parts: Vec<String> = ui.suggestions.clone();
    parts.push("Type /list to see notebook".to_string());
    format!("Try: {}\n", parts.join(" • "))
}

pub fn render_record(record: &LexiconRecord, is_saved: bool) -> String {
    let mut out = String::new();
    let saved = if is_saved {
        "[Saved]"
    } else {
        "[/save to notebook]"
    };

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}  {}", record.word, saved);
    let _ = writeln!(
        out,
        "{} · {}",
        record.phonetics.ipa,
        record.phonetics.syllables.to_uppercase()
    );
    let _ = writeln!(out, "Tip: {}", record.phonetics.tip);

    let _ = writeln!(out, "\nThe Origin Story");
    let _ = writeln!(out, "  {}", record.etymology.root_analysis);
    let _ = writeln!(out, "  {}", record.etymology.backstory);

    if !record.cognates.is_empty() {
        let _ = writeln!(out, "\nWord Family");
        for cognate in &record.cognates {
            let _ = writeln!(out, "  • {}: {}", cognate.word, cognate.connection);
        }
    }

    let _ = writeln!(out, "\nNuance");
    for synonym in &record.nuance.synonyms {
        let _ = writeln!(out, "  ≈ {}: {}", synonym.word, synonym.context);
    }
    let _ = writeln!(out, "  ≠ {}", record.nuance.antonym);

    let _ = writeln!(out, "\nIn the Wild");
    for (i, example) in record.nuance.examples.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, example);
    }
    let _ = writeln!(out, "{RULE}");

    out
}

pub fn render_notebook(entries: &[NotebookEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\nVocabulary Notebook");

    if entries.is_empty() {
        let _ = writeln!(out, "  No words saved yet.");
        let _ = writeln!(out, "  Use /add or /save on a result.");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>2}. {:<24} {}",
                i + 1,
                entry.word,
                format_time(entry.timestamp)
            );
        }
        let _ = writeln!(out, "  /open <n> to look a word up again, /close to hide");
    }

    let _ = writeln!(out, "  {} words collected\n{RULE}", entries.len());
    out
}

/// Local wall-clock time of an epoch-millisecond timestamp
fn format_time(timestamp: u64) -> String {
    Local
        .timestamp_millis_opt(timestamp as i64)
        .single()
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
