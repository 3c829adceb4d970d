use std::collections::{HashSet, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use lexicon_types::NotebookEntry;

/// Session-local saved words, newest first.
///
/// Keyed by lowercased word; entries keep the casing they were saved with.
/// Order comes from insertion only, never from timestamps.
#[derive(Debug, Default)]
pub struct Notebook {
    entries: VecDeque<NotebookEntry>,
    keys: HashSet<String>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `word` with the current time. Returns false if already saved.
    pub fn add(&mut self, word: &str) -> bool {
        self.add_at(word, now_millis())
    }

    /// Save `word` with an explicit timestamp
    pub fn add_at(&mut self, word: &str, timestamp: u64) -> bool {
        if !self.keys.insert(word.to_lowercase()) {
            return false;
        }

        self.entries.push_front(NotebookEntry {
            word: word.to_string(),
            timestamp,
        });
        true
    }

    pub fn list(&self) -> Vec<NotebookEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotebookEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.keys.contains(&word.to_lowercase())
    }

    /// Stored spelling of `word`, for re-submitting a search
    pub fn select_for_search(&self, word: &str) -> Option<&str> {
        let key = word.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.word.to_lowercase() == key)
            .map(|entry| entry.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
