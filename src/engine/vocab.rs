use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    pub hindi: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub meaning: String,
}

/// Merge a freshly fetched batch into the running history. Newest batch goes
/// in front; duplicates are dropped by case-insensitive word match, with the
/// newer entry winning.
pub fn merge_history(new_words: &[VocabEntry], history: &[VocabEntry]) -> Vec<VocabEntry> {
    let mut merged: Vec<VocabEntry> = Vec::with_capacity(new_words.len() + history.len());
    for entry in new_words.iter().chain(history.iter()) {
        let word = entry.word.to_lowercase();
        if !merged.iter().any(|e| e.word.to_lowercase() == word) {
            merged.push(entry.clone());
        }
    }
    merged
}
