use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One (word, document) pairing. `frequency` is a raw occurrence count until the
/// term-frequency pass rewrites it as `occurrences / total_tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub filename: String,
    pub frequency: f64,
}

/// Documents containing one word, strictly ascending by filename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocList {
    entries: Vec<DocumentEntry>,
}

impl DocList {
    pub fn new() -> Self { Self::default() }

    pub fn singleton(filename: &str) -> Self {
        Self { entries: vec![DocumentEntry { filename: filename.to_string(), frequency: 1.0 }] }
    }

    /// Bump the count for `filename`, or splice in a new entry with count 1 at its sorted position.
    pub fn insert_or_bump(&mut self, filename: &str) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            match filename.cmp(entry.filename.as_str()) {
                Ordering::Equal => {
                    entry.frequency += 1.0;
                    return;
                }
                Ordering::Less => {
                    self.entries.insert(i, DocumentEntry { filename: filename.to_string(), frequency: 1.0 });
                    return;
                }
                Ordering::Greater => {}
            }
        }
        self.entries.push(DocumentEntry { filename: filename.to_string(), frequency: 1.0 });
    }

    pub fn get(&self, filename: &str) -> Option<&DocumentEntry> {
        self.entries
            .binary_search_by(|e| e.filename.as_str().cmp(filename))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Number of documents containing the word (its document frequency).
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentEntry> { self.entries.iter() }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, DocumentEntry> { self.entries.iter_mut() }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.filename.as_str())
    }
}

impl<'a> IntoIterator for &'a DocList {
    type Item = &'a DocumentEntry;
    type IntoIter = std::slice::Iter<'a, DocumentEntry>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}
