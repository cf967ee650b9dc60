use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub filename: String,
    pub score: f64,
}

impl ScoreResult {
    pub fn new(filename: impl Into<String>, score: f64) -> Self {
        Self { filename: filename.into(), score }
    }

    /// Whether `self` must be placed ahead of `other`: higher score first, then smaller filename.
    fn ranks_before(&self, other: &ScoreResult) -> bool {
        self.score > other.score || (self.score == other.score && self.filename < other.filename)
    }
}

/// Query results, strictly descending by score with ties broken by ascending filename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreList {
    results: Vec<ScoreResult>,
}

impl ScoreList {
    pub fn new() -> Self { Self::default() }

    /// Place `result` ahead of the first entry it outranks, or at the tail.
    pub fn insert_ranked(&mut self, result: ScoreResult) {
        let pos = self
            .results
            .iter()
            .position(|cur| result.ranks_before(cur))
            .unwrap_or(self.results.len());
        self.results.insert(pos, result);
    }

    /// Rank an arbitrary sequence of results by repeated `insert_ranked`.
    pub fn merge_sorted<I: IntoIterator<Item = ScoreResult>>(items: I) -> Self {
        let mut list = Self::new();
        for item in items {
            list.insert_ranked(item);
        }
        list
    }

    pub fn len(&self) -> usize { self.results.len() }

    pub fn is_empty(&self) -> bool { self.results.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreResult> { self.results.iter() }

    pub fn as_slice(&self) -> &[ScoreResult] { &self.results }

    pub fn truncate(&mut self, len: usize) { self.results.truncate(len) }

    pub fn into_vec(self) -> Vec<ScoreResult> { self.results }
}

impl IntoIterator for ScoreList {
    type Item = ScoreResult;
    type IntoIter = std::vec::IntoIter<ScoreResult>;

    fn into_iter(self) -> Self::IntoIter { self.results.into_iter() }
}

impl<'a> IntoIterator for &'a ScoreList {
    type Item = &'a ScoreResult;
    type IntoIter = std::slice::Iter<'a, ScoreResult>;

    fn into_iter(self) -> Self::IntoIter { self.results.iter() }
}

impl FromIterator<ScoreResult> for ScoreList {
    fn from_iter<I: IntoIterator<Item = ScoreResult>>(iter: I) -> Self { Self::merge_sorted(iter) }
}
