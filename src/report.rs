// src/report.rs
use std::collections::HashMap;

/// Frequency table that remembers the order keys were first seen.
///
/// `most_common` sorts by count descending; equal counts keep first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, n: usize) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), n));
            }
        }
    }

    pub fn incr(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Fold `other` into `self`, visiting its keys in their first-seen order.
    pub fn merge(&mut self, other: &Tally) {
        for (key, n) in &other.entries {
            self.add(key, *n);
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        // stable sort keeps insertion order for ties
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

/// Render `[("year", 3), ("date", 1)]` as `year:3, date:1`.
pub fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `part / whole` as a percentage, 0.0 for an empty whole.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
