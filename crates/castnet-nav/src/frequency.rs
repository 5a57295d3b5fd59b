//! Endpoint and interior frequency tables over a set of maximal paths.

use crate::diameter::MaximalPath;
use serde::Serialize;
use std::collections::HashMap;

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub id: String,
    pub count: usize,
}

/// Player -> count, ordered by descending count. Equal counts keep the order
/// in which players were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Tally occurrences, then sort by descending count.
    pub fn tally<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for id in ids {
            match index.get(id) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(id, counts.len());
                    counts.push((id, 1));
                }
            }
        }
        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            entries: counts
                .into_iter()
                .map(|(id, count)| FrequencyEntry {
                    id: id.to_string(),
                    count,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn top(&self, n: usize) -> &[FrequencyEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Count for a player, if present.
    pub fn get(&self, id: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }
}

/// Count how often each player is the start or end of a maximal path.
pub fn endpoint_frequencies(paths: &[MaximalPath]) -> FrequencyTable {
    FrequencyTable::tally(
        paths
            .iter()
            .flat_map(|m| [m.start.as_str(), m.end.as_str()]),
    )
}

/// Count how often each player sits strictly inside a maximal path.
/// Paths with fewer than 3 nodes contribute nothing.
pub fn interior_frequencies(paths: &[MaximalPath]) -> FrequencyTable {
    FrequencyTable::tally(
        paths
            .iter()
            .flat_map(|m| m.path.interior().iter().map(String::as_str)),
    )
}

/// `count / total` as a percentage, 0.0 when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
