//! Player lookup by name.
//!
//! Case-insensitive substring matches come first. When nothing matches, a
//! fuzzy pass ranks names by normalized Levenshtein similarity, comparing the
//! query against both the full name and each of its words.

use castnet_core::dataset::Dataset;
use serde::Serialize;

/// Minimum similarity for a fuzzy match.
const FUZZY_THRESHOLD: f64 = 0.6;

/// A player matching a search query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub seasons: Vec<u32>,
    /// 1.0 for substring matches, similarity in [0, 1] for fuzzy ones.
    pub score: f64,
    pub fuzzy: bool,
}

/// Search players by name, returning at most `limit` hits.
pub fn search_players(dataset: &Dataset, query: &str, limit: usize) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let exact: Vec<SearchHit> = dataset
        .players
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&query))
        .take(limit)
        .map(|(name, person)| SearchHit {
            name: name.clone(),
            seasons: person.seasons.iter().copied().collect(),
            score: 1.0,
            fuzzy: false,
        })
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    let mut fuzzy: Vec<SearchHit> = dataset
        .players
        .iter()
        .filter_map(|(name, person)| {
            let score = name_similarity(&query, &name.to_lowercase());
            (score >= FUZZY_THRESHOLD).then(|| SearchHit {
                name: name.clone(),
                seasons: person.seasons.iter().copied().collect(),
                score,
                fuzzy: true,
            })
        })
        .collect();
    fuzzy.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    fuzzy.truncate(limit);
    fuzzy
}

/// Best similarity of `query` against the whole name or any single word of it.
fn name_similarity(query: &str, name: &str) -> f64 {
    let whole = strsim::normalized_levenshtein(query, name);
    name.split_whitespace()
        .map(|word| strsim::normalized_levenshtein(query, word))
        .fold(whole, f64::max)
}

/// Resolve a user-typed name to a dataset key: exact match, then a unique
/// case-insensitive match, then a unique search hit.
pub fn resolve_player<'a>(dataset: &'a Dataset, query: &str) -> Option<&'a str> {
    if let Some((name, _)) = dataset.players.get_key_value(query) {
        return Some(name.as_str());
    }
    let lowered = query.trim().to_lowercase();
    let mut case_insensitive = dataset
        .players
        .keys()
        .filter(|name| name.to_lowercase() == lowered);
    if let (Some(name), None) = (case_insensitive.next(), case_insensitive.next()) {
        return Some(name.as_str());
    }
    let hits = search_players(dataset, query, 2);
    if hits.len() == 1 {
        return dataset
            .players
            .get_key_value(hits[0].name.as_str())
            .map(|(name, _)| name.as_str());
    }
    None
}
