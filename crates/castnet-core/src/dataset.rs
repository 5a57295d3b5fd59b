//! Cast dataset: which people competed in which seasons.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Problems found in a dataset. The graph builder never checks these; they
/// are reported by [`Dataset::validate`] and by alias merging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("player '{player}' has no seasons")]
    EmptySeasons { player: String },
    #[error("player '{player}' lists season 0 (seasons are numbered from 1)")]
    ZeroSeason { player: String },
    #[error("alias '{alias}' points to '{target}', which is itself an alias")]
    AliasChain { alias: String, target: String },
}

/// A single competitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Seasons this person competed in.
    pub seasons: BTreeSet<u32>,
    /// Opaque image reference, carried through untouched.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Person {
    pub fn new(seasons: impl IntoIterator<Item = u32>) -> Self {
        Self {
            seasons: seasons.into_iter().collect(),
            image_url: None,
        }
    }

    /// True if both people competed in at least one common season.
    pub fn shares_season_with(&self, other: &Person) -> bool {
        !self.seasons.is_disjoint(&other.seasons)
    }
}

/// The full cast dataset, keyed by canonical player name.
///
/// Matches the `survivor_data.json` layout:
/// `{ "players": { name: { "seasons": [..], "image_url": .. } }, "season_logos": { .. } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub players: BTreeMap<String, Person>,
    /// Season number -> logo reference. Not interpreted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub season_logos: BTreeMap<u32, String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a player with the given seasons.
    pub fn insert(&mut self, name: impl Into<String>, seasons: impl IntoIterator<Item = u32>) {
        self.players.insert(name.into(), Person::new(seasons));
    }

    /// Record one appearance. Creates the player if needed; a non-empty
    /// `image_url` replaces any previous one.
    pub fn add_appearance(&mut self, name: &str, season: u32, image_url: Option<String>) {
        let person = self.players.entry(name.to_string()).or_default();
        person.seasons.insert(season);
        if image_url.is_some() {
            person.image_url = image_url;
        }
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.players.get(name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Every season number that appears in the dataset.
    pub fn seasons(&self) -> BTreeSet<u32> {
        self.players
            .values()
            .flat_map(|p| p.seasons.iter().copied())
            .collect()
    }

    /// Invert membership: season -> names of everyone who played it.
    pub fn season_members(&self) -> BTreeMap<u32, BTreeSet<&str>> {
        let mut members: BTreeMap<u32, BTreeSet<&str>> = BTreeMap::new();
        for (name, person) in &self.players {
            for &season in &person.seasons {
                members.entry(season).or_default().insert(name.as_str());
            }
        }
        members
    }

    /// Players who appeared in more than one season.
    pub fn returning_players(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|(_, p)| p.seasons.len() > 1)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Collect data-hygiene problems. An empty result means the dataset is
    /// well formed.
    pub fn validate(&self) -> Vec<DatasetError> {
        let mut issues = Vec::new();
        for (name, person) in &self.players {
            if person.seasons.is_empty() {
                issues.push(DatasetError::EmptySeasons {
                    player: name.clone(),
                });
            }
            if person.seasons.contains(&0) {
                issues.push(DatasetError::ZeroSeason {
                    player: name.clone(),
                });
            }
        }
        issues
    }

    /// Fold aliased entries into their canonical names.
    ///
    /// `aliases` maps alias -> canonical name. Seasons are unioned; the
    /// canonical entry's image wins, falling back to the alias's. Returns the
    /// number of alias entries merged away.
    pub fn apply_aliases(
        &mut self,
        aliases: &BTreeMap<String, String>,
    ) -> Result<usize, DatasetError> {
        for (alias, target) in aliases {
            if alias != target && aliases.get(target).is_some_and(|t| t != target) {
                return Err(DatasetError::AliasChain {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        let mut merged = 0;
        for (alias, target) in aliases {
            if alias == target {
                continue;
            }
            let Some(aliased) = self.players.remove(alias) else {
                continue;
            };
            let canonical = self.players.entry(target.clone()).or_default();
            canonical.seasons.extend(aliased.seasons);
            if canonical.image_url.is_none() {
                canonical.image_url = aliased.image_url;
            }
            tracing::debug!("merged alias '{}' into '{}'", alias, target);
            merged += 1;
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appearance_accumulates_seasons() {
        let mut ds = Dataset::new();
        ds.add_appearance("Sandra", 7, Some("sandra.jpg".to_string()));
        ds.add_appearance("Sandra", 20, None);
        ds.add_appearance("Sandra", 7, None);

        let sandra = ds.get("Sandra").unwrap();
        assert_eq!(sandra.seasons.iter().copied().collect::<Vec<_>>(), vec![7, 20]);
        assert_eq!(sandra.image_url.as_deref(), Some("sandra.jpg"));
    }

    #[test]
    fn test_season_members_inverts_membership() {
        let mut ds = Dataset::new();
        ds.insert("A", [1]);
        ds.insert("B", [1, 2]);
        ds.insert("C", [2]);

        let members = ds.season_members();
        assert_eq!(members[&1].iter().copied().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(members[&2].iter().copied().collect::<Vec<_>>(), vec!["B", "C"]);
        assert_eq!(ds.returning_players(), vec!["B"]);
    }

    #[test]
    fn test_validate_flags_empty_and_zero_seasons() {
        let mut ds = Dataset::new();
        ds.insert("Empty", Vec::<u32>::new());
        ds.insert("Zero", [0, 3]);
        ds.insert("Fine", [3]);

        let issues = ds.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&DatasetError::EmptySeasons {
            player: "Empty".to_string()
        }));
        assert!(issues.contains(&DatasetError::ZeroSeason {
            player: "Zero".to_string()
        }));
    }

    #[test]
    fn test_apply_aliases_merges_seasons() {
        let mut ds = Dataset::new();
        ds.insert("Rob Mariano", [4, 8]);
        ds.insert("Boston Rob Mariano", [20, 22]);
        ds.players.get_mut("Rob Mariano").unwrap().image_url = Some("rob.jpg".to_string());

        let aliases = BTreeMap::from([(
            "Rob Mariano".to_string(),
            "Boston Rob Mariano".to_string(),
        )]);
        let merged = ds.apply_aliases(&aliases).unwrap();

        assert_eq!(merged, 1);
        assert!(ds.get("Rob Mariano").is_none());
        let rob = ds.get("Boston Rob Mariano").unwrap();
        assert_eq!(rob.seasons.len(), 4);
        assert_eq!(rob.image_url.as_deref(), Some("rob.jpg"));
    }

    #[test]
    fn test_apply_aliases_rejects_chains() {
        let mut ds = Dataset::new();
        ds.insert("A", [1]);
        let aliases = BTreeMap::from([
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string()),
        ]);
        let err = ds.apply_aliases(&aliases).unwrap_err();
        assert!(matches!(err, DatasetError::AliasChain { .. }));
        // Nothing merged on error
        assert!(ds.get("A").is_some());
    }

    #[test]
    fn test_dataset_json_layout() {
        let json = r#"{
            "players": {
                "Parvati Shallow": { "seasons": [13, 16, 20], "image_url": null },
                "Cirie Fields": { "seasons": [12, 16, 20, 34] }
            },
            "season_logos": { "13": "/logos/season_13.png" }
        }"#;
        let ds: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.season_logos.get(&13).map(String::as_str), Some("/logos/season_13.png"));
        assert!(ds.get("Cirie Fields").unwrap().image_url.is_none());
        assert!(
            ds.get("Parvati Shallow")
                .unwrap()
                .shares_season_with(ds.get("Cirie Fields").unwrap())
        );
    }
}
