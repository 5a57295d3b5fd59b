//! Configuration for dataset loading, analysis, and reporting.
//!
//! Load order: `.castnet/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level castnet configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CastnetConfig {
    pub dataset: DatasetConfig,
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
}

/// Where the dataset lives and how names are canonicalized on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset file. Relative paths resolve against the project root.
    pub path: PathBuf,
    /// Alias -> canonical name, merged before the graph is built.
    ///
    /// Example:
    /// [dataset.aliases]
    /// "Rob Mariano" = "Boston Rob Mariano"
    pub aliases: BTreeMap<String, String>,
}

/// How the all-pairs sweep is run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub strategy: Strategy,
    /// Spread the sweep across the rayon thread pool.
    pub parallel: bool,
}

/// Report presentation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Endpoint players listed in the text report.
    pub top_endpoints: usize,
    /// Interior players listed in the text report.
    pub top_interior: usize,
    /// Maximum player search results.
    pub search_limit: usize,
}

/// All-pairs shortest path strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One BFS per unordered pair.
    Pairwise,
    /// One BFS per node, reused for every pair starting there.
    #[default]
    SingleSource,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Pairwise => "pairwise",
            Strategy::SingleSource => "single-source",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pairwise" | "pairs" => Ok(Strategy::Pairwise),
            "single-source" | "single_source" | "bfs" => Ok(Strategy::SingleSource),
            other => anyhow::bail!(
                "unknown strategy: {}. Use 'pairwise' or 'single-source'.",
                other
            ),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("survivor_data.json"),
            aliases: BTreeMap::new(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::SingleSource,
            parallel: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_endpoints: 10,
            top_interior: 5,
            search_limit: 5,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: FromStr>(var: &str, target: &mut T) {
    apply_override(std::env::var(var).ok(), target);
}

/// Overwrite `target` when `value` is present and parses; otherwise leave it.
fn apply_override<T: FromStr>(value: Option<String>, target: &mut T) {
    if let Some(v) = value
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl CastnetConfig {
    /// Path of the config file for a project root.
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(".castnet").join("config.toml")
    }

    /// Load config from `.castnet/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = Self::config_path(project_root);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Environment variable overrides
        env_override("CASTNET_DATA", &mut config.dataset.path);
        env_override("CASTNET_STRATEGY", &mut config.analysis.strategy);
        env_override("CASTNET_PARALLEL", &mut config.analysis.parallel);
        env_override("CASTNET_TOP_ENDPOINTS", &mut config.report.top_endpoints);
        env_override("CASTNET_TOP_INTERIOR", &mut config.report.top_interior);
        env_override("CASTNET_SEARCH_LIMIT", &mut config.report.search_limit);

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.report.top_endpoints == 0 || self.report.top_interior == 0 {
            anyhow::bail!(
                "report.top_endpoints ({}) and report.top_interior ({}) must be at least 1",
                self.report.top_endpoints,
                self.report.top_interior,
            );
        }
        if self.report.search_limit == 0 {
            anyhow::bail!("report.search_limit must be at least 1");
        }
        Ok(())
    }

    /// Dataset path resolved against the project root.
    pub fn dataset_path(&self, project_root: &Path) -> PathBuf {
        if self.dataset.path.is_absolute() {
            self.dataset.path.clone()
        } else {
            project_root.join(&self.dataset.path)
        }
    }
}
