//! Read/write cast datasets from disk.

use crate::dataset::Dataset;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Serialize a dataset to a pretty-printed JSON string.
pub fn to_json(dataset: &Dataset) -> Result<String> {
    serde_json::to_string_pretty(dataset).context("failed to serialize dataset to JSON")
}

/// Deserialize a dataset from a JSON string.
pub fn from_json(json: &str) -> Result<Dataset> {
    serde_json::from_str(json).context("failed to deserialize dataset from JSON")
}

/// Check if a dataset file exists.
pub fn dataset_exists(path: &Path) -> bool {
    path.is_file()
}

/// Load a dataset from disk.
pub fn load(path: &Path) -> Result<Dataset> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset from {}", path.display()))?;
    let dataset = from_json(&json)?;
    tracing::debug!(
        "loaded {} players from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Load a dataset and fold configured aliases into canonical names.
pub fn load_canonical(path: &Path, aliases: &BTreeMap<String, String>) -> Result<Dataset> {
    let mut dataset = load(path)?;
    let merged = dataset
        .apply_aliases(aliases)
        .with_context(|| format!("invalid alias table for {}", path.display()))?;
    if merged > 0 {
        tracing::info!("merged {} aliased player entries", merged);
    }
    Ok(dataset)
}

/// Save a dataset to disk, creating parent directories if needed.
pub fn save(path: &Path, dataset: &Dataset) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let json = to_json(dataset)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write dataset to {}", path.display()))?;

    Ok(())
}
