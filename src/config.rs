//! Tunable settings for repair and self-union.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level settings, loadable from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repair: RepairConfig,
    pub union: UnionConfig,
}

/// Settings for `fix_geo_problems`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Maximum buffer-by-zero passes before giving up.
    pub max_iterations: usize,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self { max_iterations: 5 }
    }
}

/// Settings for the overlay behind `GeoEngine::union_self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnionConfig {
    /// Prefix of membership-matrix column names, e.g. `ID.` for `ID.7`.
    pub id_prefix: String,
    /// Overlay pieces with area at or below this are dropped as slivers.
    pub min_area: f64,
}

impl Default for UnionConfig {
    fn default() -> Self {
        Self { id_prefix: "ID.".to_string(), min_area: 0.0 }
    }
}

impl Config {
    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("[config] Failed to parse settings JSON")
    }

    /// Read settings from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read settings file: {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("[config] Invalid settings in {}", path.display()))
    }
}
