// =============================================================================
// Engine Configuration — settings for the command-line runner
// =============================================================================
//
// Selects the parameter set and the bar file the binary reads.  Persistence
// uses an atomic tmp + rename write.  All fields carry `#[serde(default)]` so
// a partial or older config file still loads.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "engine_config.json";

pub const ENV_PARAMETER_SET: &str = "TA_PARAMETER_SET";
pub const ENV_INPUT_PATH: &str = "TA_INPUT_PATH";

fn default_parameter_set() -> String {
    "default".to_string()
}

fn default_input_path() -> PathBuf {
    PathBuf::from("bars.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name passed to `compute_indicators`; unknown names fall back to `default`.
    #[serde(default = "default_parameter_set")]
    pub parameter_set: String,

    /// JSON file holding an array of bars.
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Print only the latest-row signal snapshot instead of the whole frame.
    #[serde(default)]
    pub latest_only: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parameter_set: default_parameter_set(),
            input_path: default_input_path(),
            latest_only: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults
    /// with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            parameter_set = %config.parameter_set,
            input = %config.input_path.display(),
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist to `path` by writing a `.tmp` sibling and renaming it over.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }

    /// Apply `TA_PARAMETER_SET` / `TA_INPUT_PATH` overrides from `lookup`.
    ///
    /// Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(name) = non_blank(ENV_PARAMETER_SET) {
            self.parameter_set = name;
        }
        if let Some(path) = non_blank(ENV_INPUT_PATH) {
            self.input_path = PathBuf::from(path);
        }
    }
}
