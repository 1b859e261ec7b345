use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::parser::ErrorPolicy;

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "SPECVIEW_CONFIG";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User-tunable behaviour. Every field has a default, so a settings file
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Program name written into file header comments.
    pub program_name: String,
    /// What to do with malformed rows when nobody is asked.
    pub on_error: ErrorPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            program_name: env!("CARGO_PKG_NAME").to_string(),
            on_error: ErrorPolicy::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing settings {}", path.display()))
    }

    /// Settings from `explicit`, else from `$SPECVIEW_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                log::debug!("Using settings from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::debug!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}
