use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Format – the closed set of serializations a dataset can be written in
// ---------------------------------------------------------------------------

/// On-disk representation of a [`Dataset`](super::model::Dataset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `#` comments, then tab-separated `x\ty` lines.
    #[default]
    Xy,
    /// `#` comments, then comma-separated `x,y` records.
    Csv,
    /// The whole dataset, metadata included, as a JSON document.
    Json,
}

impl Format {
    /// The type tag (and file extension) for this format.
    pub fn tag(self) -> &'static str {
        match self {
            Format::Xy => "xy",
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }

    /// Look up a format by its tag, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Format> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "xy" => Some(Format::Xy),
            "csv" => Some(Format::Csv),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Resolve a free-form type tag. Tags no writer exists for get `Xy`,
    /// the same reader the loader picks for unknown extensions.
    pub fn resolve(tag: &str) -> Format {
        Format::from_tag(tag).unwrap_or_else(|| {
            log::warn!("No writer for type {tag:?}, using xy");
            Format::Xy
        })
    }

    /// Format implied by a path's extension, if any.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Format::from_tag)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_tag(s).ok_or_else(|| format!("unknown format: {s}"))
    }
}
