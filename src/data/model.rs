use serde::{Deserialize, Serialize};

use super::error::{DataError, Result};

pub const DEFAULT_X_LABEL: &str = "Wavelength (nm)";
pub const DEFAULT_Y_LABEL: &str = "Absorption";
pub const DEFAULT_FILE_TYPE: &str = "xy";

// ---------------------------------------------------------------------------
// Dataset – one spectrum plus its descriptive metadata
// ---------------------------------------------------------------------------

/// A single spectrum: paired x/y values plus labels, name and type tag.
///
/// `x_values` and `y_values` are private so they can only grow in pairs;
/// their lengths are always equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    /// Source filename without path or extension.
    pub name: Option<String>,
    /// Short tag for the serialization format, e.g. `xy`.
    pub file_type: String,
    pub x_label: String,
    pub y_label: String,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            name: None,
            file_type: DEFAULT_FILE_TYPE.to_string(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            x_values: Vec::new(),
            y_values: Vec::new(),
        }
    }
}

impl Dataset {
    /// An empty dataset carrying the given name and type tag.
    pub fn named(name: Option<String>, file_type: impl Into<String>) -> Self {
        Self {
            name,
            file_type: file_type.into(),
            ..Self::default()
        }
    }

    /// Build a dataset from two equally long sequences.
    pub fn from_values(x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Self> {
        if x_values.len() != y_values.len() {
            return Err(DataError::LengthMismatch {
                x: x_values.len(),
                y: y_values.len(),
            });
        }
        Ok(Self {
            x_values,
            y_values,
            ..Self::default()
        })
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    /// Append one (x, y) pair.
    pub fn push(&mut self, x: f64, y: f64) {
        self.x_values.push(x);
        self.y_values.push(y);
    }

    /// Iterate over the (x, y) pairs in file order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_values
            .iter()
            .copied()
            .zip(self.y_values.iter().copied())
    }

    /// Number of data points.
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    /// Whether the dataset holds no points.
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    /// Replace the four metadata fields, leaving the values untouched.
    pub fn apply(mut self, edit: MetadataEdit) -> Self {
        self.name = Some(edit.name).filter(|n| !n.is_empty());
        self.file_type = edit.file_type;
        self.x_label = edit.x_label;
        self.y_label = edit.y_label;
        self
    }
}

/// Replace `name`, `file_type`, `x_label` and `y_label` on `dataset`.
///
/// An empty `name` clears it.
pub fn edit_metadata(
    dataset: Dataset,
    name: &str,
    file_type: &str,
    x_label: &str,
    y_label: &str,
) -> Dataset {
    dataset.apply(MetadataEdit {
        name: name.to_string(),
        file_type: file_type.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
    })
}

// ---------------------------------------------------------------------------
// MetadataEdit – the editable fields, as a form would hold them
// ---------------------------------------------------------------------------

/// New values for the editable metadata fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataEdit {
    pub name: String,
    pub file_type: String,
    pub x_label: String,
    pub y_label: String,
}

impl MetadataEdit {
    /// Pre-fill with the current values of `dataset`.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            name: dataset.name.clone().unwrap_or_default(),
            file_type: dataset.file_type.clone(),
            x_label: dataset.x_label.clone(),
            y_label: dataset.y_label.clone(),
        }
    }
}

// -- Deserialization goes through an unchecked mirror so lengths get validated --

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_file_type")]
    file_type: String,
    #[serde(default = "default_x_label")]
    x_label: String,
    #[serde(default = "default_y_label")]
    y_label: String,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
}

fn default_file_type() -> String {
    DEFAULT_FILE_TYPE.to_string()
}

fn default_x_label() -> String {
    DEFAULT_X_LABEL.to_string()
}

fn default_y_label() -> String {
    DEFAULT_Y_LABEL.to_string()
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DataError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        let mut dataset = Dataset::from_values(raw.x_values, raw.y_values)?;
        dataset.name = raw.name;
        dataset.file_type = raw.file_type;
        dataset.x_label = raw.x_label;
        dataset.y_label = raw.y_label;
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut ds = Dataset::named(Some("benzene".into()), "xy");
        ds.push(250.0, 0.12);
        ds.push(255.0, 0.31);
        ds
    }

    #[test]
    fn test_default_fields() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.name, None);
        assert_eq!(ds.file_type, "xy");
        assert_eq!(ds.x_label, "Wavelength (nm)");
        assert_eq!(ds.y_label, "Absorption");
    }

    #[test]
    fn test_instances_do_not_share_values() {
        let mut a = Dataset::default();
        a.push(1.0, 2.0);
        let b = Dataset::default();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn test_from_values_rejects_length_mismatch() {
        let err = Dataset::from_values(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { x: 2, y: 1 }));
    }

    #[test]
    fn test_edit_metadata_keeps_values() {
        let ds = sample();
        let edited = edit_metadata(ds.clone(), "toluene", "csv", "Wavenumber", "Transmittance");
        assert_eq!(edited.name.as_deref(), Some("toluene"));
        assert_eq!(edited.file_type, "csv");
        assert_eq!(edited.x_label, "Wavenumber");
        assert_eq!(edited.y_label, "Transmittance");
        assert_eq!(edited.x_values(), ds.x_values());
        assert_eq!(edited.y_values(), ds.y_values());
    }

    #[test]
    fn test_empty_name_clears_name() {
        let edited = edit_metadata(sample(), "", "xy", "x", "y");
        assert_eq!(edited.name, None);
    }

    #[test]
    fn test_edit_prefill_roundtrips() {
        let ds = sample();
        let edit = MetadataEdit::from_dataset(&ds);
        assert_eq!(ds.clone().apply(edit), ds);
    }

    #[test]
    fn test_deserialize_checks_lengths() {
        let ok: Dataset =
            serde_json::from_str(r#"{"x_values":[1.0],"y_values":[2.0]}"#).unwrap();
        assert_eq!(ok.x_label, DEFAULT_X_LABEL);
        assert_eq!(ok.points().collect::<Vec<_>>(), vec![(1.0, 2.0)]);

        let bad = serde_json::from_str::<Dataset>(r#"{"x_values":[1.0],"y_values":[]}"#);
        assert!(bad.is_err());
    }
}
