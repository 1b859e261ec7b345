use std::fmt;

use crate::data::model::Dataset;

/// Summary of a dataset's metadata, as shown next to the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub name: Option<String>,
    pub file_type: String,
    pub points: usize,
    pub x_label: String,
    pub y_label: String,
}

impl DatasetInfo {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            name: dataset.name.clone(),
            file_type: dataset.file_type.clone(),
            points: dataset.len(),
            x_label: dataset.x_label.clone(),
            y_label: dataset.y_label.clone(),
        }
    }
}

impl fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Filename : {}", self.name.as_deref().unwrap_or(""))?;
        writeln!(f, "  Filetype : {}", self.file_type)?;
        writeln!(f, "Datapoints : {}", self.points)?;
        writeln!(f, "   X label : {}", self.x_label)?;
        write!(f, "   Y label : {}", self.y_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut ds = Dataset::named(Some("water".into()), "xy");
        ds.push(1.0, 2.0);
        let text = DatasetInfo::from_dataset(&ds).to_string();
        assert_eq!(
            text,
            "  Filename : water\n  Filetype : xy\nDatapoints : 1\n   X label : Wavelength (nm)\n   Y label : Absorption"
        );
    }
}
