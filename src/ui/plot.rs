use serde::Serialize;

use crate::data::model::Dataset;

/// Title shown when the dataset has no name.
pub const NO_DATA_TITLE: &str = "No Data";

// ---------------------------------------------------------------------------
// Plot projection
// ---------------------------------------------------------------------------

/// Everything a plotting backend needs to draw one spectrum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
}

impl PlotView {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            title: dataset
                .name
                .clone()
                .unwrap_or_else(|| NO_DATA_TITLE.to_string()),
            x_label: dataset.x_label.clone(),
            y_label: dataset.y_label.clone(),
            points: dataset.points().map(|(x, y)| [x, y]).collect(),
        }
    }
}
