use std::path::{Path, PathBuf};

use crate::data::model::{Dataset, MetadataEdit};
use crate::data::parser::ParseReport;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The full session state, independent of any front end.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current dataset; empty until a file is opened.
    pub dataset: Dataset,

    /// Directory of the last opened or saved file. `save` writes here.
    pub directory: Option<PathBuf>,

    /// Status / error message for the front end to show.
    pub status_message: Option<String>,
}

impl AppState {
    /// Replace the current dataset with a newly loaded one.
    pub fn set_dataset(&mut self, report: ParseReport, source: &Path) {
        self.status_message = Some(match report.aborted_at {
            Some(line) => format!(
                "Load of {} aborted at line {line}, no data kept",
                source.display()
            ),
            None if report.skipped > 0 => format!(
                "{} points loaded from {}, {} malformed rows skipped",
                report.dataset.len(),
                source.display(),
                report.skipped
            ),
            None => format!(
                "{} points loaded from {}",
                report.dataset.len(),
                source.display()
            ),
        });
        self.dataset = report.dataset;
        self.remember_directory(source);
    }

    /// Remember the directory of `path` for later saves.
    pub fn remember_directory(&mut self, path: &Path) {
        self.directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
    }

    /// Apply a metadata edit to the current dataset.
    pub fn edit(&mut self, edit: MetadataEdit) {
        let dataset = std::mem::take(&mut self.dataset);
        self.dataset = dataset.apply(edit);
    }

    /// Path `save` writes to: `<directory>/<name>.<type>`, if the dataset is
    /// named.
    pub fn save_path(&self) -> Option<PathBuf> {
        let name = self.dataset.name.as_ref()?;
        let file_name = format!("{name}.{}", self.dataset.file_type);
        Some(match &self.directory {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        })
    }
}
