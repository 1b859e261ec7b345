use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::data::format::Format;
use crate::data::loader::{self, name_and_type};
use crate::data::model::MetadataEdit;
use crate::data::parser::RowErrorHandler;
use crate::data::writer;
use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::info::DatasetInfo;
use crate::ui::plot::PlotView;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("dataset has no name, use save-as")]
    NoName,
}

// ---------------------------------------------------------------------------
// Viewer session: open / save / save-as / edit / plot
// ---------------------------------------------------------------------------

pub struct SpecViewerApp {
    pub settings: Settings,
    pub state: AppState,
}

impl Default for SpecViewerApp {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SpecViewerApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: AppState::default(),
        }
    }

    /// Open `path` using the configured error policy.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let mut policy = self.settings.on_error;
        self.open_with(path, &mut policy)
    }

    /// Open `path`, asking `handler` about malformed rows.
    ///
    /// On failure the current dataset is kept and the error becomes the
    /// status message.
    pub fn open_with<H>(&mut self, path: &Path, handler: &mut H) -> Result<()>
    where
        H: RowErrorHandler + ?Sized,
    {
        match loader::load_report(path, handler) {
            Ok(report) => {
                self.state.set_dataset(report, path);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    /// Write the dataset back to `<directory>/<name>.<type>`.
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self.state.save_path().ok_or(SaveError::NoName)?;
        let format = Format::resolve(&self.state.dataset.file_type);
        self.write_to(&path, format)?;
        Ok(path)
    }

    /// Write the dataset to `path` in the format its extension names, then
    /// take name and type from `path`.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        let (name, file_type) = name_and_type(path);
        let format = Format::resolve(&file_type);
        self.write_to(path, format)?;

        self.state.dataset.name = name;
        self.state.dataset.file_type = file_type;
        self.state.remember_directory(path);
        Ok(())
    }

    /// Replace the editable metadata of the current dataset.
    pub fn edit(&mut self, edit: MetadataEdit) {
        self.state.edit(edit);
    }

    /// The edit form, pre-filled with the current values.
    pub fn edit_form(&self) -> MetadataEdit {
        MetadataEdit::from_dataset(&self.state.dataset)
    }

    pub fn plot_view(&self) -> PlotView {
        PlotView::from_dataset(&self.state.dataset)
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo::from_dataset(&self.state.dataset)
    }

    fn write_to(&mut self, path: &Path, format: Format) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        writer::write(
            &self.state.dataset,
            format,
            &self.settings.program_name,
            &mut out,
        )
        .with_context(|| format!("writing {}", path.display()))?;

        log::info!(
            "Saved {} points to {} ({format})",
            self.state.dataset.len(),
            path.display()
        );
        self.state.status_message = Some(format!("Saved {}", path.display()));
        Ok(())
    }
}
