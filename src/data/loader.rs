use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use super::error::DataError;
use super::format::Format;
use super::model::{DEFAULT_FILE_TYPE, Dataset};
use super::parser::{ParseReport, RowErrorHandler, RowSink, parse_into, text_lines};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// * `.csv`  – comma-separated `x,y` records, `#` comments
/// * `.json` – a serialized [`Dataset`], metadata included
/// * anything else – whitespace-separated xy text
///
/// The dataset is named after the file stem and tagged with the extension.
pub fn load_file<H>(path: &Path, handler: &mut H) -> Result<Dataset>
where
    H: RowErrorHandler + ?Sized,
{
    Ok(load_report(path, handler)?.dataset)
}

/// Like [`load_file`], but also says how many rows were skipped and where
/// the handler aborted, if it did.
pub fn load_report<H>(path: &Path, handler: &mut H) -> Result<ParseReport>
where
    H: RowErrorHandler + ?Sized,
{
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let (name, file_type) = name_and_type(path);

    let report = match Format::from_tag(&file_type) {
        Some(Format::Csv) => load_csv(reader, Dataset::named(name, file_type), handler),
        Some(Format::Json) => load_json(reader, name, file_type).map(ParseReport::complete),
        _ => parse_into(reader, Dataset::named(name, file_type), handler),
    }
    .with_context(|| format!("reading {}", path.display()))?;

    log::info!(
        "Loaded {} points from {}",
        report.dataset.len(),
        path.display()
    );
    Ok(report)
}

/// File stem and extension of `path`; the type is `xy` when there is no
/// extension.
pub fn name_and_type(path: &Path) -> (Option<String>, String) {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty());
    let file_type = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string());
    (name, file_type)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: no header row, `#` comment lines, one `x,y` record per line.
/// Records that are not exactly two numbers go to `handler`, with the
/// physical line number of the record.
fn load_csv<R, H>(reader: R, dataset: Dataset, handler: &mut H) -> Result<ParseReport, DataError>
where
    R: BufRead,
    H: RowErrorHandler + ?Sized,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);

    let mut sink = RowSink::new(dataset, handler);
    let mut record = csv::StringRecord::new();

    for (idx, line) in text_lines(reader).enumerate() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        if !builder.from_reader(line.as_bytes()).read_record(&mut record)? {
            continue;
        }
        let tokens: Vec<&str> = record.iter().collect();
        if tokens.iter().all(|t| t.is_empty()) {
            continue;
        }
        if !sink.row(idx + 1, &tokens, &line) {
            break;
        }
    }

    Ok(sink.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected schema:
///
/// ```json
/// {
///   "name": "benzene",
///   "file_type": "json",
///   "x_label": "Wavelength (nm)",
///   "y_label": "Absorption",
///   "x_values": [250.0, 251.0],
///   "y_values": [0.12, 0.14]
/// }
/// ```
///
/// A missing name is filled in from the file stem.
fn load_json<R: BufRead>(
    reader: R,
    name: Option<String>,
    file_type: String,
) -> Result<Dataset, DataError> {
    let mut dataset: Dataset = serde_json::from_reader(reader)?;
    if dataset.name.is_none() {
        dataset.name = name;
    }
    dataset.file_type = file_type;
    Ok(dataset)
}
