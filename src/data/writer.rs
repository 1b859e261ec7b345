use std::io::Write;

use super::error::Result;
use super::format::Format;
use super::model::Dataset;

/// The comment line opening every text file we write.
pub fn header_line(program: &str, format: Format) -> String {
    format!("# File written by {program} in {format} format")
}

/// Write `dataset` to `dest` in the given format.
///
/// `program` names the writer in the header comment of the text formats.
pub fn write<W: Write>(dataset: &Dataset, format: Format, program: &str, dest: &mut W) -> Result<()> {
    match format {
        Format::Xy => write_xy(dataset, program, dest),
        Format::Csv => write_csv(dataset, program, dest),
        Format::Json => write_json(dataset, dest),
    }
}

// ---------------------------------------------------------------------------
// xy – tab separated, one pair per line
// ---------------------------------------------------------------------------

fn write_xy<W: Write>(dataset: &Dataset, program: &str, dest: &mut W) -> Result<()> {
    writeln!(dest, "{}", header_line(program, Format::Xy))?;
    for (x, y) in dataset.points() {
        writeln!(dest, "{x}\t{y}")?;
    }
    dest.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// csv – same header comment, then `x,y` records
// ---------------------------------------------------------------------------

fn write_csv<W: Write>(dataset: &Dataset, program: &str, dest: &mut W) -> Result<()> {
    writeln!(dest, "{}", header_line(program, Format::Csv))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(&mut *dest);
    for (x, y) in dataset.points() {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// json – the full dataset, metadata included
// ---------------------------------------------------------------------------

fn write_json<W: Write>(dataset: &Dataset, dest: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *dest, dataset)?;
    writeln!(dest)?;
    dest.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::{ErrorPolicy, parse};

    fn sample() -> Dataset {
        Dataset::from_values(vec![200.0, 200.5, 1e-7], vec![0.125, -3.0, 42.0]).unwrap()
    }

    fn write_to_string(dataset: &Dataset, format: Format) -> String {
        let mut buf = Vec::new();
        write(dataset, format, "specview", &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_xy_layout() {
        let text = write_to_string(&sample(), Format::Xy);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# File written by specview in xy format");
        assert_eq!(lines[1], "200\t0.125");
        assert_eq!(lines[2], "200.5\t-3");
        assert_eq!(lines.len(), 4);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_xy_empty_dataset_writes_only_header() {
        let text = write_to_string(&Dataset::default(), Format::Xy);
        assert_eq!(text, "# File written by specview in xy format\n");
    }

    #[test]
    fn test_xy_roundtrip() {
        let original = sample();
        let text = write_to_string(&original, Format::Xy);
        let mut policy = ErrorPolicy::AbortOnError;
        let reparsed = parse(text.as_bytes(), &mut policy).unwrap();
        assert_eq!(reparsed.x_values(), original.x_values());
        assert_eq!(reparsed.y_values(), original.y_values());
    }

    #[test]
    fn test_csv_layout() {
        let text = write_to_string(&sample(), Format::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# File written by specview in csv format");
        assert_eq!(lines[1], "200,0.125");
        assert_eq!(lines[2], "200.5,-3");
    }

    #[test]
    fn test_json_keeps_metadata() {
        let mut ds = sample();
        ds.name = Some("cyclohexane".into());
        ds.x_label = "Wavenumber (1/cm)".into();
        let text = write_to_string(&ds, Format::Json);
        let back: Dataset = serde_json::from_str(&text).unwrap();
        assert_eq!(back, ds);
    }
}
