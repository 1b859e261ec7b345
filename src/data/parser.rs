use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::model::Dataset;

/// Shape every data row must have.
pub const EXPECTED_ROW: &str = "2 numbers";

// ---------------------------------------------------------------------------
// Malformed rows and what to do about them
// ---------------------------------------------------------------------------

/// A non-comment, non-blank row that is not exactly two numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based line number in the source.
    pub line: usize,
    /// Shape the row should have had.
    pub expected: &'static str,
    /// Raw content of the offending line.
    pub content: String,
}

impl fmt::Display for MalformedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line #{} does not contain {}: {:?}",
            self.line, self.expected, self.content
        )
    }
}

/// Answer to a malformed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Discard everything read so far and stop.
    Abort,
    /// Skip the row and keep reading.
    Continue,
}

/// Decides how parsing proceeds after a malformed row.
pub trait RowErrorHandler {
    fn on_malformed(&mut self, row: &MalformedRow) -> Decision;
}

/// Fixed, non-interactive answer to every malformed row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    AbortOnError,
    #[default]
    SkipAndContinue,
}

impl RowErrorHandler for ErrorPolicy {
    fn on_malformed(&mut self, _row: &MalformedRow) -> Decision {
        match self {
            ErrorPolicy::AbortOnError => Decision::Abort,
            ErrorPolicy::SkipAndContinue => Decision::Continue,
        }
    }
}

impl<F> RowErrorHandler for F
where
    F: FnMut(&MalformedRow) -> Decision,
{
    fn on_malformed(&mut self, row: &MalformedRow) -> Decision {
        self(row)
    }
}

// ---------------------------------------------------------------------------
// Row accumulation shared by the xy and csv readers
// ---------------------------------------------------------------------------

/// What reading one source produced: the dataset plus the fate of bad rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub dataset: Dataset,
    /// Malformed rows the handler chose to skip.
    pub skipped: usize,
    /// Line at which the handler chose to abort, if it did.
    pub aborted_at: Option<usize>,
}

impl ParseReport {
    /// A report for a dataset read without row-level checks.
    pub fn complete(dataset: Dataset) -> Self {
        Self {
            dataset,
            skipped: 0,
            aborted_at: None,
        }
    }
}

/// Collects rows into a dataset and applies the malformed-row decision.
pub(crate) struct RowSink<'h, H: RowErrorHandler + ?Sized> {
    dataset: Dataset,
    handler: &'h mut H,
    skipped: usize,
    aborted_at: Option<usize>,
}

impl<'h, H: RowErrorHandler + ?Sized> RowSink<'h, H> {
    pub(crate) fn new(dataset: Dataset, handler: &'h mut H) -> Self {
        Self {
            dataset,
            handler,
            skipped: 0,
            aborted_at: None,
        }
    }

    /// Feed the tokens of one non-comment, non-blank row.
    ///
    /// Returns `false` when the handler chose to abort; the dataset has
    /// already been reset by then.
    pub(crate) fn row(&mut self, line: usize, tokens: &[&str], content: &str) -> bool {
        if let Some((x, y)) = parse_pair(tokens) {
            self.dataset.push(x, y);
            return true;
        }

        let malformed = MalformedRow {
            line,
            expected: EXPECTED_ROW,
            content: content.to_string(),
        };
        log::warn!("Error reading file: {malformed}");
        match self.handler.on_malformed(&malformed) {
            Decision::Continue => {
                self.skipped += 1;
                true
            }
            Decision::Abort => {
                log::warn!("Aborted at line {line}, discarding {} points", self.dataset.len());
                self.dataset = Dataset::default();
                self.aborted_at = Some(line);
                false
            }
        }
    }

    pub(crate) fn finish(self) -> ParseReport {
        if self.skipped > 0 {
            log::info!("Skipped {} malformed rows", self.skipped);
        }
        ParseReport {
            dataset: self.dataset,
            skipped: self.skipped,
            aborted_at: self.aborted_at,
        }
    }
}

fn parse_pair(tokens: &[&str]) -> Option<(f64, f64)> {
    match tokens {
        [x, y] => Some((x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Line splitting: `\n`, `\r\n` and bare `\r` all end a line
// ---------------------------------------------------------------------------

/// Iterator over the lines of a text stream, without terminators.
pub(crate) struct TextLines<R> {
    source: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
}

/// Split `source` into lines on `\n`, `\r\n` or a lone `\r`.
pub(crate) fn text_lines<R: BufRead>(source: R) -> TextLines<R> {
    TextLines {
        source,
        buf: Vec::new(),
        pending: VecDeque::new(),
    }
}

impl<R: BufRead> Iterator for TextLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }

            self.buf.clear();
            match self.source.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            let mut chunk = self.buf.as_slice();
            if let Some(rest) = chunk.strip_suffix(b"\n") {
                chunk = rest;
            }
            if let Some(rest) = chunk.strip_suffix(b"\r") {
                chunk = rest;
            }
            let text = match std::str::from_utf8(chunk) {
                Ok(text) => text,
                Err(e) => return Some(Err(io::Error::new(io::ErrorKind::InvalidData, e))),
            };
            self.pending.extend(text.split('\r').map(str::to_string));
        }
    }
}

// ---------------------------------------------------------------------------
// xy parser
// ---------------------------------------------------------------------------

/// Parse a whitespace-separated two-column text stream.
///
/// Lines starting with `#` are comments and blank lines are ignored. Every
/// other line must hold exactly two numbers; anything else is handed to
/// `handler`. On [`Decision::Abort`] the returned dataset is empty with
/// default fields.
pub fn parse<R, H>(source: R, handler: &mut H) -> Result<Dataset>
where
    R: BufRead,
    H: RowErrorHandler + ?Sized,
{
    Ok(parse_into(source, Dataset::default(), handler)?.dataset)
}

/// Like [`parse`], but fills `dataset` (keeping its metadata) instead of a
/// default one, and reports skipped and aborted rows.
pub(crate) fn parse_into<R, H>(source: R, dataset: Dataset, handler: &mut H) -> Result<ParseReport>
where
    R: BufRead,
    H: RowErrorHandler + ?Sized,
{
    let mut sink = RowSink::new(dataset, handler);

    for (idx, line) in text_lines(source).enumerate() {
        let line = line?;
        let line_number = idx + 1;

        if line.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if !sink.row(line_number, &tokens, &line) {
            break;
        }
    }

    Ok(sink.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(text: &str, policy: ErrorPolicy) -> Dataset {
        let mut policy = policy;
        parse(text.as_bytes(), &mut policy).unwrap()
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let ds = parse_str(
            "# header\n1.0 2.0\n3.5 4.25\n\n5 6\n",
            ErrorPolicy::SkipAndContinue,
        );
        assert_eq!(ds.x_values(), &[1.0, 3.5, 5.0]);
        assert_eq!(ds.y_values(), &[2.0, 4.25, 6.0]);
    }

    #[test]
    fn test_skip_and_continue() {
        let ds = parse_str("1.0 2.0\nbad row\n3.0 4.0\n", ErrorPolicy::SkipAndContinue);
        assert_eq!(ds.x_values(), &[1.0, 3.0]);
        assert_eq!(ds.y_values(), &[2.0, 4.0]);
    }

    #[test]
    fn test_abort_discards_everything() {
        let ds = parse_str("1.0 2.0\nbad row\n3.0 4.0\n", ErrorPolicy::AbortOnError);
        assert!(ds.is_empty());
        assert!(ds.y_values().is_empty());
        assert_eq!(ds, Dataset::default());
    }

    #[test]
    fn test_default_policy_skips() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::SkipAndContinue);
    }

    #[test]
    fn test_empty_and_comment_only_sources() {
        assert_eq!(parse_str("", ErrorPolicy::AbortOnError), Dataset::default());
        assert_eq!(
            parse_str("# one\n#two\n\n   \n", ErrorPolicy::AbortOnError),
            Dataset::default()
        );
    }

    #[test]
    fn test_wrong_token_counts_are_malformed() {
        let mut seen = Vec::new();
        let mut handler = |row: &MalformedRow| {
            seen.push(row.line);
            Decision::Continue
        };
        let ds = parse("1\n1 2 3\n4 5\n".as_bytes(), &mut handler).unwrap();
        assert_eq!(ds.points().collect::<Vec<_>>(), vec![(4.0, 5.0)]);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_line_numbers_count_comments_and_blanks() {
        let mut reported = Vec::new();
        let mut handler = |row: &MalformedRow| {
            reported.push(row.clone());
            Decision::Continue
        };
        parse("# c\n\n1 2\nx 3\n".as_bytes(), &mut handler).unwrap();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].line, 4);
        assert_eq!(reported[0].expected, "2 numbers");
        assert_eq!(reported[0].content, "x 3");
    }

    #[test]
    fn test_abort_stops_reading() {
        let mut calls = 0;
        let mut handler = |_: &MalformedRow| {
            calls += 1;
            Decision::Abort
        };
        let ds = parse("1 2\nbad\nworse\n3 4\n".as_bytes(), &mut handler).unwrap();
        assert!(ds.is_empty());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_indented_hash_is_not_a_comment() {
        let ds = parse_str("  # not a comment\n1 2\n", ErrorPolicy::SkipAndContinue);
        assert_eq!(ds.len(), 1);
        let aborted = parse_str("  # not a comment\n1 2\n", ErrorPolicy::AbortOnError);
        assert!(aborted.is_empty());
    }

    #[test]
    fn test_keeps_file_order_and_duplicates() {
        let ds = parse_str("3 1\n1 2\n3 5\n", ErrorPolicy::SkipAndContinue);
        assert_eq!(ds.x_values(), &[3.0, 1.0, 3.0]);
        assert_eq!(ds.y_values(), &[1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_tabs_crlf_and_exponents() {
        let ds = parse_str("1e2\t-2.5E-1\r\n  7  8  \r\n", ErrorPolicy::AbortOnError);
        assert_eq!(ds.x_values(), &[100.0, 7.0]);
        assert_eq!(ds.y_values(), &[-0.25, 8.0]);
    }

    #[test]
    fn test_lengths_always_match() {
        let ds = parse_str("1 2\n3\n4 x\n5 6\n", ErrorPolicy::SkipAndContinue);
        assert_eq!(ds.x_values().len(), ds.y_values().len());
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_parse_into_keeps_metadata() {
        let base = Dataset::named(Some("sample".into()), "dat");
        let mut policy = ErrorPolicy::SkipAndContinue;
        let report = parse_into("1 2\n".as_bytes(), base, &mut policy).unwrap();
        let ds = report.dataset;
        assert_eq!(ds.name.as_deref(), Some("sample"));
        assert_eq!(ds.file_type, "dat");
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_bare_carriage_return_ends_lines() {
        let ds = parse_str("1 2\r3 4\r", ErrorPolicy::SkipAndContinue);
        assert_eq!(ds.x_values(), &[1.0, 3.0]);
        assert_eq!(ds.y_values(), &[2.0, 4.0]);

        let mixed = parse_str("# cr file\r1 2\r\n\r3 4\n5 6", ErrorPolicy::AbortOnError);
        assert_eq!(mixed.x_values(), &[1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_carriage_return_line_numbers() {
        let mut reported = Vec::new();
        let mut handler = |row: &MalformedRow| {
            reported.push(row.line);
            Decision::Continue
        };
        parse("1 2\r\rbad\r\n4 5\rworse\n".as_bytes(), &mut handler).unwrap();
        assert_eq!(reported, vec![3, 5]);
    }

    #[test]
    fn test_text_lines_splitting() {
        let lines: Vec<String> = text_lines("a\r\nb\rc\n\nd".as_bytes())
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
    }

    #[test]
    fn test_report_records_skips_and_abort() {
        let mut skip = ErrorPolicy::SkipAndContinue;
        let report = parse_into("1 2\nx\ny\n3 4\n".as_bytes(), Dataset::default(), &mut skip).unwrap();
        assert_eq!(report.skipped, 2);
        assert_eq!(report.aborted_at, None);
        assert_eq!(report.dataset.len(), 2);

        let mut abort = ErrorPolicy::AbortOnError;
        let report = parse_into("1 2\n\nx\n3 4\n".as_bytes(), Dataset::default(), &mut abort).unwrap();
        assert_eq!(report.aborted_at, Some(3));
        assert!(report.dataset.is_empty());
    }
}
