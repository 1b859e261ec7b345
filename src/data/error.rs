use std::io;

use thiserror::Error;

/// Errors raised by the dataset readers and writers.
///
/// Malformed rows are not errors: they go through a
/// [`RowErrorHandler`](super::parser::RowErrorHandler) instead.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },
}

pub type Result<T> = std::result::Result<T, DataError>;
