/// Data layer: the dataset type, its readers and its writers.
///
/// Architecture:
/// ```text
///  .xy / .txt / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  open file, name it, pick a reader
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  lines → (x, y) pairs, malformed rows → RowErrorHandler
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  x/y values, labels, name, type tag
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Format::{Xy, Csv, Json} → text
///   └──────────┘
/// ```

pub mod loader;
pub mod parser;
pub mod model;
pub mod format;
pub mod writer;
pub mod error;
