//! Spectrum viewer core: read two-column spectra from text, edit their
//! metadata and write them back out.
//!
//! ```no_run
//! use specview::data::format::Format;
//! use specview::data::parser::{ErrorPolicy, parse};
//! use specview::data::writer::write;
//!
//! let text = "# header\n1.0 2.0\n3.5 4.25\n";
//! let dataset = parse(text.as_bytes(), &mut ErrorPolicy::SkipAndContinue)?;
//! write(&dataset, Format::Xy, "specview", &mut std::io::stdout())?;
//! # Ok::<(), specview::data::error::DataError>(())
//! ```

pub mod app;
pub mod data;
pub mod settings;
pub mod state;
pub mod ui;
