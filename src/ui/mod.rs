//! Front-end facing views over the session: plot data, info summary and
//! the interactive malformed-row prompt.

pub mod info;
pub mod plot;
pub mod prompt;
