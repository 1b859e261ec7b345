use std::io::{BufRead, Write};

use crate::data::parser::{Decision, MalformedRow, RowErrorHandler};

// ---------------------------------------------------------------------------
// Interactive abort / ignore prompt
// ---------------------------------------------------------------------------

/// Asks on a terminal whether to abort or ignore each malformed row.
///
/// Answers starting with `a` abort; anything else, including end of input,
/// ignores the row.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, row: &MalformedRow) -> std::io::Result<String> {
        writeln!(self.output, "Error reading file!")?;
        writeln!(
            self.output,
            "Line #{} does not contain {}: {}",
            row.line, row.expected, row.content
        )?;
        write!(self.output, "[A]bort or [I]gnore? ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer)
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> RowErrorHandler for TerminalPrompt<R, W> {
    fn on_malformed(&mut self, row: &MalformedRow) -> Decision {
        match self.ask(row) {
            Ok(answer) if answer.trim_start().to_ascii_lowercase().starts_with('a') => {
                Decision::Abort
            }
            Ok(_) => Decision::Continue,
            Err(e) => {
                log::warn!("Prompt failed ({e}), ignoring line {}", row.line);
                Decision::Continue
            }
        }
    }
}
