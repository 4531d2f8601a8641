// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-oriented terminal adapter.

use crate::domain::{ConfigError, Result};
use crate::ports::Terminal;
use std::io::{self, BufRead, BufReader, Stdin, Stderr, Write};

/// Terminal reading answers line by line and writing progress to a stream.
///
/// Prompts look like `Message [default]: `; actions print `Message.. ` followed by
/// ` OK` or the error text on the same line.
///
/// # Examples
///
/// ```rust
/// use stups_config::adapters::ConsoleTerminal;
/// use stups_config::ports::Terminal;
/// use std::io::Cursor;
///
/// let mut terminal = ConsoleTerminal::new(Cursor::new("\n"), Vec::new());
/// let answer = terminal.prompt("Domain", Some("stups.example.org")).unwrap();
/// assert_eq!(answer, "stups.example.org");
/// ```
pub struct ConsoleTerminal<R, W> {
    input: R,
    output: W,
    /// Whether an action line is waiting for its result
    pending_action: bool,
}

impl ConsoleTerminal<BufReader<Stdin>, Stderr> {
    /// Creates a terminal on stdin and stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsoleTerminal<R, W> {
    /// Creates a terminal on the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending_action: false,
        }
    }

    /// Consumes the terminal, returning its streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn finish_line(&mut self) {
        if self.pending_action {
            self.pending_action = false;
            self.write_line("");
        }
    }

    fn write_line(&mut self, line: &str) {
        let result = writeln!(self.output, "{}", line).and_then(|_| self.output.flush());
        log_write_error(result);
    }
}

fn log_write_error(result: io::Result<()>) {
    if let Err(e) = result {
        tracing::debug!("Failed to write to terminal: {}", e);
    }
}

impl<R: BufRead, W: Write> Terminal for ConsoleTerminal<R, W> {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        self.finish_line();
        loop {
            match default {
                Some(default) => write!(self.output, "{} [{}]: ", message, default)?,
                None => write!(self.output, "{}: ", message)?,
            }
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ConfigError::PromptError {
                    message: "end of input".to_string(),
                });
            }

            let answer = line.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        }
    }

    fn action(&mut self, message: &str) {
        self.finish_line();
        let result = write!(self.output, "{}..", message).and_then(|_| self.output.flush());
        log_write_error(result);
        self.pending_action = true;
    }

    fn ok(&mut self) {
        if self.pending_action {
            self.pending_action = false;
            self.write_line(" OK");
        }
    }

    fn error(&mut self, message: &str) {
        if self.pending_action {
            self.pending_action = false;
            self.write_line(&format!(" {}", message));
        } else {
            self.write_line(message);
        }
    }

    fn info(&mut self, message: &str) {
        self.finish_line();
        self.write_line(message);
    }
}
