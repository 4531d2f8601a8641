// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive terminal trait definition.
//!
//! All user interaction of the configurator goes through this port: prompts with
//! defaults, inline progress indicators and informational messages. Swapping the
//! implementation makes the interactive flow scriptable in tests.

use crate::domain::Result;

/// A trait for the interactive surface of the configurator.
///
/// # Progress indicators
///
/// Each probe is announced with [`action`](Terminal::action) and finished with
/// either [`ok`](Terminal::ok) or [`error`](Terminal::error), mirroring the
/// `Doing something.. OK` style of command-line tools.
pub trait Terminal {
    /// Asks the user for a value.
    ///
    /// Empty input selects `default` when one is given. Returns `Err` when no
    /// more input can be read.
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Announces the start of an action.
    fn action(&mut self, message: &str);

    /// Marks the current action as successful.
    fn ok(&mut self);

    /// Marks the current action as failed.
    fn error(&mut self, message: &str);

    /// Prints an informational message.
    fn info(&mut self, message: &str);
}
