/**
 * Helper functions for console input and output.
 */
use std::io::Write;

use colored::*;
use rustyline::error::ReadlineError;

use super::common::{Result, StudyError};

#[macro_export]
macro_rules! my_println {
    ($($arg:tt)*) => (
        writeln!(std::io::stdout(), $($arg)*).map_err($crate::common::StudyError::Io)
    );
}

#[macro_export]
macro_rules! my_print {
    ($($arg:tt)*) => (
        write!(std::io::stdout(), $($arg)*).map_err($crate::common::StudyError::Io)
    );
}

/// Display a prompt and read lines from standard input until the user enters
/// one with at least one non-whitespace character. Returns `Ok(None)` if the
/// user presses Ctrl+D and an error if they press Ctrl+C; otherwise returns
/// the entered line with surrounding whitespace removed.
pub fn prompt(message: &str) -> Result<Option<String>> {
    let mut rl = rustyline::Editor::<()>::new();
    loop {
        match rl.readline(message) {
            Ok(response) => {
                let response = response.trim();
                if response.len() > 0 {
                    return Ok(Some(response.to_string()));
                }
            }
            Err(ReadlineError::Interrupted) => {
                return Err(StudyError::ReadlineInterrupted);
            }
            Err(ReadlineError::Eof) => {
                return Ok(None);
            }
            _ => {}
        }
    }
}

/// Print `message` to standard output, breaking lines according to the
/// current width of the terminal. `prefix` is prepended to the first line and
/// subsequent lines are indented by its length.
pub fn prettyprint(message: &str, prefix: &str) -> Result<()> {
    prettyprint_colored(message, prefix, None, None)
}

pub fn prettyprint_colored(
    message: &str,
    prefix: &str,
    message_color: Option<Color>,
    prefix_color: Option<Color>,
) -> Result<()> {
    let width = textwrap::termwidth().saturating_sub(prefix.len());
    let indent = " ".repeat(prefix.len());
    for (i, line) in textwrap::wrap_iter(message, width).enumerate() {
        let lead = if i == 0 {
            color_optional(prefix, prefix_color)
        } else {
            indent.normal()
        };
        my_println!("{}{}", lead, color_optional(&line, message_color))?;
    }
    Ok(())
}

fn color_optional(text: &str, color: Option<Color>) -> ColoredString {
    if let Some(color) = color {
        text.color(color)
    } else {
        text.normal()
    }
}
