//! Terminal output for the tfshow CLI
//!
//! The rendered plan goes to stdout untouched; diagnostics go to stderr and
//! are only colored when stderr is a terminal.

use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

/// Write the rendered document to stdout
pub fn document(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

/// Print `Error: <message>` to stderr
pub fn error(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{} {}", "Error:".red().bold(), message);
    } else {
        eprintln!("Error: {}", message);
    }
}

/// Print a dimmed hint line to stderr
pub fn hint(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}", message.dimmed());
    } else {
        eprintln!("{}", message);
    }
}
