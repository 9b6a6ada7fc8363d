//! Clipboard abstraction
//!
//! Copy actions hand a record's body to a [`Clipboard`]. Writes are fire and
//! forget: callers log a failure and move on.

use std::io::{self, Write};

use colored::*;
use eyre::Result;

/// Destination for copied template text
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

const COPIED_MARKER: &str = "--- copied ---";
const END_MARKER: &str = "--- end ---";

/// Clipboard for terminals: writes the copied text to stdout
///
/// The text is framed by dimmed marker lines so it stands apart from the
/// session output around it.
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{}", framed(text))?;
        out.flush()?;
        Ok(())
    }
}

fn framed(text: &str) -> String {
    format!("{}\n{}\n{}\n", COPIED_MARKER.dimmed(), text, END_MARKER.dimmed())
}

/// Clipboard that keeps every write in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Vec<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent write, if any
    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }

    /// Every write in order
    pub fn history(&self) -> &[String] {
        &self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writes.push(text.to_string());
        Ok(())
    }
}
