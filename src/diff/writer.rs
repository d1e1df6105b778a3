//! ANSI-aware text sink used by every renderer
//!
//! The writer owns the rendered text and remembers whether the most recently
//! terminated line was blank, so callers can ask for a separator without ever
//! producing two blank lines in a row.

use super::types::{AnsiStyle, RESET};

#[derive(Debug, Clone)]
pub struct AnsiTextWriter {
    buffer: String,
    color: bool,
    last_line_blank: bool,
    line_has_content: bool,
    lines: usize,
}

impl AnsiTextWriter {
    /// Create an empty writer; `color` selects whether escape sequences are emitted
    pub fn new(color: bool) -> Self {
        Self {
            buffer: String::new(),
            color,
            last_line_blank: false,
            line_has_content: false,
            lines: 0,
        }
    }

    /// Fresh writer with the same color mode, for rendering a fragment that
    /// may be discarded
    pub fn scratch(&self) -> Self {
        Self::new(self.color)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of line terminators written so far
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    pub fn write(&mut self, text: &str) {
        if !self.line_has_content && text.chars().any(|c| !c.is_whitespace()) {
            self.line_has_content = true;
        }
        self.buffer.push_str(text);
    }

    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.end_line();
    }

    /// Emit a blank line unless the previous line already was one
    pub fn write_line_if_not_blank(&mut self) {
        if !self.last_line_blank {
            self.end_line();
        }
    }

    pub fn write_styled(&mut self, text: &str, styles: &[AnsiStyle]) {
        if self.color {
            for style in styles {
                self.buffer.push_str(style.escape());
            }
        }
        self.write(text);
        if self.color {
            self.buffer.push_str(RESET);
        }
    }

    pub fn write_line_styled(&mut self, text: &str, styles: &[AnsiStyle]) {
        self.write_styled(text, styles);
        self.end_line();
    }

    pub fn write_reset(&mut self) {
        if self.color {
            self.buffer.push_str(RESET);
        }
    }

    /// Append a fragment rendered by another writer
    ///
    /// Both writers must be positioned at the start of a line. The blank-line
    /// bookkeeping continues from the fragment's last line.
    pub fn append(&mut self, other: AnsiTextWriter) {
        if other.lines > 0 {
            self.last_line_blank = other.last_line_blank;
        }
        self.line_has_content = other.line_has_content;
        self.lines += other.lines;
        self.buffer.push_str(&other.buffer);
    }

    /// Terminate the current line; on an empty line this produces a blank one
    pub fn end_line(&mut self) {
        self.buffer.push('\n');
        self.last_line_blank = !self.line_has_content;
        self.line_has_content = false;
        self.lines += 1;
    }
}
