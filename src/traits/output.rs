use anyhow::Result;
use std::sync::Mutex;

/// Output message captured by MockOutput for testing
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum OutputMessage {
    Document(String),
    Error(String),
    Hint(String),
}

/// Trait for terminal output operations to enable testing with mocks
pub trait Output: Send + Sync {
    /// Write the rendered plan document to standard output
    fn document(&self, text: &str) -> Result<()>;

    /// Print an error message
    fn error(&self, message: &str);

    /// Print a follow-up hint after an error
    fn hint(&self, message: &str);
}

/// Real terminal output implementation using the output module
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn document(&self, text: &str) -> Result<()> {
        crate::output::document(text)?;
        Ok(())
    }

    fn error(&self, message: &str) {
        crate::output::error(message);
    }

    fn hint(&self, message: &str) {
        crate::output::hint(message);
    }
}

/// Mock output implementation for testing (captures output)
#[allow(dead_code)]
pub struct MockOutput {
    messages: Mutex<Vec<OutputMessage>>,
}

#[allow(dead_code)]
impl MockOutput {
    /// Create new mock output
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Get all captured messages
    pub fn get_messages(&self) -> Vec<OutputMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Concatenation of every document written
    pub fn documents(&self) -> String {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| match m {
                OutputMessage::Document(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check if any error message was output
    pub fn has_error(&self) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|m| matches!(m, OutputMessage::Error(_)))
    }
}

impl Default for MockOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for MockOutput {
    fn document(&self, text: &str) -> Result<()> {
        self.messages
            .lock()
            .unwrap()
            .push(OutputMessage::Document(text.to_string()));
        Ok(())
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(OutputMessage::Error(message.to_string()));
    }

    fn hint(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(OutputMessage::Hint(message.to_string()));
    }
}
