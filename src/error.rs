use std::fmt;
use std::path::PathBuf;

/// Error types for the show command, each tied to a process exit code
#[derive(Debug)]
pub enum ShowError {
    /// Command line could not be interpreted
    Usage(String),

    /// Input plan file does not exist
    InputNotFound(PathBuf),

    /// Input plan file could not be read
    Io(String),

    /// Input is not a JSON plan document
    InvalidJson(String),

    /// Plan format version is missing or older than supported
    UnsupportedFormat(Option<String>),

    /// Rendered output could not be written
    WriteFailed(String),

    /// Rendering worker failed
    Render(String),
}

impl ShowError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ShowError::Usage(_) | ShowError::Render(_) => 1,
            ShowError::InputNotFound(_) | ShowError::Io(_) | ShowError::WriteFailed(_) => 2,
            ShowError::InvalidJson(_) => 3,
            ShowError::UnsupportedFormat(_) => 4,
        }
    }
}

impl fmt::Display for ShowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowError::Usage(msg) => write!(f, "{}", msg),
            ShowError::InputNotFound(path) => {
                write!(f, "Input file not found: {}", path.display())
            }
            ShowError::Io(msg) => write!(f, "Failed to read input file: {}", msg),
            ShowError::InvalidJson(msg) => {
                write!(f, "Failed to parse JSON plan file: {}", msg)
            }
            ShowError::UnsupportedFormat(version) => {
                write!(
                    f,
                    "Unsupported plan format version: {}. Expected 1.2 or later.",
                    version.as_deref().unwrap_or("(missing)")
                )
            }
            ShowError::WriteFailed(msg) => write!(f, "Failed to write output file: {}", msg),
            ShowError::Render(msg) => write!(f, "Failed to render plan: {}", msg),
        }
    }
}

impl std::error::Error for ShowError {}
