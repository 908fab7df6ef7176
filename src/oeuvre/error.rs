use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A malformed record: what went wrong, and where.
///
/// The parser knows the line, the caller that opened the file knows the path,
/// so the path is attached afterwards with [`RecordError::with_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub message: String,
    pub line: Option<usize>,
    pub path: Option<PathBuf>,
}

impl RecordError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            path: None,
        }
    }

    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            path: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(f, " ({}, line {})", path.display(), line),
            (Some(path), None) => write!(f, " ({})", path.display()),
            (None, Some(line)) => write!(f, " (line {})", line),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for RecordError {}

#[derive(Error, Debug)]
pub enum OeuvreError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, OeuvreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_location() {
        let err = RecordError::new("missing required field 'title'");
        assert_eq!(err.to_string(), "missing required field 'title'");
    }

    #[test]
    fn display_with_line_only() {
        let err = RecordError::at_line("unknown field 'lol'", 3);
        assert_eq!(err.to_string(), "unknown field 'lol' (line 3)");
    }

    #[test]
    fn display_with_path_and_line() {
        let err = RecordError::at_line("un-indented line without a colon", 7).with_path("libra.txt");
        assert_eq!(
            err.to_string(),
            "un-indented line without a colon (libra.txt, line 7)"
        );
    }

    #[test]
    fn record_error_converts_into_oeuvre_error() {
        let err: OeuvreError = RecordError::new("bad").with_path("x.txt").into();
        assert_eq!(err.to_string(), "bad (x.txt)");
    }
}
