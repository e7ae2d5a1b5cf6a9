//! Error types shared by every stage of a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while sorting multiples into an output file.
#[derive(Error, Debug)]
pub enum MultisortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input file '{}' doesn't exist", .0.display())]
    MissingInput(PathBuf),

    #[error(
        "Output file '{}' already exists. Refusing to continue to avoid its corruption",
        .0.display()
    )]
    OutputExists(PathBuf),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl MultisortError {
    /// Line number of a malformed input line, if this is a parse error.
    pub fn line(&self) -> Option<usize> {
        match self {
            MultisortError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MultisortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = MultisortError::Parse {
            line: 7,
            message: "expected 3 numbers, got 2".to_string(),
        };
        assert_eq!(err.to_string(), "Line 7: expected 3 numbers, got 2");
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_precondition_messages() {
        let err = MultisortError::OutputExists(PathBuf::from("out.txt"));
        assert!(err.to_string().contains("out.txt"));
        assert!(err.to_string().contains("already exists"));
        assert_eq!(err.line(), None);

        let err = MultisortError::MissingInput(PathBuf::from("in.txt"));
        assert_eq!(err.to_string(), "Input file 'in.txt' doesn't exist");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
        let err: MultisortError = io_err.into();
        assert!(matches!(err, MultisortError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: disk full");
    }
}
