//! Error types for building and solving crosswords.
//!
//! A puzzle that simply has no fill is *not* an error: the solver reports it
//! as `Ok(None)`. Errors cover malformed inputs, I/O, and an exceeded search
//! budget.

use std::path::PathBuf;

use thiserror::Error;

use crate::crossword::Variable;

#[derive(Debug, Error)]
pub enum Error {
    /// The grid is not a well-formed rectangle.
    #[error("invalid structure: {message}")]
    InvalidStructure { message: String },

    /// A slot does not fit the grid it was declared on.
    #[error("invalid variable {variable}: {message}")]
    InvalidVariable { variable: Variable, message: String },

    /// Two slots share a cell in a way the overlap table cannot express.
    #[error("invalid overlap between {x} and {y}: {message}")]
    InvalidOverlap {
        x: Variable,
        y: Variable,
        message: String,
    },

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The word list could not be interpreted.
    #[error("invalid word list: {message}")]
    WordList { message: String },

    /// The configured step or time budget ran out before the search finished.
    #[error("search budget exhausted after {steps} steps")]
    BudgetExhausted { steps: u64 },

    #[error("internal solver error: {message}")]
    Internal { message: String },
}

impl Error {
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    pub fn invalid_variable(variable: &Variable, message: impl Into<String>) -> Self {
        Self::InvalidVariable {
            variable: variable.clone(),
            message: message.into(),
        }
    }

    pub fn invalid_overlap(x: &Variable, y: &Variable, message: impl Into<String>) -> Self {
        Self::InvalidOverlap {
            x: x.clone(),
            y: y.clone(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn word_list(message: impl Into<String>) -> Self {
        Self::WordList {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
