//! Error types for the addrbook-core library.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for the addrbook library.
#[derive(Error, Debug)]
pub enum AddrbookError {
    /// Dictionary loading error.
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Corpus processing error.
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to loading the lookup dictionaries.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The dictionary file does not exist.
    #[error("dictionary file not found: {}", .0.display())]
    Missing(PathBuf),

    /// A row in the dictionary could not be parsed.
    #[error("{source_name}:{line}: {reason}")]
    Parse {
        source_name: String,
        line: u64,
        reason: String,
    },

    /// The delimited reader failed.
    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),

    /// Reading the dictionary source failed.
    #[error("failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),

    /// Reading a dictionary file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DictionaryError {
    pub(crate) fn parse(line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            source_name: "<input>".to_string(),
            line,
            reason: reason.into(),
        }
    }

    /// Attach the file path to an error raised by a reader-based loader.
    /// Table errors become `Parse` errors at the offending record's line.
    pub(crate) fn with_path(self, path: &Path) -> Self {
        let source_name = path.display().to_string();
        match self {
            Self::Parse { line, reason, .. } => Self::Parse {
                source_name,
                line,
                reason,
            },
            Self::Csv(err) => Self::Parse {
                source_name,
                line: err.position().map(|p| p.line()).unwrap_or_default(),
                reason: match err.kind() {
                    csv::ErrorKind::Deserialize { err: de, .. } => de.to_string(),
                    _ => err.to_string(),
                },
            },
            Self::Io(source) => Self::Read {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

/// Errors raised while walking the page files of a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A `#` line that is not a well-formed page directive.
    #[error("{}:{line}: unknown # directive: {text}", .path.display())]
    Directive {
        path: PathBuf,
        line: usize,
        text: String,
    },

    /// A data line appeared before the first page directive of a file.
    #[error("{}:{line}: data line before any page directive", .path.display())]
    MissingDirective { path: PathBuf, line: usize },

    /// A page file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the addrbook library.
pub type Result<T> = std::result::Result<T, AddrbookError>;
