use std::path::PathBuf;

use crate::query::Connector;
use crate::DocId;

/// A malformed line in an index file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    /// 1-based line number in the index file.
    pub line: usize,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatErrorKind {
    #[error("invalid word {0:?}")]
    InvalidWord(String),

    #[error("line is not valid UTF-8: {0:?}")]
    NotUtf8(String),

    #[error("word {0:?} has a document id without a count")]
    UnpairedField(String),

    #[error("expected a positive integer, found {0:?}")]
    InvalidNumber(String),

    #[error("document {doc_id} listed twice for word {word:?}")]
    DuplicateDoc { word: String, doc_id: DocId },

    #[error("word {0:?} listed twice")]
    DuplicateWord(String),
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed index file, {0}")]
    Format(#[from] FormatError),
}

/// A query line that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("bad character {0:?} in query")]
    InvalidCharacter(char),

    #[error("'{0}' cannot be first")]
    LeadingConnector(Connector),

    #[error("'{0}' cannot be last")]
    TrailingConnector(Connector),

    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentConnectors(Connector, Connector),
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a crawler directory", .path.display())]
    NotCrawlerDir { path: PathBuf },

    #[error("{}: missing {field} line", .path.display())]
    MissingHeader { path: PathBuf, field: &'static str },

    #[error("{}: invalid depth {value:?}", .path.display())]
    InvalidDepth { path: PathBuf, value: String },
}

impl PageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PageError::Io { path: path.into(), source }
    }
}
