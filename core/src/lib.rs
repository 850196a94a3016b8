pub mod builder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod index;
pub mod pagedir;
pub mod persist;
pub mod query;
pub mod rank;
pub mod tokenizer;

pub use error::{FormatError, FormatErrorKind, IndexError, PageError, SyntaxError};
pub use index::{CounterSet, DocId, Index};
pub use pagedir::{Document, DocumentSource, MemorySource, PageDir};
pub use query::{Connector, Query};
pub use rank::RankedResult;
