//! Error types for hybrid-formula-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or decoding an expression tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A tree violates a structural invariant
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// An operator or comparator symbol is not recognized
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),
}

impl Error {
    /// Create a new malformed-tree error with a message
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedTree(msg.into())
    }
}
