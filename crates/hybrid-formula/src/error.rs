//! Error types for hybrid-formula

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the hybrid-formula facade
#[derive(Debug, Error)]
pub enum Error {
    /// Formula compilation error
    #[error(transparent)]
    Formula(#[from] hybrid_formula_compiler::FormulaError),

    /// Tree invariant violation
    #[error(transparent)]
    Tree(#[from] hybrid_formula_core::Error),

    /// Tree document could not be read or written
    #[error("Tree document error: {0}")]
    Json(#[from] serde_json::Error),
}
