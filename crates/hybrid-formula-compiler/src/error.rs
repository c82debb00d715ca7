//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while compiling a formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Formula nests deeper than the parser allows
    #[error("Formula nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },

    /// Tree construction failed
    #[error(transparent)]
    Tree(#[from] hybrid_formula_core::Error),
}
