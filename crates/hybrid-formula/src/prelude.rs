//! Prelude module - common imports for hybrid-formula users
//!
//! ```rust
//! use hybrid_formula::prelude::*;
//! ```

pub use crate::{
    // Analysis
    collect_cell_references,
    complexity_score,
    // Generation
    generate,
    generate_with,
    has_conditional,
    has_lookup,
    // Parsing
    parse,
    parse_with,
    // Documents
    tree_from_json,
    tree_to_json,
    // Tree types
    ArithmeticOperator,
    Comparator,
    Condition,
    // Error types
    Error,
    FormulaMetadata,
    FormulaNode,
    FormulaRecord,
    GenerateOptions,
    OperatorChain,
    ParseOptions,
    ReferenceRegistry,
    Result,
};
