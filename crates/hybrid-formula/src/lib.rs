//! # hybrid-formula
//!
//! Round-trip spreadsheet formulas between text and editable expression
//! trees.
//!
//! Hybrid-formula backs a structural formula builder: the editor manipulates
//! a tree, previews it as spreadsheet formula text, imports pasted formulas
//! back into trees, and stores trees together with derived metadata.
//!
//! ## Features
//!
//! - Total parser: any text becomes a tree (unparsable text becomes a text node)
//! - Generator producing spreadsheet formula text
//! - Analyzers for complexity, referenced cells and IF/LOOKUP presence
//! - JSON tree documents, including the older shared-operator shape
//! - Caller-owned registry of known reference names
//!
//! ## Example
//!
//! ```rust
//! use hybrid_formula::prelude::*;
//!
//! let tree = parse("=[99999]*2.5+[12345]");
//! assert_eq!(generate(&tree), "([99999]*2.5+[12345])");
//!
//! let record = FormulaRecord::from_tree("bonus", "Bonus estimate", tree).unwrap();
//! assert_eq!(record.metadata.referenced_cells, vec!["[99999]", "[12345]"]);
//! assert!(!record.metadata.has_lookup);
//!
//! let json = tree_to_json(&record.tree).unwrap();
//! assert_eq!(tree_from_json(&json).unwrap(), record.tree);
//! ```

pub mod error;
pub mod json;
pub mod prelude;
pub mod record;

pub use error::{Error, Result};
pub use json::{generate_json, tree_from_json, tree_to_json, tree_to_json_pretty};
pub use record::{FormulaMetadata, FormulaRecord};

// Re-export tree types
pub use hybrid_formula_core::{
    wire, ArithmeticOperator, Comparator, Condition, FormulaNode, OperatorChain, Operators,
    LOOKUP_FUNCTION,
};

// Re-export compiler entry points
pub use hybrid_formula_compiler::{
    collect_cell_references, complexity_score, generate, generate_all, generate_with,
    has_conditional, has_lookup, parse, parse_with, try_parse, try_parse_with, EqualitySpelling,
    FormulaError, FormulaResult, GenerateOptions, ParseOptions, ReferenceKind, ReferenceRegistry,
    DEFAULT_REFERENCES,
};
