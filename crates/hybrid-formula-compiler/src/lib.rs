//! # hybrid-formula-compiler
//!
//! Formula compiler for the hybrid-formula builder.
//!
//! This crate provides:
//! - Formula parsing (text → tree), total: unparsable input becomes a text node
//! - Formula generation (tree → text)
//! - Tree analysis (complexity score, referenced cells, IF/LOOKUP presence)
//! - Delimiter-aware scanning shared by all of the above
//!
//! ## Example
//!
//! ```rust
//! use hybrid_formula_compiler::{collect_cell_references, complexity_score, generate, parse};
//!
//! let tree = parse("=IF(A1>10,\"High\",\"Low\")");
//! assert_eq!(generate(&tree), "IF(A1>10,\"High\",\"Low\")");
//! assert_eq!(complexity_score(&tree), 5);
//! assert_eq!(collect_cell_references(&tree), vec!["A1"]);
//! ```

pub mod analyzer;
pub mod error;
pub mod generator;
pub mod parser;
pub mod references;
pub mod scanner;

pub use analyzer::{collect_cell_references, complexity_score, has_conditional, has_lookup};
pub use error::{FormulaError, FormulaResult};
pub use generator::{generate, generate_all, generate_with, EqualitySpelling, GenerateOptions};
pub use parser::{parse, parse_with, try_parse, try_parse_with, ParseOptions};
pub use references::{ReferenceKind, ReferenceRegistry, DEFAULT_REFERENCES};
