//! # hybrid-formula-core
//!
//! Core data structures for the hybrid-formula builder.
//!
//! This crate provides the expression tree shared by the parser, the
//! generator and the analyzers:
//! - [`FormulaNode`] - The closed set of tree node variants
//! - [`OperatorChain`] - A flat, precedence-free run of arithmetic operations
//! - [`Condition`] - The comparison inside an `IF(...)`
//! - [`ArithmeticOperator`] and [`Comparator`] - Operator symbols
//!
//! With the `serde` feature enabled, trees encode to and decode from the
//! JSON document shape used by the editor and the formula store (see
//! [`wire`]).
//!
//! ## Example
//!
//! ```rust
//! use hybrid_formula_core::{ArithmeticOperator, FormulaNode, OperatorChain};
//!
//! let chain = OperatorChain::new(
//!     vec![FormulaNode::cell("A1"), FormulaNode::number(2.0)],
//!     vec![ArithmeticOperator::Multiply],
//! )
//! .unwrap();
//! let node = FormulaNode::Operator(chain);
//! assert_eq!(node.kind(), "operator");
//! ```

pub mod ast;
pub mod error;
#[cfg(feature = "serde")]
pub mod wire;

pub use ast::{ArithmeticOperator, Comparator, Condition, FormulaNode, OperatorChain, Operators};
pub use error::{Error, Result};

/// Name of the only function the builder understands.
pub const LOOKUP_FUNCTION: &str = "lookup";
