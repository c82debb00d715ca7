//! Tree documents as JSON text
//!
//! See [`hybrid_formula_core::wire`] for the document shape.

use crate::error::Result;
use hybrid_formula_compiler::generate;
use hybrid_formula_core::FormulaNode;
use log::warn;

/// Decode a tree document
pub fn tree_from_json(json: &str) -> Result<FormulaNode> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a tree as a compact document
pub fn tree_to_json(tree: &FormulaNode) -> Result<String> {
    Ok(serde_json::to_string(tree)?)
}

/// Encode a tree as an indented document
pub fn tree_to_json_pretty(tree: &FormulaNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

/// Generate formula text straight from a document
///
/// A document that does not decode to a well-formed tree (unknown `type`,
/// missing fields, mismatched operator counts) yields an empty string, the
/// same way the live preview shows nothing for a half-built node.
pub fn generate_json(document: &serde_json::Value) -> String {
    match serde_json::from_value::<FormulaNode>(document.clone()) {
        Ok(tree) => generate(&tree),
        Err(err) => {
            warn!("Cannot generate formula from tree document: {err}");
            String::new()
        }
    }
}
