//! Saved formula records
//!
//! When a tree is saved, the store keeps the generated text and a handful of
//! derived facts next to it so formulas can be listed and filtered without
//! re-walking every tree. [`FormulaRecord`] is that row; computing it is the
//! only part of saving that belongs to this crate.
//!
//! # Example
//!
//! ```rust
//! use hybrid_formula::FormulaRecord;
//! use hybrid_formula::ParseOptions;
//!
//! let record = FormulaRecord::from_formula(
//!     "overtime",
//!     "Overtime hours when above the threshold",
//!     "=IF(OT1.1>40,OT1.1-40,0)",
//!     &ParseOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(record.metadata.generated_text, "IF(OT1.1>40,(OT1.1-40),0)");
//! assert!(record.metadata.has_conditional);
//! assert_eq!(record.metadata.referenced_cells, vec!["OT1.1"]);
//! ```

use crate::error::Result;
use hybrid_formula_compiler::{
    collect_cell_references, complexity_score, generate_with, has_conditional, has_lookup,
    parse_with, GenerateOptions, ParseOptions,
};
use hybrid_formula_core::FormulaNode;
use serde::{Deserialize, Serialize};

/// Facts derived from a tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaMetadata {
    /// Formula text for the tree
    pub generated_text: String,
    /// Type tag of the root node (`operator`, `if`, ...)
    pub root_type: String,
    pub complexity_score: usize,
    pub has_conditional: bool,
    pub has_lookup: bool,
    /// Distinct reference names, first-seen order
    pub referenced_cells: Vec<String>,
}

impl FormulaMetadata {
    /// Derive metadata with default generation options
    pub fn of(tree: &FormulaNode) -> Self {
        Self::with_options(tree, &GenerateOptions::default())
    }

    /// Derive metadata with explicit generation options
    pub fn with_options(tree: &FormulaNode, options: &GenerateOptions) -> Self {
        Self {
            generated_text: generate_with(tree, options),
            root_type: tree.kind().to_string(),
            complexity_score: complexity_score(tree),
            has_conditional: has_conditional(tree),
            has_lookup: has_lookup(tree),
            referenced_cells: collect_cell_references(tree),
        }
    }
}

/// A named formula together with its tree and derived metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaRecord {
    pub name: String,
    pub description: String,
    pub tree: FormulaNode,
    #[serde(flatten)]
    pub metadata: FormulaMetadata,
}

impl FormulaRecord {
    /// Build a record from a tree, rejecting trees that break an invariant
    pub fn from_tree<N, D>(name: N, description: D, tree: FormulaNode) -> Result<Self>
    where
        N: Into<String>,
        D: Into<String>,
    {
        tree.validate()?;
        let metadata = FormulaMetadata::of(&tree);
        Ok(Self {
            name: name.into(),
            description: description.into(),
            tree,
            metadata,
        })
    }

    /// Parse formula text and build a record from the resulting tree
    pub fn from_formula<N, D>(
        name: N,
        description: D,
        formula: &str,
        options: &ParseOptions,
    ) -> Result<Self>
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self::from_tree(name, description, parse_with(formula, options))
    }

    /// Replace the tree and recompute the metadata
    pub fn update_tree(&mut self, tree: FormulaNode) -> Result<()> {
        tree.validate()?;
        self.metadata = FormulaMetadata::of(&tree);
        self.tree = tree;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hybrid_formula_core::{ArithmeticOperator, OperatorChain};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metadata_for_lookup() {
        let tree = hybrid_formula_compiler::parse("LOOKUP(A1,B:B,C:C)");
        let metadata = FormulaMetadata::of(&tree);
        assert_eq!(metadata.generated_text, "LOOKUP(A1,B:B,C:C)");
        assert_eq!(metadata.root_type, "function");
        assert_eq!(metadata.complexity_score, 1);
        assert!(metadata.has_lookup);
        assert!(!metadata.has_conditional);
        assert_eq!(metadata.referenced_cells, vec!["A1", "B:B", "C:C"]);
    }

    #[test]
    fn test_record_rejects_invalid_tree() {
        let result = FormulaRecord::from_tree("bad", "", FormulaNode::cell(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_tree_refreshes_metadata() {
        let mut record =
            FormulaRecord::from_formula("pay", "", "A1", &ParseOptions::default()).unwrap();
        assert_eq!(record.metadata.complexity_score, 1);

        let chain = OperatorChain::new(
            vec![FormulaNode::cell("A1"), FormulaNode::cell("STRUC_HRS")],
            vec![ArithmeticOperator::Multiply],
        )
        .unwrap();
        record.update_tree(FormulaNode::Operator(chain)).unwrap();

        assert_eq!(record.metadata.generated_text, "(A1*STRUC_HRS)");
        assert_eq!(record.metadata.root_type, "operator");
        assert_eq!(record.metadata.complexity_score, 3);
        assert_eq!(record.metadata.referenced_cells, vec!["A1", "STRUC_HRS"]);
    }
}
