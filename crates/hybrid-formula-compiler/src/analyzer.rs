//! Tree metadata
//!
//! The formula store keeps a few derived facts next to every saved tree.
//! The walks do not agree on which children they visit:
//!
//! | walk                      | operator operands | condition left/right | branches | function args |
//! |---------------------------|-------------------|----------------------|----------|---------------|
//! | [`complexity_score`]      | yes               | yes                  | yes      | no            |
//! | [`collect_cell_references`] | yes             | yes                  | yes      | yes           |
//! | [`has_conditional`] / [`has_lookup`] | yes    | no                   | yes      | yes           |
//!
//! Stored metadata depends on these rules, so they are kept as they are.

use ahash::AHashSet;
use hybrid_formula_core::FormulaNode;

/// Structural size: one per node, function arguments not counted
pub fn complexity_score(node: &FormulaNode) -> usize {
    1 + match node {
        FormulaNode::CellReference(_)
        | FormulaNode::Number(_)
        | FormulaNode::Text(_)
        | FormulaNode::Function { .. } => 0,
        FormulaNode::Operator(chain) => chain.operands().iter().map(complexity_score).sum(),
        FormulaNode::Conditional {
            condition,
            when_true,
            when_false,
        } => {
            complexity_score(&condition.left)
                + complexity_score(&condition.right)
                + complexity_score(when_true)
                + complexity_score(when_false)
        }
    }
}

/// Every referenced name, once, in first-seen depth-first order
pub fn collect_cell_references(node: &FormulaNode) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut references = Vec::new();
    collect_into(node, &mut seen, &mut references);
    references
}

fn collect_into<'a>(
    node: &'a FormulaNode,
    seen: &mut AHashSet<&'a str>,
    references: &mut Vec<String>,
) {
    match node {
        FormulaNode::CellReference(name) => {
            if !name.is_empty() && seen.insert(name.as_str()) {
                references.push(name.clone());
            }
        }
        FormulaNode::Number(_) | FormulaNode::Text(_) => {}
        FormulaNode::Operator(chain) => {
            for operand in chain.operands() {
                collect_into(operand, seen, references);
            }
        }
        FormulaNode::Conditional {
            condition,
            when_true,
            when_false,
        } => {
            collect_into(&condition.left, seen, references);
            collect_into(&condition.right, seen, references);
            collect_into(when_true, seen, references);
            collect_into(when_false, seen, references);
        }
        FormulaNode::Function { args, .. } => {
            for arg in args {
                collect_into(arg, seen, references);
            }
        }
    }
}

/// Check for an `IF(...)` anywhere outside condition operands
pub fn has_conditional(node: &FormulaNode) -> bool {
    contains(node, &|n| matches!(n, FormulaNode::Conditional { .. }))
}

/// Check for a `lookup` call anywhere outside condition operands
pub fn has_lookup(node: &FormulaNode) -> bool {
    contains(node, &FormulaNode::is_lookup)
}

fn contains(node: &FormulaNode, matches: &dyn Fn(&FormulaNode) -> bool) -> bool {
    if matches(node) {
        return true;
    }
    match node {
        FormulaNode::CellReference(_) | FormulaNode::Number(_) | FormulaNode::Text(_) => false,
        FormulaNode::Operator(chain) => chain.operands().iter().any(|n| contains(n, matches)),
        FormulaNode::Conditional {
            when_true,
            when_false,
            ..
        } => contains(when_true, matches) || contains(when_false, matches),
        FormulaNode::Function { args, .. } => args.iter().any(|n| contains(n, matches)),
    }
}
