//! Formula text generation
//!
//! The inverse of the parser for the trees it produces. Operator chains are
//! always parenthesized, so `A1+B1*2` comes back as `(A1+B1*2)`.

use hybrid_formula_core::{Comparator, FormulaNode, LOOKUP_FUNCTION};

/// Spelling used when writing an equality comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EqualitySpelling {
    /// `=`, as spreadsheet tools write it
    #[default]
    Single,
    /// `==`
    Double,
}

impl EqualitySpelling {
    fn as_str(self) -> &'static str {
        match self {
            EqualitySpelling::Single => "=",
            EqualitySpelling::Double => "==",
        }
    }
}

/// Options for text generation
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// How equality is written inside `IF(...)`
    pub equality: EqualitySpelling,
}

/// Generate formula text for a tree
///
/// # Example
/// ```rust
/// use hybrid_formula_compiler::{generate, parse};
///
/// assert_eq!(generate(&parse("A1+B1*2")), "(A1+B1*2)");
/// ```
pub fn generate(node: &FormulaNode) -> String {
    generate_with(node, &GenerateOptions::default())
}

/// Generate formula text with explicit options
pub fn generate_with(node: &FormulaNode, options: &GenerateOptions) -> String {
    let mut out = String::new();
    write_node(node, options, &mut out);
    out
}

/// Generate the combined preview of several formulas, joined by ` + `
pub fn generate_all(nodes: &[FormulaNode]) -> String {
    nodes.iter().map(generate).collect::<Vec<_>>().join(" + ")
}

/// Default decimal rendering; `-0` prints as `0`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn write_node(node: &FormulaNode, options: &GenerateOptions, out: &mut String) {
    match node {
        FormulaNode::CellReference(name) => out.push_str(name),
        FormulaNode::Number(value) => out.push_str(&format_number(*value)),
        // Embedded quotes are written as-is.
        FormulaNode::Text(value) => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        FormulaNode::Operator(chain) => {
            out.push('(');
            for (i, operand) in chain.operands().iter().enumerate() {
                if i > 0 {
                    if let Some(op) = chain.operator_at(i - 1) {
                        out.push(op.as_char());
                    }
                }
                write_node(operand, options, out);
            }
            out.push(')');
        }
        FormulaNode::Conditional {
            condition,
            when_true,
            when_false,
        } => {
            out.push_str("IF(");
            write_node(&condition.left, options, out);
            out.push_str(match condition.comparator {
                Comparator::Equal => options.equality.as_str(),
                other => other.as_str(),
            });
            write_node(&condition.right, options, out);
            out.push(',');
            write_node(when_true, options, out);
            out.push(',');
            write_node(when_false, options, out);
            out.push(')');
        }
        FormulaNode::Function { name, args } if name == LOOKUP_FUNCTION => {
            out.push_str("LOOKUP(");
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_node(arg, options, out);
            }
            out.push(')');
        }
        FormulaNode::Function { .. } => {}
    }
}
