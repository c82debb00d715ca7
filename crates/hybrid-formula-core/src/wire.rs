//! Tree document format
//!
//! The editor and the formula store exchange trees as JSON, one object per
//! node with a `type` discriminant:
//!
//! ```json
//! {"type": "operator", "operators": ["+", "*"], "args": [
//!     {"type": "cellValue", "value": "A1"},
//!     {"type": "cellValue", "value": "B1"},
//!     {"type": "number", "value": 2}
//! ]}
//! ```
//!
//! Older documents store a single `"operator"` shared by every operand pair
//! instead of the `"operators"` list; both shapes decode. Decoding checks the
//! tree invariants, so a [`FormulaNode`] obtained from a document is always
//! well formed.

use crate::ast::{ArithmeticOperator, Comparator, Condition, FormulaNode, OperatorChain, Operators};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A node exactly as it appears in a tree document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireNode {
    #[serde(rename = "cellValue")]
    CellValue { value: String },

    #[serde(rename = "number")]
    Number { value: f64 },

    #[serde(rename = "textbox")]
    Textbox { value: String },

    #[serde(rename = "operator")]
    Operator {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        operators: Option<Vec<String>>,
        /// Legacy shared operator
        #[serde(default, skip_serializing_if = "Option::is_none")]
        operator: Option<String>,
        #[serde(default)]
        args: Vec<WireNode>,
    },

    #[serde(rename = "if")]
    If {
        condition: WireCondition,
        #[serde(rename = "trueValue")]
        true_value: Box<WireNode>,
        #[serde(rename = "falseValue")]
        false_value: Box<WireNode>,
    },

    #[serde(rename = "function")]
    Function {
        name: String,
        #[serde(default)]
        args: Vec<WireNode>,
    },
}

/// The `condition` object of an `if` node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCondition {
    pub operator: String,
    pub left: Box<WireNode>,
    pub right: Box<WireNode>,
}

impl TryFrom<WireNode> for FormulaNode {
    type Error = Error;

    fn try_from(node: WireNode) -> Result<Self> {
        match node {
            WireNode::CellValue { value } => {
                if value.is_empty() {
                    return Err(Error::malformed("cellValue node with an empty value"));
                }
                Ok(FormulaNode::CellReference(value))
            }
            WireNode::Number { value } => Ok(FormulaNode::Number(value)),
            WireNode::Textbox { value } => Ok(FormulaNode::Text(value)),
            WireNode::Operator {
                operators,
                operator,
                args,
            } => {
                let operands = decode_all(args)?;
                let chain = match (operators, operator) {
                    (Some(ops), _) if !ops.is_empty() => {
                        let ops = ops
                            .iter()
                            .map(|s| ArithmeticOperator::from_symbol(s))
                            .collect::<Result<Vec<_>>>()?;
                        OperatorChain::new(operands, ops)?
                    }
                    (_, Some(op)) => {
                        OperatorChain::shared(operands, ArithmeticOperator::from_symbol(&op)?)?
                    }
                    _ => {
                        return Err(Error::malformed(
                            "operator node has neither `operators` nor `operator`",
                        ))
                    }
                };
                Ok(FormulaNode::Operator(chain))
            }
            WireNode::If {
                condition,
                true_value,
                false_value,
            } => {
                let comparator = Comparator::from_symbol(&condition.operator)?;
                let left = FormulaNode::try_from(*condition.left)?;
                let right = FormulaNode::try_from(*condition.right)?;
                Ok(FormulaNode::conditional(
                    Condition::new(comparator, left, right),
                    FormulaNode::try_from(*true_value)?,
                    FormulaNode::try_from(*false_value)?,
                ))
            }
            WireNode::Function { name, args } => Ok(FormulaNode::Function {
                name,
                args: decode_all(args)?,
            }),
        }
    }
}

fn decode_all(nodes: Vec<WireNode>) -> Result<Vec<FormulaNode>> {
    nodes.into_iter().map(FormulaNode::try_from).collect()
}

impl From<FormulaNode> for WireNode {
    fn from(node: FormulaNode) -> Self {
        match node {
            FormulaNode::CellReference(value) => WireNode::CellValue { value },
            FormulaNode::Number(value) => WireNode::Number { value },
            FormulaNode::Text(value) => WireNode::Textbox { value },
            FormulaNode::Operator(chain) => {
                let (operators, operator) = match chain.operators() {
                    Operators::PerPair(ops) => {
                        (Some(ops.iter().map(|op| op.to_string()).collect()), None)
                    }
                    Operators::Shared(op) => (None, Some(op.to_string())),
                };
                let (operands, _) = chain.into_parts();
                WireNode::Operator {
                    operators,
                    operator,
                    args: operands.into_iter().map(WireNode::from).collect(),
                }
            }
            FormulaNode::Conditional {
                condition,
                when_true,
                when_false,
            } => WireNode::If {
                condition: WireCondition {
                    operator: condition.comparator.as_str().to_string(),
                    left: Box::new(WireNode::from(*condition.left)),
                    right: Box::new(WireNode::from(*condition.right)),
                },
                true_value: Box::new(WireNode::from(*when_true)),
                false_value: Box::new(WireNode::from(*when_false)),
            },
            FormulaNode::Function { name, args } => WireNode::Function {
                name,
                args: args.into_iter().map(WireNode::from).collect(),
            },
        }
    }
}
