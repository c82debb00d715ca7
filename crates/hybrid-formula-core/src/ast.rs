//! Formula expression tree types

use crate::error::{Error, Result};
use std::fmt;

/// Formula expression tree
///
/// Every node is exclusively owned by its parent; trees are never shared or
/// cyclic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::wire::WireNode", into = "crate::wire::WireNode")
)]
pub enum FormulaNode {
    // === Leaves ===
    /// Reference to a cell or named value (`A1`, `[15401]`, `STRUC_HRS`)
    CellReference(String),
    /// Numeric literal
    Number(f64),
    /// Text literal
    Text(String),

    // === Composites ===
    /// Flat left-to-right arithmetic chain
    Operator(OperatorChain),
    /// `IF(condition, when_true, when_false)`
    Conditional {
        condition: Condition,
        when_true: Box<FormulaNode>,
        when_false: Box<FormulaNode>,
    },
    /// Function call; only `lookup` carries meaning
    Function { name: String, args: Vec<FormulaNode> },
}

impl FormulaNode {
    /// Create a cell reference node
    pub fn cell<S: Into<String>>(name: S) -> Self {
        FormulaNode::CellReference(name.into())
    }

    /// Create a number literal node
    pub fn number(value: f64) -> Self {
        FormulaNode::Number(value)
    }

    /// Create a text literal node
    pub fn text<S: Into<String>>(value: S) -> Self {
        FormulaNode::Text(value.into())
    }

    /// Create a conditional node
    pub fn conditional(condition: Condition, when_true: FormulaNode, when_false: FormulaNode) -> Self {
        FormulaNode::Conditional {
            condition,
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        }
    }

    /// Create a `lookup` call from its arguments
    pub fn lookup(args: Vec<FormulaNode>) -> Self {
        FormulaNode::Function {
            name: crate::LOOKUP_FUNCTION.to_string(),
            args,
        }
    }

    /// The node's type tag in the tree document format
    pub fn kind(&self) -> &'static str {
        match self {
            FormulaNode::CellReference(_) => "cellValue",
            FormulaNode::Number(_) => "number",
            FormulaNode::Text(_) => "textbox",
            FormulaNode::Operator(_) => "operator",
            FormulaNode::Conditional { .. } => "if",
            FormulaNode::Function { .. } => "function",
        }
    }

    /// Check if this node is a `lookup` call
    pub fn is_lookup(&self) -> bool {
        matches!(self, FormulaNode::Function { name, .. } if name == crate::LOOKUP_FUNCTION)
    }

    /// Check the structural invariants of the whole subtree
    ///
    /// Operator chains are checked on construction, so this covers what a
    /// hand-built tree can still get wrong: empty reference names and
    /// non-finite numbers.
    pub fn validate(&self) -> Result<()> {
        match self {
            FormulaNode::CellReference(name) if name.is_empty() => {
                Err(Error::malformed("cell reference with an empty name"))
            }
            FormulaNode::Number(value) if !value.is_finite() => Err(Error::malformed(format!(
                "number literal {value} is not finite"
            ))),
            FormulaNode::CellReference(_) | FormulaNode::Number(_) | FormulaNode::Text(_) => Ok(()),
            FormulaNode::Operator(chain) => chain.operands().iter().try_for_each(Self::validate),
            FormulaNode::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                condition.left.validate()?;
                condition.right.validate()?;
                when_true.validate()?;
                when_false.validate()
            }
            FormulaNode::Function { args, .. } => args.iter().try_for_each(Self::validate),
        }
    }
}

/// Comparison inside a conditional
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub comparator: Comparator,
    pub left: Box<FormulaNode>,
    pub right: Box<FormulaNode>,
}

impl Condition {
    /// Create a new condition
    pub fn new(comparator: Comparator, left: FormulaNode, right: FormulaNode) -> Self {
        Self {
            comparator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Operators of an [`OperatorChain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operators {
    /// One operator between each adjacent pair of operands
    PerPair(Vec<ArithmeticOperator>),
    /// Older documents: a single operator shared by every pair
    Shared(ArithmeticOperator),
}

/// A flat chain `a op b op c ...` with no precedence grouping
///
/// Holds at least two operands; a per-pair operator list always has exactly
/// one fewer entry than the operand list.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorChain {
    operands: Vec<FormulaNode>,
    operators: Operators,
}

impl OperatorChain {
    /// Create a chain with one operator per adjacent operand pair
    pub fn new(operands: Vec<FormulaNode>, operators: Vec<ArithmeticOperator>) -> Result<Self> {
        Self::check_operand_count(operands.len())?;
        if operators.len() != operands.len() - 1 {
            return Err(Error::malformed(format!(
                "{} operands need {} operators, got {}",
                operands.len(),
                operands.len() - 1,
                operators.len()
            )));
        }
        Ok(Self {
            operands,
            operators: Operators::PerPair(operators),
        })
    }

    /// Create a chain where every pair shares the same operator
    pub fn shared(operands: Vec<FormulaNode>, operator: ArithmeticOperator) -> Result<Self> {
        Self::check_operand_count(operands.len())?;
        Ok(Self {
            operands,
            operators: Operators::Shared(operator),
        })
    }

    fn check_operand_count(count: usize) -> Result<()> {
        if count < 2 {
            return Err(Error::malformed(format!(
                "operator chain needs at least 2 operands, got {count}"
            )));
        }
        Ok(())
    }

    /// The operands, in textual order
    pub fn operands(&self) -> &[FormulaNode] {
        &self.operands
    }

    /// The operator representation as stored
    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    /// Number of operands
    pub fn len(&self) -> usize {
        self.operands.len()
    }

    /// Always false; a chain holds at least two operands
    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Operator between operand `index` and operand `index + 1`
    pub fn operator_at(&self, index: usize) -> Option<ArithmeticOperator> {
        if index + 1 >= self.operands.len() {
            return None;
        }
        match &self.operators {
            Operators::PerPair(ops) => ops.get(index).copied(),
            Operators::Shared(op) => Some(*op),
        }
    }

    /// Iterate the `len() - 1` operators between operands
    pub fn iter_operators(&self) -> impl Iterator<Item = ArithmeticOperator> + '_ {
        (0..self.operands.len() - 1).filter_map(move |i| self.operator_at(i))
    }

    /// Append an operand, joined to the chain by `operator`
    pub fn push(&mut self, operator: ArithmeticOperator, operand: FormulaNode) {
        if let Operators::Shared(shared) = self.operators {
            if shared == operator {
                self.operands.push(operand);
                return;
            }
            self.expand_shared();
        }
        if let Operators::PerPair(ops) = &mut self.operators {
            ops.push(operator);
        }
        self.operands.push(operand);
    }

    /// Replace the operator between operand `index` and `index + 1`
    pub fn set_operator(&mut self, index: usize, operator: ArithmeticOperator) -> Result<()> {
        if index + 1 >= self.operands.len() {
            return Err(Error::malformed(format!(
                "no operator at position {index} in a chain of {} operands",
                self.operands.len()
            )));
        }
        self.expand_shared();
        if let Operators::PerPair(ops) = &mut self.operators {
            ops[index] = operator;
        }
        Ok(())
    }

    /// Remove operand `index` along with the operator joining it to the chain
    ///
    /// The first operand takes the operator that follows it; every other
    /// operand takes the operator that precedes it. A chain never shrinks
    /// below two operands.
    pub fn remove(&mut self, index: usize) -> Result<FormulaNode> {
        if self.operands.len() <= 2 {
            return Err(Error::malformed(
                "operator chain needs at least 2 operands",
            ));
        }
        if index >= self.operands.len() {
            return Err(Error::malformed(format!(
                "operand {index} out of bounds (count: {})",
                self.operands.len()
            )));
        }
        if let Operators::PerPair(ops) = &mut self.operators {
            ops.remove(index.saturating_sub(1));
        }
        Ok(self.operands.remove(index))
    }

    /// Split into operands and per-pair operators
    pub fn into_parts(self) -> (Vec<FormulaNode>, Vec<ArithmeticOperator>) {
        let operators = self.iter_operators().collect();
        (self.operands, operators)
    }

    fn expand_shared(&mut self) {
        if let Operators::Shared(op) = self.operators {
            self.operators = Operators::PerPair(vec![op; self.operands.len() - 1]);
        }
    }
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOperator {
    /// All operators, in symbol order `+ - * /`
    pub const ALL: [ArithmeticOperator; 4] = [
        ArithmeticOperator::Add,
        ArithmeticOperator::Subtract,
        ArithmeticOperator::Multiply,
        ArithmeticOperator::Divide,
    ];

    /// The operator's formula symbol
    pub fn as_char(&self) -> char {
        match self {
            ArithmeticOperator::Add => '+',
            ArithmeticOperator::Subtract => '-',
            ArithmeticOperator::Multiply => '*',
            ArithmeticOperator::Divide => '/',
        }
    }

    /// Parse an operator symbol character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(ArithmeticOperator::Add),
            '-' => Some(ArithmeticOperator::Subtract),
            '*' => Some(ArithmeticOperator::Multiply),
            '/' => Some(ArithmeticOperator::Divide),
            _ => None,
        }
    }

    /// Parse an operator symbol string
    pub fn from_symbol(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next().and_then(Self::from_char), chars.next()) {
            (Some(op), None) => Ok(op),
            _ => Err(Error::UnknownSymbol(s.to_string())),
        }
    }
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Comparison operators used in conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
}

impl Comparator {
    /// The comparator's symbol; equality is spelled `=`
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Equal => "=",
            Comparator::NotEqual => "<>",
            Comparator::LessThan => "<",
            Comparator::GreaterThan => ">",
            Comparator::LessEqual => "<=",
            Comparator::GreaterEqual => ">=",
        }
    }

    /// Parse a comparator symbol; both `=` and `==` mean equality
    pub fn from_symbol(s: &str) -> Result<Self> {
        match s {
            "=" | "==" => Ok(Comparator::Equal),
            "<>" => Ok(Comparator::NotEqual),
            "<" => Ok(Comparator::LessThan),
            ">" => Ok(Comparator::GreaterThan),
            "<=" => Ok(Comparator::LessEqual),
            ">=" => Ok(Comparator::GreaterEqual),
            _ => Err(Error::UnknownSymbol(s.to_string())),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
