//! Formula parser
//!
//! A recursive descent parser that classifies each substring by trying an
//! ordered list of pattern rules; the first rule that matches wins. The
//! order matters because the patterns overlap (`A1` is both a spreadsheet
//! reference and an identifier, `(A1+B1)` is both a grouping and an operator
//! expression).
//!
//! Arithmetic has no precedence: `2+3*4` becomes one flat chain of three
//! operands joined by `+` and `*`.

use crate::error::{FormulaError, FormulaResult};
use crate::references::ReferenceRegistry;
use crate::scanner::{
    contains_top_level_operator, find_top_level, scan, split_call, split_top_level,
    wrapped_interior, Delimiter,
};
use hybrid_formula_core::{ArithmeticOperator, Comparator, Condition, FormulaNode, OperatorChain};
use lazy_regex::regex_is_match;
use log::{debug, trace, warn};
use std::sync::OnceLock;

/// Comparator symbols in matching order; longer spellings come first so
/// that `<>` is not read as `<` followed by a stray `>`.
const COMPARATOR_CANDIDATES: [(&str, Comparator); 7] = [
    ("<>", Comparator::NotEqual),
    (">=", Comparator::GreaterEqual),
    ("<=", Comparator::LessEqual),
    ("==", Comparator::Equal),
    (">", Comparator::GreaterThan),
    ("<", Comparator::LessThan),
    ("=", Comparator::Equal),
];

/// Options for parsing
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Names treated as cell references on an exact match
    pub known_references: ReferenceRegistry,
    /// Maximum number of nested expression levels (default: 256)
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            known_references: ReferenceRegistry::with_defaults(),
            max_nesting_depth: 256,
        }
    }
}

static DEFAULT_OPTIONS: OnceLock<ParseOptions> = OnceLock::new();

fn default_options() -> &'static ParseOptions {
    DEFAULT_OPTIONS.get_or_init(ParseOptions::default)
}

/// Parse formula text into a tree, never failing
///
/// Text that cannot be parsed comes back as a [`FormulaNode::Text`] holding
/// the input (minus surrounding whitespace and a leading `=`).
///
/// # Example
/// ```rust
/// use hybrid_formula_compiler::parse;
/// use hybrid_formula_core::FormulaNode;
///
/// assert_eq!(parse("=A1"), FormulaNode::cell("A1"));
/// assert_eq!(parse("IF(A1"), FormulaNode::text("IF(A1"));
/// ```
pub fn parse(text: &str) -> FormulaNode {
    parse_with(text, default_options())
}

/// Parse formula text with explicit options, never failing
pub fn parse_with(text: &str, options: &ParseOptions) -> FormulaNode {
    let formula = strip_formula(text);

    let err = match ExpressionParser::new(options).parse_expression(formula) {
        Ok(node) => return node,
        Err(err) => err,
    };
    debug!("Parsing '{formula}' failed: {err}");

    if contains_top_level_operator(formula) {
        match ExpressionParser::new(options).parse_operator_chain(formula) {
            Ok(node) => return node,
            Err(err) => debug!("Operator retry for '{formula}' failed: {err}"),
        }
    }

    debug!("Keeping '{formula}' as text");
    FormulaNode::Text(formula.to_string())
}

/// Parse formula text, reporting the first internal error
pub fn try_parse(text: &str) -> FormulaResult<FormulaNode> {
    try_parse_with(text, default_options())
}

/// Parse formula text with explicit options, reporting the first internal error
pub fn try_parse_with(text: &str, options: &ParseOptions) -> FormulaResult<FormulaNode> {
    ExpressionParser::new(options).parse_expression(strip_formula(text))
}

fn strip_formula(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('=').unwrap_or(text).trim()
}

/// Split at top-level arithmetic operators
///
/// An operator met while the current segment is still blank stays part of
/// the segment, which keeps the sign in `A1*-2`.
fn split_operator_chain(expr: &str) -> (Vec<&str>, Vec<ArithmeticOperator>) {
    let mut segments = Vec::new();
    let mut operators = Vec::new();
    let mut start = 0;

    for (offset, c, state) in scan(expr) {
        if !state.is_top_level() {
            continue;
        }
        let Some(op) = ArithmeticOperator::from_char(c) else {
            continue;
        };
        let segment = expr[start..offset].trim();
        if !segment.is_empty() {
            segments.push(segment);
            operators.push(op);
            start = offset + c.len_utf8();
        }
    }

    let last = expr[start..].trim();
    if !last.is_empty() {
        segments.push(last);
    }
    (segments, operators)
}

/// Interior of a quoted literal
///
/// Embedded quotes are allowed since text is written unescaped; a top-level
/// operator means the quotes belong to separate operands (`"a"+"b"`).
fn quoted_interior(expr: &str) -> Option<&str> {
    let quote = expr.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = expr.strip_prefix(quote)?.strip_suffix(quote)?;
    (!contains_top_level_operator(expr)).then_some(inner)
}

/// Argument text of the call `expr` starts with
///
/// Anything after the closing parenthesis is ignored.
fn call_arguments<'e>(expr: &'e str, call: &str) -> FormulaResult<&'e str> {
    let (content, rest) = split_call(expr)
        .ok_or_else(|| FormulaError::Parse(format!("Unterminated {call} call: '{expr}'")))?;
    if !rest.trim().is_empty() {
        debug!("Ignoring '{}' after the {call} call in '{expr}'", rest.trim());
    }
    Ok(content)
}

fn parse_number(expr: &str) -> Option<f64> {
    expr.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// Recursive parser state
struct ExpressionParser<'o> {
    options: &'o ParseOptions,
    depth: usize,
}

impl<'o> ExpressionParser<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self { options, depth: 0 }
    }

    fn parse_expression(&mut self, expr: &str) -> FormulaResult<FormulaNode> {
        if self.depth >= self.options.max_nesting_depth {
            warn!(
                "Formula nesting exceeds {} levels",
                self.options.max_nesting_depth
            );
            return Err(FormulaError::NestingTooDeep {
                limit: self.options.max_nesting_depth,
            });
        }

        self.depth += 1;
        let result = self.parse_rules(expr.trim());
        self.depth -= 1;
        result
    }

    fn parse_rules(&mut self, expr: &str) -> FormulaResult<FormulaNode> {
        if regex_is_match!(r"^if\s*\("i, expr) {
            trace!("'{expr}': conditional");
            return self.parse_conditional(expr);
        }

        if starts_with_ignore_case(expr, "LOOKUP(") {
            trace!("'{expr}': lookup");
            return self.parse_lookup(expr);
        }

        if let Some(inner) = quoted_interior(expr) {
            trace!("'{expr}': quoted text");
            return Ok(FormulaNode::text(inner));
        }

        if wrapped_interior(expr, Delimiter::Bracket).is_some() {
            trace!("'{expr}': bracketed reference");
            return Ok(FormulaNode::cell(expr));
        }

        if let Some(value) = parse_number(expr) {
            trace!("'{expr}': number");
            return Ok(FormulaNode::number(value));
        }

        if self.options.known_references.contains(expr) {
            trace!("'{expr}': known reference");
            return Ok(FormulaNode::cell(expr));
        }

        if regex_is_match!(r"^[A-Z]+[0-9]+$"i, expr) {
            trace!("'{expr}': spreadsheet reference");
            return Ok(FormulaNode::cell(expr));
        }

        if regex_is_match!(r"^[A-Za-z0-9_.]+$", expr) {
            trace!("'{expr}': identifier");
            return Ok(FormulaNode::cell(expr));
        }

        if contains_top_level_operator(expr) {
            trace!("'{expr}': operator expression");
            return self.parse_operator_chain(expr);
        }

        self.parse_grouping(expr)
    }

    /// Grouping parentheses, then the raw fallback
    fn parse_grouping(&mut self, expr: &str) -> FormulaResult<FormulaNode> {
        if let Some(inner) = wrapped_interior(expr, Delimiter::Paren) {
            trace!("'{expr}': grouping");
            return self.parse_expression(inner);
        }

        if expr.is_empty() {
            return Ok(FormulaNode::text(""));
        }

        trace!("'{expr}': raw reference");
        Ok(FormulaNode::cell(expr))
    }

    fn parse_operator_chain(&mut self, expr: &str) -> FormulaResult<FormulaNode> {
        let (segments, operators) = split_operator_chain(expr);

        if segments.len() < 2 {
            let single = segments.first().copied().unwrap_or(expr);
            // `-A1` splits into itself and would recurse forever.
            if single == expr {
                return Err(FormulaError::Parse(format!(
                    "Operator without a left operand in '{expr}'"
                )));
            }
            return self.parse_expression(single);
        }

        if operators.len() != segments.len() - 1 {
            return Err(FormulaError::Parse(format!(
                "Dangling operator at the end of '{expr}'"
            )));
        }

        let operands = segments
            .iter()
            .map(|segment| self.parse_expression(segment))
            .collect::<FormulaResult<Vec<_>>>()?;
        Ok(FormulaNode::Operator(OperatorChain::new(operands, operators)?))
    }

    fn parse_conditional(&mut self, expr: &str) -> FormulaResult<FormulaNode> {
        let content = call_arguments(expr, "IF")?;
        let args = split_top_level(content, ',');

        if args.len() < 3 {
            return Err(FormulaError::Parse(format!(
                "IF requires 3 arguments, got {}",
                args.len()
            )));
        }

        let condition = self.parse_condition(args[0])?;
        let when_true = self.parse_expression(args[1])?;
        let when_false = self.parse_expression(args[2])?;
        Ok(FormulaNode::conditional(condition, when_true, when_false))
    }

    fn parse_condition(&mut self, text: &str) -> FormulaResult<Condition> {
        for (symbol, comparator) in COMPARATOR_CANDIDATES {
            if let Some(index) = find_top_level(text, symbol) {
                let left = self.parse_expression(&text[..index])?;
                let right = self.parse_expression(&text[index + symbol.len()..])?;
                return Ok(Condition::new(comparator, left, right));
            }
        }

        // A bare value is compared against zero.
        let left = self.parse_expression(text)?;
        Ok(Condition::new(
            Comparator::Equal,
            left,
            FormulaNode::number(0.0),
        ))
    }

    fn parse_lookup(&mut self, expr: &str) -> FormulaResult<FormulaNode> {
        let content = call_arguments(expr, "LOOKUP")?;

        let args = split_top_level(content, ',')
            .into_iter()
            .map(|arg| self.parse_expression(arg))
            .collect::<FormulaResult<Vec<_>>>()?;
        Ok(FormulaNode::lookup(args))
    }
}
