//! Delimiter-aware scanning
//!
//! Every split the parser makes (operators, comparators, argument commas) is
//! only legal at a *top-level* position: outside any parentheses, outside any
//! brackets, and outside a quoted span.
//!
//! `"` and `'` toggle one shared quoting flag, so a text such as `"it's"`
//! leaves the scanner inside quotes after the closing `"`.

use hybrid_formula_core::ArithmeticOperator;
use std::str::CharIndices;

/// Nesting state after a character has been consumed
///
/// Depths go negative on unbalanced closers; such positions are never top
/// level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub paren_depth: i32,
    pub bracket_depth: i32,
    pub in_quotes: bool,
}

impl ScanState {
    /// True outside parentheses, brackets and quotes
    pub fn is_top_level(&self) -> bool {
        !self.in_quotes && self.paren_depth == 0 && self.bracket_depth == 0
    }

    fn step(&mut self, c: char) {
        match c {
            '"' | '\'' => self.in_quotes = !self.in_quotes,
            _ if self.in_quotes => {}
            '(' => self.paren_depth += 1,
            ')' => self.paren_depth -= 1,
            '[' => self.bracket_depth += 1,
            ']' => self.bracket_depth -= 1,
            _ => {}
        }
    }
}

/// Iterator over `(byte offset, char, state after char)`
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    chars: CharIndices<'a>,
    state: ScanState,
}

impl Iterator for Scanner<'_> {
    type Item = (usize, char, ScanState);

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, c) = self.chars.next()?;
        self.state.step(c);
        Some((offset, c, self.state))
    }
}

/// Scan `text` from the start
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner {
        chars: text.char_indices(),
        state: ScanState::default(),
    }
}

/// Check if an arithmetic operator appears at top level
pub fn contains_top_level_operator(text: &str) -> bool {
    scan(text).any(|(_, c, state)| {
        state.is_top_level() && ArithmeticOperator::from_char(c).is_some()
    })
}

/// Split on a top-level separator, trimming each piece
///
/// Empty pieces between separators are kept; an empty trailing piece is
/// dropped, so `"a,"` yields `["a"]` and `"a,,b"` yields `["a", "", "b"]`.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (offset, c, state) in scan(text) {
        if c == separator && state.is_top_level() {
            pieces.push(text[start..offset].trim());
            start = offset + c.len_utf8();
        }
    }

    let last = text[start..].trim();
    if !last.is_empty() {
        pieces.push(last);
    }
    pieces
}

/// Byte offset of the first top-level occurrence of `needle`
pub fn find_top_level(text: &str, needle: &str) -> Option<usize> {
    scan(text)
        .find(|(offset, _, state)| state.is_top_level() && text[*offset..].starts_with(needle))
        .map(|(offset, _, _)| offset)
}

/// Which delimiter pair [`wrapped_interior`] looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Paren,
    Bracket,
}

impl Delimiter {
    fn open(self) -> char {
        match self {
            Delimiter::Paren => '(',
            Delimiter::Bracket => '[',
        }
    }

    fn close(self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
        }
    }

    fn depth(self, state: &ScanState) -> i32 {
        match self {
            Delimiter::Paren => state.paren_depth,
            Delimiter::Bracket => state.bracket_depth,
        }
    }
}

/// The interior of `text` if it is fully wrapped in one delimiter pair
///
/// `(A1)` is wrapped; `(A1)+(B1)` is not, because the first `(` closes
/// before the end.
pub fn wrapped_interior(text: &str, delimiter: Delimiter) -> Option<&str> {
    if !text.starts_with(delimiter.open()) || !text.ends_with(delimiter.close()) {
        return None;
    }

    for (offset, c, state) in scan(text) {
        if delimiter.depth(&state) <= 0 {
            return (offset + c.len_utf8() == text.len()).then(|| &text[1..text.len() - 1]);
        }
    }
    None
}

/// Split the call starting at the first `(` in `text`
///
/// Returns the argument text between the parentheses and whatever follows
/// the closing `)`. Counts parentheses only; `None` when the call never
/// closes.
pub fn split_call(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let mut depth = 0;

    for (offset, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + offset;
                    return Some((&text[open + 1..close], &text[close + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}
