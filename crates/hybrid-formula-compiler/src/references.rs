//! Known reference names
//!
//! The builder offers a list of reference names for autocomplete and the
//! parser treats an exact match against that list as a cell reference. The
//! list is owned by the caller and grows as the user introduces new names.

use lazy_regex::regex_is_match;

/// Names every registry created with [`ReferenceRegistry::with_defaults`] starts with
pub const DEFAULT_REFERENCES: &[&str] = &[
    "cell value 1",
    "cell value 2",
    "cell value 3",
    "cell value 4",
    "[15401]",
    "[1000]",
    "[18400]",
    "[15090]",
    "[99999]",
    "A1",
    "B1",
    "C1",
    "D1",
    "OT1.1",
    "STRUC_HRS",
];

/// How a reference name is presented in the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Added to this registry by the caller
    Added,
    /// Bracketed form, e.g. `[15401]`
    Bracketed,
    /// Spreadsheet cell, e.g. `A1`
    Spreadsheet,
    /// One of the placeholder `cell value N` names
    Placeholder,
    /// Anything else, e.g. `STRUC_HRS`
    Custom,
}

/// An appendable list of known reference names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRegistry {
    seeded: Vec<String>,
    added: Vec<String>,
}

impl ReferenceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            seeded: Vec::new(),
            added: Vec::new(),
        }
    }

    /// Create a registry seeded with [`DEFAULT_REFERENCES`]
    pub fn with_defaults() -> Self {
        Self {
            seeded: DEFAULT_REFERENCES.iter().map(|s| s.to_string()).collect(),
            added: Vec::new(),
        }
    }

    /// Add a name; returns false if it was empty or already known
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.added.push(name.to_string());
        true
    }

    /// Check for an exact match
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|known| known == name)
    }

    /// All names, seeded first, then added in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.seeded.iter().chain(self.added.iter()).map(String::as_str)
    }

    /// Number of known names
    pub fn len(&self) -> usize {
        self.seeded.len() + self.added.len()
    }

    /// Check if no names are known
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names containing `query`, ignoring case; an empty query matches all
    pub fn suggest(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .collect()
    }

    /// Forget every caller-added name, keeping the seeded ones
    pub fn clear_added(&mut self) {
        self.added.clear();
    }

    /// Classify a name the way the builder labels its suggestions
    pub fn classify(&self, name: &str) -> ReferenceKind {
        if self.added.iter().any(|added| added == name) {
            ReferenceKind::Added
        } else if name.starts_with('[') && name.ends_with(']') {
            ReferenceKind::Bracketed
        } else if regex_is_match!(r"^[A-Z]+[0-9]+$"i, name) {
            ReferenceKind::Spreadsheet
        } else if regex_is_match!(r"^cell value [0-9]+$", name) {
            ReferenceKind::Placeholder
        } else {
            ReferenceKind::Custom
        }
    }
}

impl Default for ReferenceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<S: AsRef<str>> Extend<S> for ReferenceRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.add(name.as_ref());
        }
    }
}
