//! Multi-valued filter fields flattened into one delimited string.
//!
//! The collection endpoint takes a flat `key=value` query, so a set of
//! selected checkboxes (countries, tags) travels as a single comma-joined
//! value. [`CheckboxSet`] keeps the tokens in first-insertion order so the
//! encoded form is reproducible for the same sequence of toggles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between tokens in the encoded form.
pub const DELIMITER: char = ',';

/// An insertion-ordered set of filter tokens.
///
/// Encodes to `a,b,c`; the empty set encodes to the empty string. Every
/// token keeps the position of its first insertion even after it is
/// deselected, so toggling a token off and on again restores the encoding.
/// Equality compares the selected tokens in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CheckboxSet {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    token: String,
    selected: bool,
}

impl CheckboxSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse an encoded value.
    ///
    /// Splits on [`DELIMITER`], drops empty segments and repeated tokens
    /// (the first occurrence wins).
    #[must_use]
    pub fn decode(encoded: &str) -> Self {
        let mut set = Self::new();
        for token in encoded.split(DELIMITER) {
            set.insert(token);
        }
        set
    }

    /// Join the selected tokens with [`DELIMITER`] in first-insertion order.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            out.push_str(token);
        }
        out
    }

    /// Returns true if `token` is selected.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.entry(token).is_some_and(|e| e.selected)
    }

    /// Flip membership of `token`.
    ///
    /// Returns `true` when the token is selected after the call. Empty tokens
    /// and tokens containing the delimiter cannot be represented in the
    /// encoded form and are ignored.
    pub fn toggle(&mut self, token: &str) -> bool {
        if !Self::is_representable(token) {
            tracing::debug!(token, "ignoring unrepresentable checkbox token");
            return false;
        }
        match self.entries.iter_mut().find(|e| e.token == token) {
            Some(entry) => {
                entry.selected = !entry.selected;
                entry.selected
            }
            None => {
                self.push(token);
                true
            }
        }
    }

    /// Select `token` if it is not already selected.
    ///
    /// Returns `true` if the set changed.
    pub fn insert(&mut self, token: &str) -> bool {
        if !Self::is_representable(token) {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.token == token) {
            Some(entry) if entry.selected => false,
            Some(entry) => {
                entry.selected = true;
                true
            }
            None => {
                self.push(token);
                true
            }
        }
    }

    /// Iterate over selected tokens in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.token.as_str())
    }

    /// Number of selected tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.entries.iter().any(|e| e.selected)
    }

    /// Deselect everything. Token positions are kept.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
    }

    fn entry(&self, token: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.token == token)
    }

    fn push(&mut self, token: &str) {
        self.entries.push(Entry {
            token: token.to_string(),
            selected: true,
        });
    }

    fn is_representable(token: &str) -> bool {
        !token.is_empty() && !token.contains(DELIMITER)
    }
}

impl PartialEq for CheckboxSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for CheckboxSet {}

impl fmt::Display for CheckboxSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<String> for CheckboxSet {
    fn from(value: String) -> Self {
        Self::decode(&value)
    }
}

impl From<CheckboxSet> for String {
    fn from(value: CheckboxSet) -> Self {
        value.encode()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CheckboxSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for token in iter {
            set.insert(token.as_ref());
        }
        set
    }
}
