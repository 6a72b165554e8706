//! Breakpoint Tables
//!
//! Maps from a pixel-width threshold to a target image width or CSS length.

use serde::{Deserialize, Serialize};

/// A breakpoint value: either a pixel width or an arbitrary CSS length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BreakpointValue {
    /// Numeric pixel width (usable as a srcset width descriptor).
    Width(u32),
    /// Arbitrary CSS length expression, e.g. `"50vw"`.
    Length(String),
}

impl BreakpointValue {
    /// Coerce to a pixel width.
    ///
    /// Lengths parse like `parseInt`: the leading base-10 digit run counts
    /// (`"640"` → 640, `"50vw"` → 50), anything without one is non-numeric.
    pub fn as_width(&self) -> Option<u32> {
        match self {
            Self::Width(w) => Some(*w),
            Self::Length(s) => leading_u32(s),
        }
    }
}

impl From<u32> for BreakpointValue {
    fn from(w: u32) -> Self {
        Self::Width(w)
    }
}

impl From<&str> for BreakpointValue {
    fn from(s: &str) -> Self {
        Self::Length(s.to_string())
    }
}

impl From<String> for BreakpointValue {
    fn from(s: String) -> Self {
        Self::Length(s)
    }
}

/// Parse the leading base-10 digit run of a string.
fn leading_u32(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let digits: &str = {
        let end = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        &s[..end]
    };
    digits.parse().ok()
}

/// A breakpoint table.
///
/// Keys are always numeric pixel thresholds; entries keep insertion order
/// and are sorted by key only when derivations ask for it. Duplicate keys
/// are allowed and keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    entries: Vec<(u32, BreakpointValue)>,
}

impl Breakpoints {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry.
    pub fn insert(&mut self, key: u32, value: impl Into<BreakpointValue>) {
        self.entries.push((key, value.into()));
    }

    /// Add an entry with a string key.
    ///
    /// Keys are always pixel thresholds, so the key must carry a leading
    /// numeric component; returns false (and stores nothing) otherwise.
    pub fn insert_str(&mut self, key: &str, value: impl Into<BreakpointValue>) -> bool {
        match leading_u32(key) {
            Some(k) => {
                self.insert(k, value);
                true
            }
            None => false,
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: u32, value: impl Into<BreakpointValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BreakpointValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Entries sorted ascending by key; stable for equal keys.
    pub fn sorted_entries(&self) -> Vec<(u32, &BreakpointValue)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }
}

impl<V: Into<BreakpointValue>> FromIterator<(u32, V)> for Breakpoints {
    fn from_iter<I: IntoIterator<Item = (u32, V)>>(iter: I) -> Self {
        let mut table = Breakpoints::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}
