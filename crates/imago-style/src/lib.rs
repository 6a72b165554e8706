//! Inline Styles
//!
//! Insertion-ordered style declaration lists and merge precedence rules.

/// Common property names used across the widget.
///
/// Declarations are stored under their CSS names; arbitrary caller
/// properties pass through untouched.
pub mod props {
    pub const ASPECT_RATIO: &str = "aspect-ratio";
    pub const OBJECT_FIT: &str = "object-fit";
    pub const OPACITY: &str = "opacity";
    pub const TRANSITION: &str = "transition";
    pub const POSITION: &str = "position";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const INSET: &str = "inset";
    pub const FILTER: &str = "filter";
    pub const POINTER_EVENTS: &str = "pointer-events";
    pub const Z_INDEX: &str = "z-index";
    pub const BACKGROUND_IMAGE: &str = "background-image";
    pub const BACKGROUND_SIZE: &str = "background-size";
    pub const BACKGROUND_POSITION: &str = "background-position";
}

/// A set of inline style declarations.
///
/// Keeps insertion order so serialized output is deterministic; setting a
/// property that already exists overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    decls: Vec<(Box<str>, Box<str>)>,
}

impl Style {
    /// Create an empty declaration set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// True when no declarations are present.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Look up a declaration value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| &**p == property)
            .map(|(_, v)| &**v)
    }

    /// True when the property is declared.
    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Set a declaration, overwriting any existing value in place.
    pub fn set(&mut self, property: impl Into<Box<str>>, value: impl Into<Box<str>>) {
        let property = property.into();
        let value = value.into();
        match self.decls.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.decls.push((property, value)),
        }
    }

    /// Set a declaration only when the property is not already declared.
    pub fn set_if_absent(&mut self, property: impl Into<Box<str>>, value: impl Into<Box<str>>) {
        let property = property.into();
        if !self.contains(&property) {
            self.decls.push((property, value.into()));
        }
    }

    /// Remove a declaration. Returns the removed value, if any.
    pub fn remove(&mut self, property: &str) -> Option<Box<str>> {
        let idx = self.decls.iter().position(|(p, _)| &**p == property)?;
        Some(self.decls.remove(idx).1)
    }

    /// Builder-style `set`.
    pub fn with(mut self, property: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
        self.set(property, value);
        self
    }

    /// Iterate declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(p, v)| (&**p, &**v))
    }

    /// Merge `overrides` over `self`: base declarations first, override
    /// declarations second, overrides winning on collision.
    pub fn merge_over(&self, overrides: &Style) -> Style {
        let mut merged = self.clone();
        for (p, v) in overrides.iter() {
            merged.set(p, v);
        }
        merged
    }

    /// Serialize as an inline style string: `"prop: value; prop: value"`.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for (p, v) in self.iter() {
            if !out.is_empty() {
                out.push_str("; ");
            }
            out.push_str(p);
            out.push_str(": ");
            out.push_str(v);
        }
        out
    }
}

impl<K: Into<Box<str>>, V: Into<Box<str>>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (p, v) in iter {
            style.set(p, v);
        }
        style
    }
}
