use std::fmt;

use crate::ast::Value;

/// Bracketed key fragments following a param name, in source order.
///
/// `a[0][b]` has the index `["0", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index(Vec<String>);

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<String>) {
        self.0.push(fragment.into());
    }

    pub fn fragments(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Index {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Index(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.0 {
            write!(f, "[{}]", fragment)?;
        }
        Ok(())
    }
}

/// A single `name[index]=value` unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,

    /// Possibly empty
    pub index: Index,

    pub value: Value,
}

impl Param {
    pub fn new(name: impl Into<String>, index: Index, value: Value) -> Self {
        Param {
            name: name.into(),
            index,
            value,
        }
    }

    /// Key path from the name through every index fragment.
    pub fn path(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.index.iter().map(String::as_str))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}={}", self.name, self.index, self.value)
    }
}
