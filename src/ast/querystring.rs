use std::fmt;

use crate::ast::Param;

/// Root of a parsed query string: `?` followed by one or more params.
///
/// Params are kept in input order. The parser never produces an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Querystring {
    pub params: Vec<Param>,
}

impl Querystring {
    pub fn new(params: Vec<Param>) -> Self {
        Querystring { params }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// First param with the given name.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }
}

impl<'a> IntoIterator for &'a Querystring {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// Canonical form: no whitespace, list items in original order.
impl fmt::Display for Querystring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("?")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}", param)?;
        }
        Ok(())
    }
}
