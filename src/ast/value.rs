use std::fmt;

/// The right-hand side of a param.
///
/// The parser and the [`Value::piped`] / [`Value::commaed`] constructors only
/// build list variants with at least two items; a value with no delimiter is
/// a [`Value::Scalar`]. Code building the variants directly must keep that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Leaf string
    ///
    /// # Example
    /// ```text
    /// ?k=v
    /// ```
    Scalar(String),

    /// `|`-separated list
    ///
    /// # Example
    /// ```text
    /// ?k=a|b|c
    /// ```
    Piped(Vec<Value>),

    /// `,`-separated list
    ///
    /// # Example
    /// ```text
    /// ?k=a,b
    /// ```
    Commaed(Vec<Value>),
}

impl Value {
    pub fn scalar(s: impl Into<String>) -> Self {
        Value::Scalar(s.into())
    }

    /// Builds a piped list of `first` followed by `rest`. With an empty
    /// `rest` this is just `first`.
    pub fn piped(first: Value, rest: Vec<Value>) -> Self {
        if rest.is_empty() {
            return first;
        }
        let mut items = Vec::with_capacity(rest.len() + 1);
        items.push(first);
        items.extend(rest);
        Value::Piped(items)
    }

    /// Builds a comma list of `first` followed by `rest`. With an empty
    /// `rest` this is just `first`.
    pub fn commaed(first: Value, rest: Vec<Value>) -> Self {
        if rest.is_empty() {
            return first;
        }
        let mut items = Vec::with_capacity(rest.len() + 1);
        items.push(first);
        items.extend(rest);
        Value::Commaed(items)
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// List items, or `None` for a scalar.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Scalar(_) => None,
            Value::Piped(items) | Value::Commaed(items) => Some(items),
        }
    }

    pub fn is_list(&self) -> bool {
        !matches!(self, Value::Scalar(_))
    }

    /// Human-readable variant name
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Piped(_) => "piped",
            Value::Commaed(_) => "commaed",
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value], sep: char) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => f.write_str(s),
            Value::Piped(items) => write_joined(f, items, '|'),
            Value::Commaed(items) => write_joined(f, items, ','),
        }
    }
}
