//! Rendering of parsed query strings.
//!
//! Two renderings are available:
//!
//! - **Canonical** via [`to_canonical()`] - the query string itself, with no
//!   whitespace and list items in their original order. Parsing it again yields
//!   an equal tree.
//! - **JSON tree** via [`tree_to_json()`], [`to_json()`] and
//!   [`to_json_pretty()`] - the structure of the tree, for tooling.
//!
//! # Examples
//!
//! ```
//! use qs_grammar::{parse, output::{to_canonical, to_json}};
//!
//! let qs = parse("?tags = a | b").unwrap();
//! assert_eq!(to_canonical(&qs), "?tags=a|b");
//! assert_eq!(
//!     to_json(&qs),
//!     r#"{"params":[{"index":[],"name":"tags","value":{"piped":["a","b"]}}]}"#
//! );
//! ```

use serde_json::{Map, Value as Json, json};

use crate::ast::{Param, Querystring, Value};

pub fn to_canonical(qs: &Querystring) -> String {
    qs.to_string()
}

/// JSON structure of a whole query string.
///
/// ```text
/// {"params": [{"name": "k", "index": ["0"], "value": {"scalar": "v"}}]}
/// ```
pub fn tree_to_json(qs: &Querystring) -> Json {
    json!({
        "params": qs.iter().map(param_to_json).collect::<Vec<_>>(),
    })
}

pub fn param_to_json(param: &Param) -> Json {
    json!({
        "name": param.name,
        "index": param.index.fragments(),
        "value": value_to_json(&param.value),
    })
}

/// Tagged by variant name: `{"scalar": ..}`, `{"piped": [..]}` or `{"commaed": [..]}`.
pub fn value_to_json(value: &Value) -> Json {
    let inner = match value {
        Value::Scalar(s) => Json::String(s.clone()),
        Value::Piped(items) | Value::Commaed(items) => {
            Json::Array(items.iter().map(item_to_json).collect())
        }
    };
    let mut tagged = Map::new();
    tagged.insert(value.kind_name().to_string(), inner);
    Json::Object(tagged)
}

// List items are scalars in practice; anything else keeps its tag.
fn item_to_json(item: &Value) -> Json {
    match item {
        Value::Scalar(s) => Json::String(s.clone()),
        nested => value_to_json(nested),
    }
}

pub fn to_json(qs: &Querystring) -> String {
    tree_to_json(qs).to_string()
}

pub fn to_json_pretty(qs: &Querystring) -> String {
    format!("{:#}", tree_to_json(qs))
}
