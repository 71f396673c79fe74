//! Flattening of a parsed query string into nested JSON, the way
//! request-parameter binders read query strings.
//!
//! ```text
//! ?user[name]=ann&user[roles]=admin|dev&ids[0]=7&ids[1]=9
//! ```
//!
//! becomes
//!
//! ```text
//! {"ids": ["7", "9"], "user": {"name": "ann", "roles": ["admin", "dev"]}}
//! ```
//!
//! Rules:
//! - the path is the param name followed by its index fragments
//! - a scalar becomes a string, a piped or comma list an array of strings
//! - a repeated leaf merges into an array in input order
//! - an object whose keys are exactly `0..n` is turned into an array

use serde_json::{Map, Value as Json};
use tracing::trace;

use crate::ast::{Param, Querystring, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// The same path is used both as a value and as a container
    #[error("conflicting use of '{path}' as both a value and a container")]
    Conflict { path: String },
}

pub fn flatten(qs: &Querystring) -> Result<Map<String, Json>, FlattenError> {
    let mut root = Map::new();
    for param in qs {
        insert(&mut root, param)?;
    }

    for value in root.values_mut() {
        compact(value);
    }
    Ok(root)
}

fn leaf(value: &Value) -> Json {
    match value {
        Value::Scalar(s) => Json::String(s.clone()),
        Value::Piped(items) | Value::Commaed(items) => Json::Array(items.iter().map(leaf).collect()),
    }
}

fn insert(root: &mut Map<String, Json>, param: &Param) -> Result<(), FlattenError> {
    let path: Vec<&str> = param.path().collect();
    let key_path = param.name.clone() + &param.index.to_string();
    trace!(path = %key_path, "flatten");

    let conflict = || FlattenError::Conflict {
        path: key_path.clone(),
    };

    // path always holds at least the name
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut node = root;
    for key in parents {
        let child = node
            .entry(key.to_string())
            .or_insert_with(|| Json::Object(Map::new()));
        node = match child {
            Json::Object(map) => map,
            _ => return Err(conflict()),
        };
    }

    let value = leaf(&param.value);
    match node.get_mut(*last) {
        None => {
            node.insert(last.to_string(), value);
        }
        Some(Json::Object(_)) => return Err(conflict()),
        Some(existing) => merge(existing, value),
    }
    Ok(())
}

/// Appends `value` to `existing`, turning a lone string into an array.
fn merge(existing: &mut Json, value: Json) {
    let mut items = match existing.take() {
        Json::Array(items) => items,
        other => vec![other],
    };
    match value {
        Json::Array(more) => items.extend(more),
        single => items.push(single),
    }
    *existing = Json::Array(items);
}

fn compact(value: &mut Json) {
    let Json::Object(map) = value else {
        return;
    };
    for child in map.values_mut() {
        compact(child);
    }

    let len = map.len();
    let dense = (0..len).all(|i| map.contains_key(&i.to_string()));
    if len > 0 && dense {
        let mut map = std::mem::take(map);
        let items = (0..len)
            .filter_map(|i| map.remove(&i.to_string()))
            .collect();
        *value = Json::Array(items);
    }
}
