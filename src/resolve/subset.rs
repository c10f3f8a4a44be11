//! Node and edge allow-lists.

use serde_json::Value;

use crate::error::{ChartError, Result};
use crate::graph::loader::id_text;

/// Parse a node allow-list: absent/`null`, or a list of node ids.
///
/// # Errors
///
/// Returns [`ChartError::InvalidSubsetType`] for anything else.
pub fn node_subset(value: Option<&Value>) -> Result<Option<Vec<String>>> {
    let Some(items) = list(value, "node")? else {
        return Ok(None);
    };
    items
        .iter()
        .map(|item| id_text(item).ok_or_else(|| invalid("node", item)))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Parse an edge allow-list: absent/`null`, or a list of `[source, target]`.
///
/// # Errors
///
/// Returns [`ChartError::InvalidSubsetType`] for anything else.
pub fn edge_subset(value: Option<&Value>) -> Result<Option<Vec<(String, String)>>> {
    let Some(items) = list(value, "edge")? else {
        return Ok(None);
    };
    items
        .iter()
        .map(|item| match item.as_array().map(Vec::as_slice) {
            Some([source, target]) => id_text(source)
                .zip(id_text(target))
                .ok_or_else(|| invalid("edge", item)),
            _ => Err(invalid("edge", item)),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn list<'a>(value: Option<&'a Value>, what: &'static str) -> Result<Option<&'a Vec<Value>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(invalid(what, other)),
    }
}

fn invalid(what: &'static str, value: &Value) -> ChartError {
    ChartError::InvalidSubsetType {
        what,
        value: value.to_string(),
    }
}
