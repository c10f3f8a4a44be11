//! Row-oriented tables handed to the chart grammar.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies the graph element a row came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowKey {
    /// One row per node
    Node { id: String },
    /// Two rows per edge, sharing `index`
    Edge {
        index: usize,
        source: String,
        target: String,
    },
}

/// A single table row: every column of the table maps to a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub key: RowKey,
    pub values: BTreeMap<String, Value>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Numeric value of `column`, if present and a number.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }
}

/// Measurement type of a column, as the chart grammar understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
}

impl FieldType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quantitative => "quantitative",
            Self::Nominal => "nominal",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A projected node or edge table.
///
/// Columns are ordered: structural columns first, then attribute columns
/// sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub(crate) const fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Infer the field type of `column`.
    ///
    /// Quantitative when there is at least one non-null value and every
    /// non-null value is a number; nominal otherwise.
    pub fn field_type(&self, column: &str) -> FieldType {
        let mut seen = false;
        for value in self.rows.iter().filter_map(|r| r.get(column)) {
            match value {
                Value::Null => {}
                Value::Number(_) => seen = true,
                _ => return FieldType::Nominal,
            }
        }
        if seen {
            FieldType::Quantitative
        } else {
            FieldType::Nominal
        }
    }

    /// Keep only node rows whose identifier is in `ids`.
    pub fn retain_nodes(&self, ids: &[String]) -> Self {
        self.filtered(|key| match key {
            RowKey::Node { id } => ids.contains(id),
            RowKey::Edge { .. } => false,
        })
    }

    /// Keep only edge rows whose `(source, target)` pair is in `pairs`.
    ///
    /// With `directed` unset a pair also matches the reversed edge.
    pub fn retain_edges(&self, pairs: &[(String, String)], directed: bool) -> Self {
        self.filtered(|key| match key {
            RowKey::Edge { source, target, .. } => pairs.iter().any(|(s, t)| {
                (s == source && t == target) || (!directed && s == target && t == source)
            }),
            RowKey::Node { .. } => false,
        })
    }

    fn filtered(&self, keep: impl Fn(&RowKey) -> bool) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(&row.key))
                .cloned()
                .collect(),
        }
    }

    /// Row values as JSON objects, in row order.
    pub fn values(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                Value::Object(
                    row.values
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                )
            })
            .collect()
    }
}
