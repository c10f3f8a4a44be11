//! Visual parameter resolution.
//!
//! A visual parameter (node size, edge color, ...) arrives as a raw
//! [`ParamValue`]. Resolution decides whether it becomes a constant mark
//! property or an encoding channel bound to a table column:
//!
//! 1. Values that are neither an accepted literal nor a string are rejected.
//! 2. A string naming a table column binds that column.
//! 3. A string for a numeric parameter that names no column is rejected.
//! 4. Anything else is a literal: numbers as-is, strings as colors.
//!
//! A named color scheme is applied afterwards and only to a column binding.

mod subset;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, Result};
use crate::table::Table;

pub use subset::{edge_subset, node_subset};

/// A raw visual parameter as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    /// Any other JSON value; always rejected by [`resolve`]
    Other(Value),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Literal types a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Sizes, widths, opacities, font sizes
    Numeric,
    /// Colors given as CSS color strings
    Color,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Numeric => "numeric",
            Self::Color => "color",
        })
    }
}

/// The visual attribute a parameter drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualChannel {
    Size,
    Color,
    Fill,
    Opacity,
    StrokeWidth,
    FontSize,
}

impl VisualChannel {
    pub const fn kind(self) -> ParamKind {
        match self {
            Self::Color | Self::Fill => ParamKind::Color,
            Self::Size | Self::Opacity | Self::StrokeWidth | Self::FontSize => ParamKind::Numeric,
        }
    }

    /// Mark property name used when the value is constant.
    pub const fn property_name(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Color => "color",
            Self::Fill => "fill",
            Self::Opacity => "opacity",
            Self::StrokeWidth => "strokeWidth",
            Self::FontSize => "fontSize",
        }
    }

    /// Encoding channel name used when the value comes from a column.
    pub const fn encoding_name(self) -> &'static str {
        match self {
            Self::Size | Self::FontSize => "size",
            Self::Color => "color",
            Self::Fill => "fill",
            Self::Opacity => "opacity",
            Self::StrokeWidth => "strokeWidth",
        }
    }
}

/// Outcome of resolving one visual parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolved {
    /// Constant value baked into the mark
    Property(Value),
    /// Per-row value read from `column`, optionally through a color scheme
    Channel {
        column: String,
        scheme: Option<String>,
    },
}

impl Resolved {
    pub const fn is_channel(&self) -> bool {
        matches!(self, Self::Channel { .. })
    }
}

/// Resolve `value` for a parameter of `kind` against a table's columns.
///
/// `parameter` names the parameter in error messages.
///
/// # Errors
///
/// - [`ChartError::InvalidParameterType`] for values of the wrong literal type
/// - [`ChartError::UnresolvedColumnReference`] for a numeric parameter given a
///   string that names no column
pub fn resolve(
    parameter: &'static str,
    value: &ParamValue,
    columns: &[String],
    kind: ParamKind,
) -> Result<Resolved> {
    let invalid = || ChartError::InvalidParameterType {
        parameter,
        kind,
        value: value.to_string(),
    };

    match (value, kind) {
        (ParamValue::Other(_), _) | (ParamValue::Number(_), ParamKind::Color) => Err(invalid()),
        (ParamValue::Text(name), _) if columns.iter().any(|c| c == name) => {
            Ok(Resolved::Channel {
                column: name.clone(),
                scheme: None,
            })
        }
        (ParamValue::Text(name), ParamKind::Numeric) => Err(ChartError::UnresolvedColumnReference {
            parameter,
            column: name.clone(),
        }),
        (ParamValue::Text(color), ParamKind::Color) => Ok(Resolved::Property(Value::String(color.clone()))),
        (ParamValue::Number(n), ParamKind::Numeric) => {
            if n.is_finite() {
                Ok(Resolved::Property(Value::from(*n)))
            } else {
                Err(invalid())
            }
        }
    }
}

/// Attach a named color scheme to a color parameter's resolution.
///
/// # Errors
///
/// Returns [`ChartError::ScaleWithoutColumnColor`] when a scheme is given but
/// `resolved` is a constant.
pub fn apply_color_scheme(
    parameter: &'static str,
    resolved: Resolved,
    scheme: Option<&str>,
) -> Result<Resolved> {
    let Some(scheme) = scheme else {
        return Ok(resolved);
    };
    match resolved {
        Resolved::Channel { column, .. } => Ok(Resolved::Channel {
            column,
            scheme: Some(scheme.to_string()),
        }),
        Resolved::Property(_) => Err(ChartError::ScaleWithoutColumnColor {
            parameter,
            scheme: scheme.to_string(),
        }),
    }
}

/// Check that every tooltip field names a column.
///
/// # Errors
///
/// Returns [`ChartError::UnresolvedColumnReference`] for the first unknown field.
pub fn resolve_tooltip(
    parameter: &'static str,
    fields: &[String],
    columns: &[String],
) -> Result<Vec<String>> {
    if let Some(missing) = fields.iter().find(|f| !columns.contains(f)) {
        return Err(ChartError::UnresolvedColumnReference {
            parameter,
            column: missing.clone(),
        });
    }
    Ok(fields.to_vec())
}

/// Resolved attributes for one layer, in application order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedAttributes {
    entries: Vec<(VisualChannel, Resolved)>,
    tooltip: Vec<String>,
    text: Option<String>,
}

impl ResolvedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `value` for `channel` against `table` and record it.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve(
        &mut self,
        parameter: &'static str,
        channel: VisualChannel,
        value: &ParamValue,
        table: &Table,
    ) -> Result<&mut Self> {
        let resolved = resolve(parameter, value, table.columns(), channel.kind())?;
        self.entries.push((channel, resolved));
        Ok(self)
    }

    /// Resolve a color parameter and its optional scheme.
    ///
    /// # Errors
    ///
    /// See [`resolve`] and [`apply_color_scheme`].
    pub fn resolve_color(
        &mut self,
        parameter: &'static str,
        channel: VisualChannel,
        value: &ParamValue,
        scheme: Option<&str>,
        table: &Table,
    ) -> Result<&mut Self> {
        let resolved = resolve(parameter, value, table.columns(), channel.kind())?;
        let resolved = apply_color_scheme(parameter, resolved, scheme)?;
        self.entries.push((channel, resolved));
        Ok(self)
    }

    /// Resolve tooltip fields against `table`.
    ///
    /// # Errors
    ///
    /// See [`resolve_tooltip`].
    pub fn tooltip(
        &mut self,
        parameter: &'static str,
        fields: Option<&[String]>,
        table: &Table,
    ) -> Result<&mut Self> {
        if let Some(fields) = fields {
            self.tooltip = resolve_tooltip(parameter, fields, table.columns())?;
        }
        Ok(self)
    }

    /// Column a label layer reads its text from.
    pub fn text(&mut self, column: impl Into<String>) -> &mut Self {
        self.text = Some(column.into());
        self
    }

    pub fn push(&mut self, channel: VisualChannel, resolved: Resolved) -> &mut Self {
        self.entries.push((channel, resolved));
        self
    }

    pub fn entries(&self) -> &[(VisualChannel, Resolved)] {
        &self.entries
    }

    pub fn tooltip_fields(&self) -> &[String] {
        &self.tooltip
    }

    pub fn text_field(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<String> {
        vec!["x".into(), "y".into(), "size".into(), "group".into()]
    }

    #[test]
    fn test_number_for_numeric_is_property() {
        let r = resolve("node_size", &ParamValue::Number(300.0), &columns(), ParamKind::Numeric).unwrap();
        assert_eq!(r, Resolved::Property(json!(300.0)));
    }

    #[test]
    fn test_column_name_binds_channel() {
        let r = resolve("node_size", &"size".into(), &columns(), ParamKind::Numeric).unwrap();
        assert_eq!(
            r,
            Resolved::Channel {
                column: "size".into(),
                scheme: None
            }
        );
        let r = resolve("node_color", &"group".into(), &columns(), ParamKind::Color).unwrap();
        assert!(r.is_channel());
    }

    #[test]
    fn test_unknown_string_for_numeric_is_unresolved() {
        let err = resolve("width", &"weight".into(), &columns(), ParamKind::Numeric).unwrap_err();
        assert_eq!(
            err,
            ChartError::UnresolvedColumnReference {
                parameter: "width",
                column: "weight".into()
            }
        );
    }

    #[test]
    fn test_unknown_string_for_color_is_literal() {
        let r = resolve("edge_color", &"#ff0000".into(), &columns(), ParamKind::Color).unwrap();
        assert_eq!(r, Resolved::Property(json!("#ff0000")));
    }

    #[test]
    fn test_wrong_literal_types_are_rejected() {
        for (value, kind) in [
            (ParamValue::Number(1.0), ParamKind::Color),
            (ParamValue::Other(json!(true)), ParamKind::Numeric),
            (ParamValue::Other(json!([1, 2])), ParamKind::Color),
            (ParamValue::Number(f64::INFINITY), ParamKind::Numeric),
        ] {
            assert!(matches!(
                resolve("p", &value, &columns(), kind),
                Err(ChartError::InvalidParameterType { .. })
            ));
        }
    }

    #[test]
    fn test_scheme_attaches_to_channel() {
        let r = resolve("node_color", &"group".into(), &columns(), ParamKind::Color).unwrap();
        let r = apply_color_scheme("node_color", r, Some("viridis")).unwrap();
        assert_eq!(
            r,
            Resolved::Channel {
                column: "group".into(),
                scheme: Some("viridis".into())
            }
        );
    }

    #[test]
    fn test_scheme_on_constant_color_fails() {
        let r = Resolved::Property(json!("red"));
        assert_eq!(
            apply_color_scheme("node_color", r, Some("viridis")),
            Err(ChartError::ScaleWithoutColumnColor {
                parameter: "node_color",
                scheme: "viridis".into()
            })
        );
    }

    #[test]
    fn test_absent_scheme_leaves_constant_alone() {
        let r = Resolved::Property(json!("red"));
        assert_eq!(apply_color_scheme("c", r.clone(), None), Ok(r));
    }

    #[test]
    fn test_tooltip_fields_must_exist() {
        let ok = resolve_tooltip("tooltip", &["size".into()], &columns()).unwrap();
        assert_eq!(ok, vec!["size".to_string()]);
        assert!(resolve_tooltip("tooltip", &["nope".into()], &columns()).is_err());
    }

    #[test]
    fn test_param_value_deserializes_untagged() {
        let values: Vec<ParamValue> = serde_json::from_str(r#"[300, "size", true, null]"#).unwrap();
        assert_eq!(values[0], ParamValue::Number(300.0));
        assert_eq!(values[1], ParamValue::Text("size".into()));
        assert_eq!(values[2], ParamValue::Other(json!(true)));
        assert_eq!(values[3], ParamValue::Other(Value::Null));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn numeric_literal_is_always_property(n in -1.0e9..1.0e9f64) {
                let r = resolve("p", &ParamValue::Number(n), &columns(), ParamKind::Numeric).unwrap();
                prop_assert_eq!(r, Resolved::Property(Value::from(n)));
            }
        }
    }
}
