//! Visual parameters for each layer, with their defaults.
//!
//! | Field                  | Default   |
//! |------------------------|-----------|
//! | `edges.width`          | `1`       |
//! | `edges.color`          | `"black"` |
//! | `edges.opacity`        | `1`       |
//! | `arrows.width`         | `2`       |
//! | `arrows.length`        | `0.1`     |
//! | `arrows.color`         | `"black"` |
//! | `arrows.opacity`       | `1`       |
//! | `nodes.size`           | `300`     |
//! | `nodes.color`          | `"red"`   |
//! | `nodes.opacity`        | `1`       |
//! | `labels.attribute`     | none      |
//! | `labels.font_size`     | `15`      |
//! | `labels.font_color`    | `"black"` |
//!
//! Colormaps, tooltips and subsets are unset by default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::resolve::{ParamValue, ResolvedAttributes, VisualChannel, edge_subset, node_subset};
use crate::table::Table;

/// Edge line parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    pub width: ParamValue,
    pub color: ParamValue,
    pub opacity: ParamValue,
    /// Color scheme applied when `color` names a column
    pub cmap: Option<String>,
    pub tooltip: Option<Vec<String>>,
    /// `[source, target]` pairs to draw; `null` draws every edge
    pub subset: Option<Value>,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            width: ParamValue::Number(1.0),
            color: ParamValue::Text("black".to_string()),
            opacity: ParamValue::Number(1.0),
            cmap: None,
            tooltip: None,
            subset: None,
        }
    }
}

impl EdgeStyle {
    /// Resolve the edge parameters against an edge table.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors.
    pub fn resolve(&self, table: &Table) -> Result<ResolvedAttributes> {
        let mut attrs = ResolvedAttributes::new();
        attrs
            .resolve("edge_width", VisualChannel::StrokeWidth, &self.width, table)?
            .resolve("edge_opacity", VisualChannel::Opacity, &self.opacity, table)?
            .resolve_color(
                "edge_color",
                VisualChannel::Color,
                &self.color,
                self.cmap.as_deref(),
                table,
            )?
            .tooltip("edge_tooltip", self.tooltip.as_deref(), table)?;
        Ok(attrs)
    }

    /// Parsed edge allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChartError::InvalidSubsetType`] for a non-list value.
    pub fn edge_subset(&self) -> Result<Option<Vec<(String, String)>>> {
        edge_subset(self.subset.as_ref())
    }
}

/// Arrowhead parameters for directed graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    pub width: ParamValue,
    /// Fraction of the edge the arrowhead covers, in `(0, 1]`
    pub length: f64,
    pub color: ParamValue,
    pub opacity: ParamValue,
    pub cmap: Option<String>,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            width: ParamValue::Number(2.0),
            length: 0.1,
            color: ParamValue::Text("black".to_string()),
            opacity: ParamValue::Number(1.0),
            cmap: None,
        }
    }
}

impl ArrowStyle {
    /// Resolve the arrow parameters against an arrow table.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors.
    pub fn resolve(&self, table: &Table) -> Result<ResolvedAttributes> {
        let mut attrs = ResolvedAttributes::new();
        attrs
            .resolve("arrow_width", VisualChannel::StrokeWidth, &self.width, table)?
            .resolve("arrow_opacity", VisualChannel::Opacity, &self.opacity, table)?
            .resolve_color(
                "arrow_color",
                VisualChannel::Color,
                &self.color,
                self.cmap.as_deref(),
                table,
            )?;
        Ok(attrs)
    }
}

/// Node point parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    pub size: ParamValue,
    pub color: ParamValue,
    pub opacity: ParamValue,
    pub cmap: Option<String>,
    pub tooltip: Option<Vec<String>>,
    /// Node ids to draw; `null` draws every node
    pub subset: Option<Value>,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            size: ParamValue::Number(300.0),
            color: ParamValue::Text("red".to_string()),
            opacity: ParamValue::Number(1.0),
            cmap: None,
            tooltip: None,
            subset: None,
        }
    }
}

impl NodeStyle {
    /// Resolve the node parameters against a node table.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors.
    pub fn resolve(&self, table: &Table) -> Result<ResolvedAttributes> {
        let mut attrs = ResolvedAttributes::new();
        attrs
            .resolve("node_size", VisualChannel::Size, &self.size, table)?
            .resolve("node_opacity", VisualChannel::Opacity, &self.opacity, table)?
            .resolve_color(
                "node_color",
                VisualChannel::Fill,
                &self.color,
                self.cmap.as_deref(),
                table,
            )?
            .tooltip("node_tooltip", self.tooltip.as_deref(), table)?;
        Ok(attrs)
    }

    /// Parsed node allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChartError::InvalidSubsetType`] for a non-list value.
    pub fn node_subset(&self) -> Result<Option<Vec<String>>> {
        node_subset(self.subset.as_ref())
    }
}

/// Node label parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Node attribute holding the label text; labels are off when unset
    pub attribute: Option<String>,
    pub font_size: ParamValue,
    pub font_color: ParamValue,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            attribute: None,
            font_size: ParamValue::Number(15.0),
            font_color: ParamValue::Text("black".to_string()),
        }
    }
}

impl LabelStyle {
    /// Default label attribute when labels are switched on without a name.
    pub const DEFAULT_ATTRIBUTE: &'static str = "label";

    /// Resolve the label parameters against a node table, recording the text
    /// column.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors.
    pub fn resolve(&self, table: &Table) -> Result<ResolvedAttributes> {
        let mut attrs = ResolvedAttributes::new();
        attrs
            .resolve("font_size", VisualChannel::FontSize, &self.font_size, table)?
            .resolve("font_color", VisualChannel::Color, &self.font_color, table)?
            .text(
                self.attribute
                    .as_deref()
                    .unwrap_or(Self::DEFAULT_ATTRIBUTE),
            );
        Ok(attrs)
    }
}

/// Every visual parameter of a draw call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub edges: EdgeStyle,
    pub arrows: ArrowStyle,
    pub nodes: NodeStyle,
    pub labels: LabelStyle,
}
