//! Error types for graph projection, parameter resolution and composition.
//!
//! Every error is terminal for the current draw call: nothing retries and
//! nothing substitutes a default.

use crate::chart::Slot;
use crate::resolve::ParamKind;

/// Errors raised while turning a graph into a layer stack.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ChartError {
    /// A node referenced by the graph has no entry in the layout.
    #[error("no layout coordinate for node `{node}`")]
    MissingLayoutCoordinate { node: String },

    /// A layout coordinate is NaN or infinite.
    #[error("layout coordinate for node `{node}` is not finite: ({x}, {y})")]
    NonFiniteCoordinate { node: String, x: f64, y: f64 },

    /// A visual parameter is neither an accepted literal nor a string.
    #[error("invalid {kind} parameter `{parameter}`: {value}")]
    InvalidParameterType {
        parameter: &'static str,
        kind: ParamKind,
        value: String,
    },

    /// A string parameter that must name a column does not.
    #[error("parameter `{parameter}` references unknown column `{column}`")]
    UnresolvedColumnReference {
        parameter: &'static str,
        column: String,
    },

    /// A color scheme was given but the paired color parameter is a constant.
    #[error("color scheme `{scheme}` requires `{parameter}` to name a column")]
    ScaleWithoutColumnColor {
        parameter: &'static str,
        scheme: String,
    },

    /// A node or edge allow-list is neither a list nor absent.
    #[error("invalid {what} subset: {value}")]
    InvalidSubsetType { what: &'static str, value: String },

    /// The graph has neither nodes nor edges.
    #[error("graph has no nodes and no edges; nothing to draw")]
    EmptyGraph,

    /// A graph attribute reuses a structural column name.
    #[error("{element} attribute `{name}` collides with a reserved column")]
    ReservedAttribute { element: &'static str, name: String },

    /// Arrow length outside of (0, 1].
    #[error("arrow length must be in (0, 1], got {0}")]
    InvalidArrowLength(f64),

    /// In-place rebuild of a slot that holds no layer and got no table.
    #[error("{0} slot is empty and no table was supplied")]
    EmptySlot(Slot),

    /// No positions were supplied and no layout engine is configured.
    #[error("no layout supplied and no layout engine configured")]
    NoLayout,

    /// Graph or layout input could not be decoded.
    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChartError>;
