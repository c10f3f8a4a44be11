// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. error::ChartError)
    clippy::module_name_repetitions
)]

//! # Netchart
//!
//! Render graphs as layered Vega-Lite chart specifications.
//!
//! Netchart turns an attributed graph and a 2-D layout into:
//! - Row tables: one row per node, two rows per edge
//! - Resolved visual parameters: constants or column-bound channels
//! - A stack of layers: edges, arrowheads, nodes and labels
//!
//! ## Pipeline
//!
//! graph + positions → [`table`] → [`resolve`] → [`chart`] → [`compose`]
//!
//! ## Modules
//!
//! - [`graph`]: Graph model, positions and layout engines
//! - [`table`]: Projection of nodes and edges into tables
//! - [`resolve`]: Visual parameter resolution
//! - [`chart`]: Layers, the layer stack and the Vega-Lite writer
//! - [`style`]: Visual parameters and their defaults
//! - [`compose`]: Full-graph drawing
//! - [`config`]: Saved defaults and flag parsing

pub mod chart;
pub mod compose;
pub mod config;
pub mod error;
pub mod graph;
pub mod perf;
pub mod resolve;
pub mod style;
pub mod table;

pub use error::{ChartError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chart::{LayerStack, Slot, VegaLiteWriter};
    pub use crate::compose::{Composer, draw};
    pub use crate::graph::{Graph, LayoutEngine, Positions};
    pub use crate::style::DrawConfig;
}
