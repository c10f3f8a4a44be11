//! Tabular projection of graphs.
//!
//! Nodes become one row each; edges become two rows (one per endpoint)
//! grouped by a shared `edge` index so a line mark can draw each edge as
//! its own segment.

mod projector;
mod types;

pub use projector::{
    EDGE_COLUMNS, NODE_COLUMNS, project_edges, project_edges_with_arrows, project_nodes,
};
pub use types::{FieldType, Row, RowKey, Table};
