//! Graph model consumed by the projector.
//!
//! This module handles:
//! - The attributed `Graph` with stable node and edge order
//! - Node positions and the injectable `LayoutEngine`
//! - Decoding node-link graph documents

mod layout;
pub(crate) mod loader;
mod types;

pub use layout::{LayoutEngine, Positions};
pub use loader::{GraphDocument, parse_node_link, parse_positions};
pub use types::{Attributes, Edge, Graph, Node};
