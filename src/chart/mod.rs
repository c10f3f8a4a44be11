//! Layered chart construction.
//!
//! This module handles:
//! - Layers (table + mark + resolved attributes) and the named-slot stack
//! - Building a layer per visual role, or rebuilding one slot in place
//! - Writing the stack as a Vega-Lite document

mod builder;
mod layer;
pub mod vegalite;

pub use builder::{build, rebuild_in_place};
pub use layer::{FieldDef, Layer, LayerStack, MarkType, Role, Slot};
pub use vegalite::VegaLiteWriter;
