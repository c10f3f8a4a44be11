//! Node positions and the layout strategy seam.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::graph::Graph;

/// Mapping from node identifier to a 2-D coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Positions(HashMap<String, (f64, f64)>);

impl Positions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: impl Into<String>, x: f64, y: f64) {
        self.0.insert(node.into(), (x, y));
    }

    pub fn get(&self, node: &str) -> Option<(f64, f64)> {
        self.0.get(node).copied()
    }

    /// Coordinate for `node`, failing if the layout does not cover it.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::MissingLayoutCoordinate`] when `node` is absent
    /// and [`ChartError::NonFiniteCoordinate`] when either axis is NaN or
    /// infinite.
    pub fn coordinate(&self, node: &str) -> Result<(f64, f64)> {
        let (x, y) = self
            .get(node)
            .ok_or_else(|| ChartError::MissingLayoutCoordinate {
                node: node.to_string(),
            })?;
        if x.is_finite() && y.is_finite() {
            Ok((x, y))
        } else {
            Err(ChartError::NonFiniteCoordinate {
                node: node.to_string(),
                x,
                y,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, (f64, f64))> for Positions {
    fn from_iter<I: IntoIterator<Item = (S, (f64, f64))>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Strategy that assigns coordinates to every node of a graph.
///
/// Layout algorithms live outside this crate; callers inject one into the
/// [`Composer`](crate::compose::Composer) when they do not pass positions.
pub trait LayoutEngine {
    /// Compute positions for every node in `graph`.
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`ChartError`].
    fn layout(&self, graph: &Graph) -> Result<Positions>;
}

/// Precomputed positions act as a layout that ignores the graph.
impl LayoutEngine for Positions {
    fn layout(&self, _graph: &Graph) -> Result<Positions> {
        Ok(self.clone())
    }
}

impl<F> LayoutEngine for F
where
    F: Fn(&Graph) -> Result<Positions>,
{
    fn layout(&self, graph: &Graph) -> Result<Positions> {
        self(graph)
    }
}
