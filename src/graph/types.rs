//! Core graph types.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// Attribute mapping attached to a node or an edge.
pub type Attributes = BTreeMap<String, Value>;

/// A node and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node identifier
    pub id: String,
    /// Arbitrary node attributes
    pub attrs: Attributes,
}

/// An edge as an ordered `(source, target)` pair with attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub attrs: Attributes,
}

impl Edge {
    /// The `(source, target)` pair identifying this edge.
    pub fn pair(&self) -> (&str, &str) {
        (&self.source, &self.target)
    }
}

/// A simple attributed graph.
///
/// Nodes and edges enumerate in insertion order, so every projection of the
/// same graph yields rows in the same order.
///
/// # Example
///
/// ```
/// use netchart::graph::Graph;
///
/// let mut g = Graph::undirected();
/// g.add_edge("a", "b", Default::default());
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    directed: bool,
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
    /// Stored `(source, target)` orientation only
    edge_index: HashMap<(String, String), usize>,
}

impl Graph {
    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Look up a node's attributes.
    pub fn node_attrs(&self, id: &str) -> Option<&Attributes> {
        self.node_index.get(id).map(|&i| &self.nodes[i].attrs)
    }

    /// Whether the graph has an edge between `source` and `target`.
    ///
    /// Undirected graphs match either orientation.
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edge_position(source, target).is_some()
    }

    fn edge_position(&self, source: &str, target: &str) -> Option<usize> {
        let key = (source.to_string(), target.to_string());
        self.edge_index.get(&key).copied().or_else(|| {
            if self.directed {
                None
            } else {
                self.edge_index.get(&(key.1, key.0)).copied()
            }
        })
    }

    /// Add a node, merging `attrs` into the existing node if already present.
    pub fn add_node(&mut self, id: impl Into<String>, attrs: Attributes) {
        let id = id.into();
        if let Some(&i) = self.node_index.get(&id) {
            self.nodes[i].attrs.extend(attrs);
            return;
        }
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(Node { id, attrs });
    }

    /// Add an edge, creating missing endpoints without attributes.
    ///
    /// In an undirected graph `(v, u)` is the same edge as `(u, v)`; adding it
    /// again merges attributes into the existing edge.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        attrs: Attributes,
    ) {
        let source = source.into();
        let target = target.into();
        self.add_node(source.clone(), Attributes::new());
        self.add_node(target.clone(), Attributes::new());

        if let Some(i) = self.edge_position(&source, &target) {
            self.edges[i].attrs.extend(attrs);
            return;
        }
        self.edge_index
            .insert((source.clone(), target.clone()), self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            attrs,
        });
    }
}
