//! Full-graph composition.
//!
//! A draw call walks edges, then nodes, and fills the stack slots in paint
//! order: edge lines, arrowheads (directed graphs only), node points and,
//! when a label attribute is configured, node labels.

use std::borrow::Cow;
use std::sync::Arc;

use crate::chart::{LayerStack, Role, Slot, build, rebuild_in_place};
use crate::error::{ChartError, Result};
use crate::graph::{Graph, LayoutEngine, Positions};
use crate::perf;
use crate::style::{ArrowStyle, DrawConfig, LabelStyle};
use crate::table::{project_edges, project_edges_with_arrows, project_nodes};

/// Draws graphs with a fixed configuration and an optional layout engine.
///
/// # Example
///
/// ```
/// use netchart::compose::Composer;
/// use netchart::graph::{Graph, Positions};
/// use netchart::style::DrawConfig;
///
/// let mut g = Graph::directed();
/// g.add_edge("a", "b", Default::default());
/// let pos: Positions = [("a", (0.0, 0.0)), ("b", (1.0, 0.0))].into_iter().collect();
///
/// let stack = Composer::new(DrawConfig::default()).draw(&g, Some(&pos)).unwrap();
/// assert_eq!(stack.len(), 3); // edges, arrows, nodes
/// ```
pub struct Composer {
    config: DrawConfig,
    engine: Option<Box<dyn LayoutEngine>>,
}

impl Composer {
    pub fn new(config: DrawConfig) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// Use `engine` whenever a draw call gets no positions.
    #[must_use]
    pub fn with_layout_engine(mut self, engine: impl LayoutEngine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    pub const fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Draw `graph`, computing positions with the layout engine if none are given.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NoLayout`] when neither positions nor an engine
    /// are available, plus everything [`draw`] returns.
    pub fn draw(&self, graph: &Graph, positions: Option<&Positions>) -> Result<LayerStack> {
        let positions = match (positions, &self.engine) {
            (Some(positions), _) => Cow::Borrowed(positions),
            (None, Some(engine)) => {
                let _scope = perf::scope("layout");
                Cow::Owned(engine.layout(graph)?)
            }
            (None, None) => return Err(ChartError::NoLayout),
        };
        draw(graph, &positions, &self.config)
    }
}

/// Compose the layer stack for `graph` at `positions`.
///
/// # Errors
///
/// Returns [`ChartError::EmptyGraph`] for a graph without nodes and edges and
/// propagates projection, subset and resolution errors.
pub fn draw(graph: &Graph, positions: &Positions, config: &DrawConfig) -> Result<LayerStack> {
    let _scope = perf::scope("draw");
    let mut stack = LayerStack::new();

    if graph.edge_count() > 0 {
        let subset = config.edges.edge_subset()?;
        let mut table = project_edges(graph, positions)?;
        if let Some(pairs) = &subset {
            table = table.retain_edges(pairs, graph.is_directed());
        }
        let attrs = config.edges.resolve(&table)?;
        stack.replace(Slot::Edges, build(Role::EdgeLine, Arc::new(table), &attrs)?);

        if graph.is_directed() {
            add_arrows(&mut stack, graph, positions, &config.arrows, subset.as_deref())?;
        }
    }

    if graph.node_count() > 0 {
        let mut table = project_nodes(graph, positions)?;
        if let Some(ids) = config.nodes.node_subset()? {
            table = table.retain_nodes(&ids);
        }
        let attrs = config.nodes.resolve(&table)?;
        stack.replace(Slot::Nodes, build(Role::NodePoint, Arc::new(table), &attrs)?);

        if config.labels.attribute.is_some() {
            add_labels(&mut stack, &config.labels)?;
        }
    }

    if stack.is_empty() {
        return Err(ChartError::EmptyGraph);
    }
    tracing::info!(
        layers = stack.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "composed layer stack"
    );
    Ok(stack)
}

/// Put arrowheads for `graph` into the stack's arrow slot.
///
/// # Errors
///
/// Propagates projection and resolution errors.
pub fn add_arrows(
    stack: &mut LayerStack,
    graph: &Graph,
    positions: &Positions,
    style: &ArrowStyle,
    subset: Option<&[(String, String)]>,
) -> Result<()> {
    let mut table = project_edges_with_arrows(graph, positions, style.length)?;
    if let Some(pairs) = subset {
        table = table.retain_edges(pairs, graph.is_directed());
    }
    let attrs = style.resolve(&table)?;
    rebuild_in_place(stack, Slot::Arrows, Some(Arc::new(table)), &attrs)?;
    Ok(())
}

/// Label the stack's node layer, sharing its table.
///
/// Uses [`LabelStyle::DEFAULT_ATTRIBUTE`] when the style names no attribute.
///
/// # Errors
///
/// Returns [`ChartError::EmptySlot`] if the stack has no node layer, plus
/// resolution errors.
pub fn add_labels(stack: &mut LayerStack, style: &LabelStyle) -> Result<()> {
    let table = stack
        .get(Slot::Nodes)
        .map(|layer| Arc::clone(layer.table()))
        .ok_or(ChartError::EmptySlot(Slot::Nodes))?;
    let attrs = style.resolve(&table)?;
    rebuild_in_place(stack, Slot::Labels, Some(table), &attrs)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::MarkType;
    use crate::graph::Attributes;
    use crate::resolve::ParamValue;
    use serde_json::json;

    fn path_graph(directed: bool) -> (Graph, Positions) {
        let mut g = if directed {
            Graph::directed()
        } else {
            Graph::undirected()
        };
        g.add_node("A", [("label".to_string(), json!("a"))].into_iter().collect());
        g.add_edge("A", "B", Attributes::new());
        g.add_edge("B", "C", Attributes::new());
        let pos = [("A", (0.0, 0.0)), ("B", (1.0, 0.0)), ("C", (2.0, 0.0))]
            .into_iter()
            .collect();
        (g, pos)
    }

    fn slots(stack: &LayerStack) -> Vec<Slot> {
        stack.slots().map(|(slot, _)| slot).collect()
    }

    #[test]
    fn test_undirected_graph_has_edges_and_nodes() {
        let (g, pos) = path_graph(false);
        let stack = draw(&g, &pos, &DrawConfig::default()).unwrap();
        assert_eq!(slots(&stack), vec![Slot::Edges, Slot::Nodes]);
    }

    #[test]
    fn test_directed_graph_adds_arrows() {
        let (g, pos) = path_graph(true);
        let stack = draw(&g, &pos, &DrawConfig::default()).unwrap();
        assert_eq!(slots(&stack), vec![Slot::Edges, Slot::Arrows, Slot::Nodes]);
        let arrows = stack.get(Slot::Arrows).unwrap();
        assert_eq!(arrows.mark(), MarkType::Line);
        assert_eq!(arrows.property("strokeWidth"), Some(&json!(2.0)));
    }

    #[test]
    fn test_labels_share_node_table() {
        let (g, pos) = path_graph(false);
        let mut config = DrawConfig::default();
        config.labels.attribute = Some("label".into());
        let stack = draw(&g, &pos, &config).unwrap();
        assert_eq!(slots(&stack), vec![Slot::Edges, Slot::Nodes, Slot::Labels]);
        let nodes = stack.get(Slot::Nodes).unwrap();
        let labels = stack.get(Slot::Labels).unwrap();
        assert!(Arc::ptr_eq(nodes.table(), labels.table()));
        assert_eq!(labels.property("fontSize"), Some(&json!(15.0)));
    }

    #[test]
    fn test_node_only_graph() {
        let mut g = Graph::undirected();
        g.add_node("A", Attributes::new());
        let pos = [("A", (0.0, 0.0))].into_iter().collect();
        let stack = draw(&g, &pos, &DrawConfig::default()).unwrap();
        assert_eq!(slots(&stack), vec![Slot::Nodes]);
    }

    #[test]
    fn test_empty_graph_fails() {
        let result = draw(&Graph::directed(), &Positions::new(), &DrawConfig::default());
        assert_eq!(result, Err(ChartError::EmptyGraph));
    }

    #[test]
    fn test_subsets_filter_rows() {
        let (g, pos) = path_graph(true);
        let mut config = DrawConfig::default();
        config.nodes.subset = Some(json!(["A", "C"]));
        config.edges.subset = Some(json!([["B", "C"]]));
        let stack = draw(&g, &pos, &config).unwrap();
        assert_eq!(stack.get(Slot::Nodes).unwrap().table().len(), 2);
        assert_eq!(stack.get(Slot::Edges).unwrap().table().len(), 2);
        assert_eq!(stack.get(Slot::Arrows).unwrap().table().len(), 2);
    }

    #[test]
    fn test_reversed_edge_subset_on_undirected_graph() {
        let (g, pos) = path_graph(false);
        let mut config = DrawConfig::default();
        config.edges.subset = Some(json!([["B", "A"]]));
        let stack = draw(&g, &pos, &config).unwrap();
        let edges = stack.get(Slot::Edges).unwrap();
        assert_eq!(edges.table().len(), 2);
        assert!(
            edges
                .table()
                .rows()
                .iter()
                .all(|r| r.get("pair") == Some(&json!(["A", "B"])))
        );
    }

    #[test]
    fn test_reversed_edge_subset_on_directed_graph_matches_nothing() {
        let (g, pos) = path_graph(true);
        let mut config = DrawConfig::default();
        config.edges.subset = Some(json!([["B", "A"]]));
        let stack = draw(&g, &pos, &config).unwrap();
        assert!(stack.get(Slot::Edges).unwrap().table().is_empty());
        assert!(stack.get(Slot::Arrows).unwrap().table().is_empty());
    }

    #[test]
    fn test_invalid_edge_width_column_fails() {
        let (g, pos) = path_graph(false);
        let mut config = DrawConfig::default();
        config.edges.width = ParamValue::Text("weight".into());
        assert!(matches!(
            draw(&g, &pos, &config),
            Err(ChartError::UnresolvedColumnReference { parameter: "edge_width", .. })
        ));
    }

    #[test]
    fn test_composer_uses_engine_without_positions() {
        let (g, pos) = path_graph(false);
        let composer = Composer::new(DrawConfig::default()).with_layout_engine(pos.clone());
        assert_eq!(composer.draw(&g, None), draw(&g, &pos, composer.config()));
    }

    #[test]
    fn test_composer_without_engine_needs_positions() {
        let (g, _) = path_graph(false);
        let composer = Composer::new(DrawConfig::default());
        assert_eq!(composer.draw(&g, None), Err(ChartError::NoLayout));
    }

    #[test]
    fn test_add_labels_needs_node_layer() {
        let mut stack = LayerStack::new();
        assert_eq!(
            add_labels(&mut stack, &LabelStyle::default()),
            Err(ChartError::EmptySlot(Slot::Nodes))
        );
    }
}
