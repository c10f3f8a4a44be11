use netchart::ChartError;
use netchart::chart::{LayerStack, MarkType, Slot, VegaLiteWriter};
use netchart::compose::draw;
use netchart::graph::{Graph, Positions};
use netchart::resolve::ParamValue;
use netchart::style::DrawConfig;
use serde_json::json;

fn sized_graph(directed: bool) -> (Graph, Positions) {
    let mut g = if directed {
        Graph::directed()
    } else {
        Graph::undirected()
    };
    g.add_node("A", [("size".to_string(), json!(5))].into_iter().collect());
    g.add_node("B", [("size".to_string(), json!(9))].into_iter().collect());
    g.add_edge("A", "B", [("weight".to_string(), json!(3))].into_iter().collect());
    let pos = [("A", (0.0, 0.0)), ("B", (10.0, 0.0))].into_iter().collect();
    (g, pos)
}

#[test]
fn test_node_size_column_vs_literal() {
    let (g, pos) = sized_graph(false);

    let mut config = DrawConfig::default();
    config.nodes.size = ParamValue::Text("size".into());
    let stack = draw(&g, &pos, &config).unwrap();
    let nodes = stack.get(Slot::Nodes).unwrap();
    assert_eq!(nodes.channel("size").unwrap().field, "size");
    assert!(nodes.property("size").is_none());

    config.nodes.size = ParamValue::Number(300.0);
    let stack = draw(&g, &pos, &config).unwrap();
    let nodes = stack.get(Slot::Nodes).unwrap();
    assert_eq!(nodes.property("size"), Some(&json!(300.0)));
    assert!(nodes.channel("size").is_none());
}

#[test]
fn test_directed_graph_gets_arrowheads_and_undirected_does_not() {
    let (directed, pos) = sized_graph(true);
    let stack = draw(&directed, &pos, &DrawConfig::default()).unwrap();
    assert!(stack.get(Slot::Arrows).is_some());

    let (undirected, pos) = sized_graph(false);
    let stack = draw(&undirected, &pos, &DrawConfig::default()).unwrap();
    assert!(stack.get(Slot::Arrows).is_none());
}

#[test]
fn test_arrowhead_geometry() {
    let (g, pos) = sized_graph(true);
    let mut config = DrawConfig::default();
    config.arrows.length = 0.2;
    let stack = draw(&g, &pos, &config).unwrap();
    let arrows = stack.get(Slot::Arrows).unwrap();
    let rows = arrows.table().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].number("x"), rows[0].number("y")), (Some(10.0), Some(0.0)));
    assert_eq!((rows[1].number("x"), rows[1].number("y")), (Some(8.0), Some(0.0)));
}

#[test]
fn test_invalid_arrow_length_fails_draw() {
    let (g, pos) = sized_graph(true);
    let mut config = DrawConfig::default();
    config.arrows.length = 1.5;
    assert_eq!(draw(&g, &pos, &config), Err(ChartError::InvalidArrowLength(1.5)));
}

#[test]
fn test_draw_is_idempotent() {
    let (g, pos) = sized_graph(true);
    let mut config = DrawConfig::default();
    config.edges.color = ParamValue::Text("weight".into());
    config.edges.cmap = Some("greys".into());
    config.nodes.tooltip = Some(vec!["size".into()]);

    let first = draw(&g, &pos, &config).unwrap();
    let second = draw(&g, &pos, &config).unwrap();
    assert_eq!(first, second);

    let writer = VegaLiteWriter::new();
    assert_eq!(writer.write(&first), writer.write(&second));
}

#[test]
fn test_paint_order() {
    let (mut g, pos) = sized_graph(true);
    g.add_node("A", [("label".to_string(), json!("alpha"))].into_iter().collect());
    let mut config = DrawConfig::default();
    config.labels.attribute = Some("label".into());
    let stack = draw(&g, &pos, &config).unwrap();

    let marks: Vec<_> = stack.iter().map(|layer| layer.mark()).collect();
    assert_eq!(
        marks,
        vec![MarkType::Line, MarkType::Line, MarkType::Point, MarkType::Text]
    );
    let spec = VegaLiteWriter::new().write(&stack);
    assert_eq!(spec["layer"].as_array().unwrap().len(), 4);
    assert_eq!(spec["layer"][3]["mark"]["baseline"], "middle");
}

#[test]
fn test_empty_graph_is_an_error() {
    assert_eq!(
        draw(&Graph::undirected(), &Positions::new(), &DrawConfig::default()),
        Err(ChartError::EmptyGraph)
    );
}

#[test]
fn test_missing_position_is_an_error() {
    let (g, _) = sized_graph(false);
    let pos: Positions = [("A", (0.0, 0.0))].into_iter().collect();
    assert_eq!(
        draw(&g, &pos, &DrawConfig::default()),
        Err(ChartError::MissingLayoutCoordinate {
            node: "B".to_string()
        })
    );
}

#[test]
fn test_color_scheme_needs_column_color() {
    let (g, pos) = sized_graph(false);
    let mut config = DrawConfig::default();
    config.edges.cmap = Some("viridis".into());
    assert_eq!(
        draw(&g, &pos, &config),
        Err(ChartError::ScaleWithoutColumnColor {
            parameter: "edge_color",
            scheme: "viridis".into()
        })
    );
}

#[test]
fn test_non_list_subset_is_an_error() {
    let (g, pos) = sized_graph(false);
    let mut config = DrawConfig::default();
    config.edges.subset = Some(json!(7));
    assert!(matches!(
        draw(&g, &pos, &config),
        Err(ChartError::InvalidSubsetType { what: "edge", .. })
    ));
}

#[test]
fn test_layer_stack_serde_round_trip() {
    let (g, pos) = sized_graph(true);
    let mut config = DrawConfig::default();
    config.nodes.color = ParamValue::Text("size".into());
    config.nodes.cmap = Some("viridis".into());
    let stack = draw(&g, &pos, &config).unwrap();

    let encoded = serde_json::to_string(&stack).unwrap();
    let decoded: LayerStack = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, stack);
}

#[test]
fn test_edge_rows_keep_attributes_and_pairs() {
    let (g, pos) = sized_graph(false);
    let stack = draw(&g, &pos, &DrawConfig::default()).unwrap();
    let edges = stack.get(Slot::Edges).unwrap();
    for row in edges.table().rows() {
        assert_eq!(row.get("weight"), Some(&json!(3)));
        assert_eq!(row.get("pair"), Some(&json!(["A", "B"])));
        assert_eq!(row.get("edge"), Some(&json!(0)));
    }
}

#[test]
fn test_node_id_is_available_to_labels_and_tooltips() {
    let (g, pos) = sized_graph(false);
    let mut config = DrawConfig::default();
    config.labels.attribute = Some("id".into());
    config.nodes.tooltip = Some(vec!["id".into(), "size".into()]);
    let stack = draw(&g, &pos, &config).unwrap();

    let labels = stack.get(Slot::Labels).unwrap();
    assert_eq!(labels.channel("text").unwrap().field, "id");
    let spec = VegaLiteWriter::new().write(&stack);
    let node_values = spec["layer"][1]["data"]["values"].as_array().unwrap();
    assert_eq!(node_values[0]["id"], "A");
    assert_eq!(node_values[1]["id"], "B");
    assert_eq!(spec["layer"][1]["encoding"]["tooltip"][0]["field"], "id");
}

#[test]
fn test_non_finite_layout_fails_draw() {
    let (g, mut pos) = sized_graph(false);
    pos.insert("A", f64::NAN, 1.0);
    assert!(matches!(
        draw(&g, &pos, &DrawConfig::default()),
        Err(ChartError::NonFiniteCoordinate { ref node, .. }) if node == "A"
    ));
}
