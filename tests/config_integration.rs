use netchart::compose::draw;
use netchart::config::{StyleFlags, load_config_flags, parse_flag_tokens};
use netchart::graph::parse_node_link;
use netchart::resolve::ParamValue;
use netchart::style::DrawConfig;
use netchart::chart::Slot;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".netchartrc");
    let content = r#"
# comment
--node-size 120

--edge-color=weight

--labels
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.node_size, Some(ParamValue::Number(120.0)));
    assert_eq!(flags.edge_color, Some(ParamValue::Text("weight".into())));
    assert_eq!(flags.labels, Some("label".to_string()));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".netchartrc");
    std::fs::write(&path, "--node-color green\n--arrow-length 0.3\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "netchart".to_string(),
        "--node-color".to_string(),
        "blue".to_string(),
        "--pretty".to_string(),
        "graph.json".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.pretty, "cli flags should be applied");
    assert_eq!(
        effective.node_color,
        Some(ParamValue::Text("blue".into())),
        "cli should override node color"
    );
    assert_eq!(
        effective.arrow_length,
        Some(0.3),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_flags_drive_a_draw() {
    let doc = parse_node_link(
        r#"{
            "nodes": [{"id": "a", "degree": 1, "name": "A"}, {"id": "b", "degree": 1, "name": "B"}],
            "links": [{"source": "a", "target": "b"}],
            "layout": {"a": [0, 0], "b": [1, 0]}
        }"#,
    )
    .unwrap();
    let flags = parse_flag_tokens(&[
        "--node-size".to_string(),
        "degree".to_string(),
        "--labels=name".to_string(),
    ]);
    let mut config = DrawConfig::default();
    flags.apply(&mut config);

    let stack = draw(&doc.graph, &doc.positions.unwrap(), &config).unwrap();
    let nodes = stack.get(Slot::Nodes).unwrap();
    assert_eq!(nodes.channel("size").unwrap().field, "degree");
    let labels = stack.get(Slot::Labels).unwrap();
    assert_eq!(labels.channel("text").unwrap().field, "name");
}

#[test]
fn test_config_union_keeps_unset_fields_empty() {
    let merged = StyleFlags::default().union(&StyleFlags::default());
    assert_eq!(merged, StyleFlags::default());
}
