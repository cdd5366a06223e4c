use mindboard_core::{
    add_child_to_node, create_mind_map, templates, Board, EdgeKind, GraphStore, MindMapConfig,
    Node, NodeData, Position, TextCardData, CHILD_RADIUS, MIND_MAP_RADIUS,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const EPSILON: f64 = 1e-9;

fn config(center_x: f64, center_y: f64, subtopics: &[&str]) -> MindMapConfig {
    MindMapConfig {
        center_x,
        center_y,
        topic: "Topic".to_string(),
        subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
    }
}

fn label_of(node: &Node) -> &str {
    match &node.data {
        NodeData::MindMapNode(data) => &data.label,
        other => panic!("expected a mind-map node, got {other:?}"),
    }
}

#[test]
fn four_subtopics_are_radially_symmetric() {
    let delta = create_mind_map(&config(0.0, 0.0, &["a", "b", "c", "d"]));
    assert_eq!(delta.nodes.len(), 5);
    assert_eq!(delta.edges.len(), 4);

    let center = &delta.nodes[0];
    assert_eq!(center.position, Position::new(0.0, 0.0));

    let mut angles = Vec::new();
    for child in &delta.nodes[1..] {
        let distance = (child.position.x.powi(2) + child.position.y.powi(2)).sqrt();
        assert!(
            (distance - MIND_MAP_RADIUS).abs() < EPSILON,
            "child must sit on the radius circle, got {distance}"
        );
        angles.push(child.position.y.atan2(child.position.x));
    }

    // Evenly spaced by 2π/4 = π/2.
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
    for pair in angles.windows(2) {
        assert!(((pair[1] - pair[0]) - FRAC_PI_2).abs() < EPSILON);
    }

    // Every edge runs center -> child.
    for edge in &delta.edges {
        assert_eq!(edge.source, center.id);
        assert_eq!(edge.kind, EdgeKind::MindMap);
        assert!(delta.nodes[1..].iter().any(|child| child.id == edge.target));
    }
}

#[test]
fn first_child_starts_at_the_top() {
    let delta = create_mind_map(&config(100.0, 50.0, &["a", "b", "c", "d"]));

    // Angle 0·(2π/4) − π/2 points straight up from the center.
    let first = &delta.nodes[1];
    assert_eq!(label_of(first), "a");
    assert!((first.position.x - 100.0).abs() < EPSILON);
    assert!((first.position.y - (50.0 - MIND_MAP_RADIUS)).abs() < EPSILON);

    // Child 2 of 4 sits at angle π/2, i.e. straight below.
    let third = &delta.nodes[3];
    assert_eq!(label_of(third), "c");
    assert!((third.position.x - 100.0).abs() < EPSILON);
    assert!((third.position.y - (50.0 + MIND_MAP_RADIUS)).abs() < EPSILON);
}

#[test]
fn colors_cycle_and_center_is_flagged() {
    let delta = create_mind_map(&config(0.0, 0.0, &["a", "b", "c", "d", "e", "f", "g"]));

    match &delta.nodes[0].data {
        NodeData::MindMapNode(data) => {
            assert!(data.is_center);
            assert_eq!(data.color_index, 0);
        }
        other => panic!("expected mind-map center, got {other:?}"),
    }
    for (index, child) in delta.nodes[1..].iter().enumerate() {
        match &child.data {
            NodeData::MindMapNode(data) => {
                assert!(!data.is_center);
                assert_eq!(data.color_index as usize, (index + 1) % 6);
            }
            other => panic!("expected mind-map child, got {other:?}"),
        }
    }
}

#[test]
fn empty_subtopics_yield_center_only() {
    let delta = create_mind_map(&config(400.0, 300.0, &[]));
    assert_eq!(delta.nodes.len(), 1);
    assert!(delta.edges.is_empty());
    assert_eq!(delta.nodes[0].position, Position::new(400.0, 300.0));
}

#[test]
fn add_child_walks_the_angular_slots() {
    let delta = create_mind_map(&config(10.0, 20.0, &[]));
    let parent = delta.nodes[0].clone();

    let (first, first_edge) =
        add_child_to_node(&parent, &[], "first").expect("mind-map parent should accept children");
    // Slot 0 is angle 0: straight to the right.
    assert!((first.position.x - (10.0 + CHILD_RADIUS)).abs() < EPSILON);
    assert!((first.position.y - 20.0).abs() < EPSILON);
    assert_eq!(first_edge.source, parent.id);
    assert_eq!(first_edge.target, first.id);
    assert_eq!(first_edge.kind, EdgeKind::MindMap);

    let (second, _) = add_child_to_node(&parent, &[first_edge], "second").unwrap();
    // One existing child: slot 1, π/4 down-right.
    let expected_x = 10.0 + CHILD_RADIUS * FRAC_PI_4.cos();
    let expected_y = 20.0 + CHILD_RADIUS * FRAC_PI_4.sin();
    assert!((second.position.x - expected_x).abs() < EPSILON);
    assert!((second.position.y - expected_y).abs() < EPSILON);

    match &second.data {
        NodeData::MindMapNode(data) => assert_eq!(data.color_index, 2),
        other => panic!("expected mind-map child, got {other:?}"),
    }
}

#[test]
fn add_child_only_counts_outgoing_edges() {
    let delta = create_mind_map(&config(0.0, 0.0, &["a"]));
    let parent = delta.nodes[0].clone();
    let child = delta.nodes[1].clone();

    // The child's own outgoing edges are empty, so its first child takes
    // slot 0 even though an inbound edge exists.
    let (grandchild, _) = add_child_to_node(&child, &delta.edges, "g").unwrap();
    assert!((grandchild.position.x - (child.position.x + CHILD_RADIUS)).abs() < EPSILON);

    // The parent already has one outgoing edge, so its next child takes
    // slot 1.
    let (next, _) = add_child_to_node(&parent, &delta.edges, "n").unwrap();
    let angle = 2.0 * PI / 8.0;
    assert!((next.position.x - CHILD_RADIUS * angle.cos()).abs() < EPSILON);
    assert!((next.position.y - CHILD_RADIUS * angle.sin()).abs() < EPSILON);
}

#[test]
fn add_child_rejects_non_mindmap_parents() {
    let card = Node::new(
        NodeData::TextCard(TextCardData::default()),
        Position::new(0.0, 0.0),
    );
    assert!(add_child_to_node(&card, &[], "nope").is_none());
}

#[test]
fn generated_map_inserts_cleanly_into_a_store() {
    let mut store = GraphStore::open(Board::new("mindmap board"));
    let delta = create_mind_map(&config(400.0, 300.0, &["a", "b", "c"]));

    assert!(store.extend(delta));
    assert_eq!(store.nodes().len(), 4);
    assert_eq!(store.edges().len(), 3);
    for edge in store.edges() {
        assert!(store.node(edge.source).is_some());
        assert!(store.node(edge.target).is_some());
    }
}

#[test]
fn builtin_templates_are_complete() {
    let templates = templates();
    assert_eq!(templates.len(), 5);
    for template in templates {
        assert!(!template.name.is_empty());
        assert!(!template.topic.is_empty());
        assert!(template.subtopics.len() >= 4);
    }
}
