use mindboard_core::{
    copy_nodes, create_mind_map, export_to_json, export_to_png, import_from_json, paste_nodes,
    Board, Edge, EdgeKind, ExportError, GraphStore, GroupData, MindMapConfig, Node, NodeData,
    Position, Rasterizer, SnapshotError, TextCardData, IMPORTED_TITLE_SUFFIX, PASTE_OFFSET,
};
use uuid::Uuid;

fn demo_board() -> Board {
    let mut store = GraphStore::open(Board::new("demo"));
    let delta = create_mind_map(&MindMapConfig {
        center_x: 400.0,
        center_y: 300.0,
        topic: "Topic".to_string(),
        subtopics: vec!["a".to_string(), "b".to_string()],
    });
    store.extend(delta);
    store.into_board()
}

fn text_card(x: f64, y: f64) -> Node {
    Node::new(NodeData::TextCard(TextCardData::default()), Position::new(x, y))
}

#[test]
fn export_import_roundtrip_mints_fresh_identity() {
    let mut board = demo_board();
    board.nodes[0].selected = true;
    let raw = export_to_json(&board).unwrap();

    let imported = import_from_json(&raw).unwrap();
    assert_ne!(imported.id, board.id, "imported board must get a fresh id");
    assert_eq!(imported.title, format!("demo{IMPORTED_TITLE_SUFFIX}"));
    assert_eq!(imported.nodes.len(), board.nodes.len());
    assert_eq!(imported.edges.len(), board.edges.len());
    assert!(imported.created_at >= board.created_at);
    assert_eq!(imported.created_at, imported.updated_at);
    assert!(!imported.is_favorite);
    assert!(
        imported.nodes.iter().all(|node| !node.selected),
        "ephemeral flags must be cleared"
    );
}

#[test]
fn import_preserves_node_payloads() {
    let board = demo_board();
    let raw = export_to_json(&board).unwrap();
    let imported = import_from_json(&raw).unwrap();

    for (original, restored) in board.nodes.iter().zip(imported.nodes.iter()) {
        assert_eq!(original.data, restored.data);
        assert_eq!(original.position, restored.position);
    }
}

#[test]
fn import_rejects_missing_required_fields() {
    let err = import_from_json(r#"{"id":"x"}"#).unwrap_err();
    match err {
        SnapshotError::InvalidFormat(message) => {
            assert!(message.contains("title"), "unexpected message: {message}")
        }
        other => panic!("expected a format error, got {other:?}"),
    }

    let err = import_from_json(r#"{"id":"x","title":"t","nodes":[]}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidFormat(_)));
}

#[test]
fn import_rejects_ill_typed_fields() {
    // `id` present but not a UUID; `nodes` present but not an array.
    let err =
        import_from_json(r#"{"id":"x","title":"t","nodes":[],"edges":[]}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidFormat(_)));

    let err =
        import_from_json(r#"{"id":"b6f5ddad-8d5b-4f4a-9f0e-53d3bb2e12a0","title":"t","nodes":7,"edges":[]}"#)
            .unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidFormat(_)));
}

#[test]
fn import_rejects_syntactically_broken_json() {
    let err = import_from_json("not json at all").unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidJson(_)));

    let err = import_from_json(r#"["a board cannot be an array"]"#).unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidFormat(_)));
}

#[test]
fn import_rejects_dangling_edges() {
    let mut board = Board::new("broken");
    let node = text_card(0.0, 0.0);
    let node_id = node.id;
    board.nodes.push(node);
    board
        .edges
        .push(Edge::new(node_id, Uuid::new_v4(), EdgeKind::Plain));

    let raw = export_to_json(&board).unwrap();
    let err = import_from_json(&raw).unwrap_err();
    match err {
        SnapshotError::InvalidFormat(message) => {
            assert!(message.contains("references"), "unexpected message: {message}")
        }
        other => panic!("expected a format error, got {other:?}"),
    }
}

#[test]
fn paste_remints_ids_and_offsets_positions() {
    let a = text_card(10.0, 10.0);
    let b = text_card(200.0, 100.0);
    let original_ids = [a.id, b.id];

    let raw = copy_nodes(&[a, b]).unwrap();
    let pasted = paste_nodes(&raw).unwrap();

    assert_eq!(pasted.len(), 2);
    for (node, original_id) in pasted.iter().zip(original_ids.iter()) {
        assert_ne!(node.id, *original_id);
        assert!(!node.selected);
    }
    assert_eq!(pasted[0].position, Position::new(10.0 + PASTE_OFFSET, 10.0 + PASTE_OFFSET));
    assert_eq!(pasted[1].position, Position::new(250.0, 150.0));
}

#[test]
fn paste_keeps_a_copied_group_subset_consistent() {
    // A group and its single member, copied together.
    let mut member = text_card(30.0, 30.0);
    let group = Node::new(
        NodeData::GroupNode(GroupData {
            title: "Group 1".to_string(),
            node_ids: vec![member.id],
            width: 300.0,
            height: 200.0,
            color_index: 0,
            is_collapsed: false,
        }),
        Position::new(100.0, 100.0),
    );
    member.parent_id = Some(group.id);

    let raw = copy_nodes(&[group, member]).unwrap();
    let pasted = paste_nodes(&raw).unwrap();

    let new_group = &pasted[0];
    let new_member = &pasted[1];
    assert_eq!(new_member.parent_id, Some(new_group.id));
    let data = new_group.as_group().unwrap();
    assert_eq!(data.node_ids, vec![new_member.id]);

    // Only the top-level group is offset; the member stays group-relative.
    assert_eq!(new_group.position, Position::new(150.0, 150.0));
    assert_eq!(new_member.position, Position::new(30.0, 30.0));
}

#[test]
fn paste_drops_parent_links_that_left_the_subset() {
    let mut member = text_card(30.0, 30.0);
    member.parent_id = Some(Uuid::new_v4()); // group not part of the copy

    let raw = copy_nodes(&[member]).unwrap();
    let pasted = paste_nodes(&raw).unwrap();

    assert_eq!(pasted[0].parent_id, None);
    assert_eq!(pasted[0].position, Position::new(80.0, 80.0));
}

#[test]
fn paste_rejects_non_array_payloads() {
    let err = paste_nodes(r#"{"not":"an array"}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidFormat(_)));

    let err = paste_nodes("{{{{").unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidJson(_)));
}

struct FixedRasterizer {
    result: Result<Vec<u8>, String>,
}

impl Rasterizer for FixedRasterizer {
    type Surface = &'static str;

    fn rasterize(&self, _surface: &Self::Surface) -> Result<Vec<u8>, String> {
        self.result.clone()
    }
}

#[test]
fn png_export_delegates_to_the_rasterizer() {
    let board = Board::new("My Board");
    let rasterizer = FixedRasterizer {
        result: Ok(vec![0x89, 0x50, 0x4e, 0x47]),
    };

    let export = export_to_png(&rasterizer, &"viewport", &board).unwrap();
    assert_eq!(export.file_name, "My Board.png");
    assert_eq!(export.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
}

#[test]
fn png_export_surfaces_rasterizer_failures() {
    let board = Board::new("My Board");
    let rasterizer = FixedRasterizer {
        result: Err("viewport went away".to_string()),
    };

    let err = export_to_png(&rasterizer, &"viewport", &board).unwrap_err();
    match err {
        ExportError::Rasterize(message) => assert!(message.contains("viewport")),
    }
}
