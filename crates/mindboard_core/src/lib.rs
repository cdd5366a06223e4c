//! Core engine for the mind-board canvas module.
//! This crate is the single source of truth for board/graph invariants.
//!
//! The host UI renders nodes and dispatches pointer events; persistence,
//! rasterization and card search are collaborators reached through plain
//! records and traits. The engine itself performs no I/O beyond its log
//! sink.

pub mod gesture;
pub mod graph;
pub mod logging;
pub mod model;
pub mod registry;
pub mod snapshot;

pub use gesture::{GestureController, GestureSurface, NodeFrame};
pub use graph::mindmap::{
    add_child_to_node, create_mind_map, templates, MindMapConfig, MindMapTemplate, CHILD_RADIUS,
    MIND_MAP_RADIUS,
};
pub use graph::store::{GraphDelta, GraphStore, NodePatch};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{Board, BoardId};
pub use model::edge::{Edge, EdgeId, EdgeKind};
pub use model::geometry::{Bounds, Position, Size};
pub use model::node::{
    GroupData, ImageCardData, MindMapNodeData, Node, NodeData, NodeId, NodeKind, NoteCardData,
    StickyNoteData, TextCardData, TodoCardData, TodoItem, COLOR_PALETTE_SIZE,
};
pub use registry::{
    note_card_from_record, BoardFilter, BoardRegistry, CardRecord, DisplayMode, ViewMode,
};
pub use snapshot::{
    copy_nodes, export_to_json, export_to_png, import_from_json, paste_nodes, ExportError,
    PngExport, Rasterizer, SnapshotError, IMPORTED_TITLE_SUFFIX, PASTE_OFFSET,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
