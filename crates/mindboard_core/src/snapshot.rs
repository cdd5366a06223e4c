//! Board snapshot export/import and clipboard transfer.
//!
//! # Responsibility
//! - Serialize a board to its transportable JSON document and validate
//!   inbound documents before they reach the registry.
//! - Re-mint identity on import and paste so transferred content never
//!   collides with existing boards or nodes.
//!
//! # Invariants
//! - Import either returns a fully valid board or an error; it never
//!   partially constructs one.
//! - Imported and pasted records carry fresh ids and cleared ephemeral
//!   flags.

use crate::model::board::{now_epoch_ms, Board};
use crate::model::node::{Node, NodeId};
use log::info;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Offset applied to pasted nodes so they never exactly overlap their
/// source.
pub const PASTE_OFFSET: f64 = 50.0;

/// Suffix appended to an imported board's title.
pub const IMPORTED_TITLE_SUFFIX: &str = " (imported)";

const REQUIRED_BOARD_FIELDS: [&str; 4] = ["id", "title", "nodes", "edges"];

/// Snapshot (de)serialization failure.
#[derive(Debug)]
pub enum SnapshotError {
    /// The payload is not syntactically valid JSON.
    InvalidJson(serde_json::Error),
    /// The payload is valid JSON but not a valid board document.
    InvalidFormat(String),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "snapshot is not valid JSON: {err}"),
            Self::InvalidFormat(message) => write!(f, "invalid board snapshot: {message}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::InvalidFormat(_) => None,
        }
    }
}

/// Rasterization collaborator used by PNG export. The host supplies the
/// surface type and the actual pixel work.
pub trait Rasterizer {
    type Surface;

    fn rasterize(&self, surface: &Self::Surface) -> Result<Vec<u8>, String>;
}

/// Result of a PNG export: encoded bytes plus a suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// PNG export failure.
#[derive(Debug)]
pub enum ExportError {
    Rasterize(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rasterize(message) => write!(f, "rasterization failed: {message}"),
        }
    }
}

impl Error for ExportError {}

/// Serializes a board to its snapshot document.
pub fn export_to_json(board: &Board) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(board).map_err(SnapshotError::InvalidJson)
}

/// Parses and validates a snapshot document into a board ready to install.
///
/// # Contract
/// - `id`, `title`, `nodes` and `edges` must be present and well-typed;
///   anything else is a hard [`SnapshotError`].
/// - Edges must reference nodes contained in the document and ids must be
///   unique, so an imported board satisfies the graph invariants as-is.
/// - The returned board carries a fresh id, an `" (imported)"` title
/// suffix, reset timestamps and cleared ephemeral flags.
pub fn import_from_json(raw: &str) -> Result<Board, SnapshotError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(SnapshotError::InvalidJson)?;
    let object = value.as_object().ok_or_else(|| {
        SnapshotError::InvalidFormat("snapshot root must be a JSON object".to_string())
    })?;
    for field in REQUIRED_BOARD_FIELDS {
        if !object.contains_key(field) {
            return Err(SnapshotError::InvalidFormat(format!(
                "snapshot is missing required field `{field}`"
            )));
        }
    }

    let mut board: Board = serde_json::from_value(value)
        .map_err(|err| SnapshotError::InvalidFormat(err.to_string()))?;
    validate_graph(&board)?;

    board.id = Uuid::new_v4();
    board.title.push_str(IMPORTED_TITLE_SUFFIX);
    let now = now_epoch_ms();
    board.created_at = now;
    board.updated_at = now;
    board.is_favorite = false;
    for node in &mut board.nodes {
        node.selected = false;
        node.hidden = false;
    }
    for edge in &mut board.edges {
        edge.hidden = false;
    }

    info!(
        "event=board_imported module=snapshot status=ok board={} nodes={} edges={}",
        board.id,
        board.nodes.len(),
        board.edges.len()
    );
    Ok(board)
}

/// Serializes a node subset for the clipboard.
pub fn copy_nodes(nodes: &[Node]) -> Result<String, SnapshotError> {
    serde_json::to_string(nodes).map_err(SnapshotError::InvalidJson)
}

/// Parses a clipboard payload back into nodes ready to insert.
///
/// Node ids are re-minted and positions of top-level nodes are offset by
/// (+50, +50). Parent references and group member lists are remapped when
/// the counterpart was part of the same payload and dropped otherwise, so
/// the pasted subset is self-consistent.
pub fn paste_nodes(raw: &str) -> Result<Vec<Node>, SnapshotError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(SnapshotError::InvalidJson)?;
    if !value.is_array() {
        return Err(SnapshotError::InvalidFormat(
            "clipboard payload must be a JSON array of nodes".to_string(),
        ));
    }
    let nodes: Vec<Node> = serde_json::from_value(value)
        .map_err(|err| SnapshotError::InvalidFormat(err.to_string()))?;

    let mut minted: HashMap<NodeId, NodeId> = HashMap::with_capacity(nodes.len());
    for node in &nodes {
        if minted.insert(node.id, Uuid::new_v4()).is_some() {
            return Err(SnapshotError::InvalidFormat(format!(
                "clipboard payload repeats node id `{}`",
                node.id
            )));
        }
    }

    let pasted = nodes
        .into_iter()
        .map(|mut node| {
            node.id = minted[&node.id];
            node.parent_id = node
                .parent_id
                .and_then(|parent| minted.get(&parent).copied());
            if node.parent_id.is_none() {
                node.position = node.position.offset(PASTE_OFFSET, PASTE_OFFSET);
            }
            node.selected = false;
            node.hidden = false;
            if let Some(group) = node.as_group_mut() {
                group.node_ids = group
                    .node_ids
                    .iter()
                    .filter_map(|member| minted.get(member).copied())
                    .collect();
            }
            node
        })
        .collect();
    Ok(pasted)
}

/// Rasterizes the current visual surface into a PNG document.
///
/// Export is read-only: board state is unaffected whether or not the
/// collaborator succeeds.
pub fn export_to_png<R: Rasterizer>(
    rasterizer: &R,
    surface: &R::Surface,
    board: &Board,
) -> Result<PngExport, ExportError> {
    let bytes = rasterizer
        .rasterize(surface)
        .map_err(ExportError::Rasterize)?;
    Ok(PngExport {
        file_name: format!("{}.png", board.title),
        bytes,
    })
}

/// Rejects documents that would violate the board graph invariants.
fn validate_graph(board: &Board) -> Result<(), SnapshotError> {
    let mut node_ids: HashSet<NodeId> = HashSet::with_capacity(board.nodes.len());
    for node in &board.nodes {
        if !node_ids.insert(node.id) {
            return Err(SnapshotError::InvalidFormat(format!(
                "snapshot repeats node id `{}`",
                node.id
            )));
        }
    }
    let mut edge_ids = HashSet::with_capacity(board.edges.len());
    for edge in &board.edges {
        if !edge_ids.insert(edge.id) {
            return Err(SnapshotError::InvalidFormat(format!(
                "snapshot repeats edge id `{}`",
                edge.id
            )));
        }
        if !node_ids.contains(&edge.source) || !node_ids.contains(&edge.target) {
            return Err(SnapshotError::InvalidFormat(format!(
                "edge `{}` references a node that is not in the snapshot",
                edge.id
            )));
        }
    }
    Ok(())
}
