//! Node domain model.
//!
//! # Responsibility
//! - Define the seven node variants rendered on a board and their closed
//!   payload records.
//! - Provide the per-variant default, minimum and fallback sizes used by
//!   grouping and the resize protocol.
//!
//! # Invariants
//! - `id` is stable and unique within a board.
//! - `position` is board-absolute unless `parent_id` is set, in which case
//!   it is relative to the owning group's position.
//! - A group's `data.node_ids` is exactly the set of nodes whose
//!   `parent_id` equals the group's id (kept by the graph store).

use crate::model::geometry::{Position, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a node within one board.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NodeId = Uuid;

/// Number of entries in the host color palette. `color_index` values are
/// always taken modulo this.
pub const COLOR_PALETTE_SIZE: usize = 6;

/// Variant tag for every node type the canvas can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    TextCard,
    NoteCard,
    ImageCard,
    TodoCard,
    StickyNote,
    MindMapNode,
    GroupNode,
}

impl NodeKind {
    /// Rendered size used when a node carries no explicit `size`.
    pub fn default_size(self) -> Size {
        match self {
            Self::MindMapNode => Size::new(140.0, 48.0),
            Self::GroupNode => Size::new(300.0, 150.0),
            _ => Size::new(280.0, 180.0),
        }
    }

    /// Smallest size the resize protocol may commit for this variant.
    pub fn min_size(self) -> Size {
        match self {
            Self::NoteCard => Size::new(250.0, 200.0),
            Self::StickyNote => Size::new(150.0, 100.0),
            Self::MindMapNode => Size::new(140.0, 48.0),
            Self::GroupNode => Size::new(100.0, 100.0),
            _ => Size::new(120.0, 60.0),
        }
    }

    /// Conservative extent used for bounds math when `size` is absent.
    ///
    /// Wider than `default_size` for cards that usually render larger than
    /// their initial payload suggests.
    pub fn fallback_bounds_size(self) -> Size {
        match self {
            Self::StickyNote => Size::new(250.0, 150.0),
            Self::NoteCard => Size::new(400.0, 250.0),
            Self::MindMapNode => Size::new(140.0, 48.0),
            _ => Size::new(300.0, 150.0),
        }
    }

    pub fn is_group(self) -> bool {
        matches!(self, Self::GroupNode)
    }
}

/// One entry of a todo-list card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCardData {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color_index: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCardData {
    /// Display title; falls back to the source card's title in the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    /// Id of the note record this card was created from, when it came in
    /// through the card-search collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_card_id: Option<String>,
    #[serde(default)]
    pub color_index: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCardData {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub color_index: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoCardData {
    #[serde(default)]
    pub todos: Vec<TodoItem>,
    #[serde(default)]
    pub color_index: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyNoteData {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color_index: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapNodeData {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color_index: u8,
    #[serde(default)]
    pub is_center: bool,
}

/// Payload of a group container node.
///
/// `width`/`height` mirror the node-level size so the serialized record is
/// self-contained; the store keeps them in sync when a group is resized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupData {
    pub title: String,
    pub node_ids: Vec<NodeId>,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub color_index: u8,
    #[serde(default)]
    pub is_collapsed: bool,
}

/// Variant payload, serialized as the `type`/`data` field pair of the node
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum NodeData {
    TextCard(TextCardData),
    NoteCard(NoteCardData),
    ImageCard(ImageCardData),
    TodoCard(TodoCardData),
    StickyNote(StickyNoteData),
    MindMapNode(MindMapNodeData),
    GroupNode(GroupData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::TextCard(_) => NodeKind::TextCard,
            Self::NoteCard(_) => NodeKind::NoteCard,
            Self::ImageCard(_) => NodeKind::ImageCard,
            Self::TodoCard(_) => NodeKind::TodoCard,
            Self::StickyNote(_) => NodeKind::StickyNote,
            Self::MindMapNode(_) => NodeKind::MindMapNode,
            Self::GroupNode(_) => NodeKind::GroupNode,
        }
    }
}

/// A positioned, typed visual unit on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Stable id, unique within the owning board.
    pub id: NodeId,
    #[serde(flatten)]
    pub data: NodeData,
    pub position: Position,
    /// Explicit rendered size; `None` means "variant default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Owning group, when this node is a group member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Ephemeral UI selection flag; not meaningful across sessions.
    #[serde(default)]
    pub selected: bool,
    /// Ephemeral visibility flag driven by group collapse.
    #[serde(default)]
    pub hidden: bool,
}

impl Node {
    /// Creates an unparented, unselected node with a generated stable id.
    pub fn new(data: NodeData, position: Position) -> Self {
        Self::with_id(Uuid::new_v4(), data, position)
    }

    /// Creates a node with a caller-provided stable id.
    ///
    /// Used by generators and import paths where identity already exists.
    pub fn with_id(id: NodeId, data: NodeData, position: Position) -> Self {
        Self {
            id,
            data,
            position,
            size: None,
            parent_id: None,
            selected: false,
            hidden: false,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn is_group(&self) -> bool {
        self.kind().is_group()
    }

    /// Rendered size: the explicit size when present, the variant default
    /// otherwise. Groups report their payload extent.
    pub fn frame_size(&self) -> Size {
        if let NodeData::GroupNode(group) = &self.data {
            return Size::new(group.width, group.height);
        }
        self.size.unwrap_or_else(|| self.kind().default_size())
    }

    /// Extent used for grouping bounds: the explicit size when present, a
    /// conservative per-variant fallback otherwise.
    pub fn bounds_size(&self) -> Size {
        if let NodeData::GroupNode(group) = &self.data {
            return Size::new(group.width, group.height);
        }
        self.size
            .unwrap_or_else(|| self.kind().fallback_bounds_size())
    }

    pub fn as_group(&self) -> Option<&GroupData> {
        match &self.data {
            NodeData::GroupNode(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupData> {
        match &mut self.data {
            NodeData::GroupNode(group) => Some(group),
            _ => None,
        }
    }
}
