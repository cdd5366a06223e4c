//! Board domain model.
//!
//! # Responsibility
//! - Define the unit of persistence and of "open for editing".
//! - Provide the timestamp convention shared by every mutation path.
//!
//! # Invariants
//! - Node ids and edge ids are unique within a board.
//! - `updated_at` moves forward on every committed mutation.

use crate::model::edge::{Edge, EdgeId};
use crate::model::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a board.
pub type BoardId = Uuid;

/// One independent canvas document: a node-edge graph plus list metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub is_favorite: bool,
    /// Optional preview image reference, maintained by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Board {
    /// Creates an empty board with fresh identity and timestamps.
    pub fn new(title: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: now,
            updated_at: now,
            is_favorite: false,
            thumbnail: None,
        }
    }

    /// Records that this board was just mutated.
    pub fn touch(&mut self) {
        self.updated_at = now_epoch_ms();
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Number of group containers currently on the board.
    pub fn group_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_group()).count()
    }
}

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
