//! Edge domain model.
//!
//! # Invariants
//! - `source` and `target` always reference nodes that exist on the same
//!   board; the graph store deletes edges together with either endpoint.

use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an edge within one board.
pub type EdgeId = Uuid;

/// Rendering family of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    /// Manually drawn connection between two cards.
    Plain,
    /// Generated connection between mind-map nodes.
    MindMap,
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default)]
    pub animated: bool,
    /// Ephemeral visibility flag driven by group collapse.
    #[serde(default)]
    pub hidden: bool,
}

impl Edge {
    /// Creates a non-animated edge with a generated stable id.
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self::with_id(Uuid::new_v4(), source, target, kind)
    }

    pub fn with_id(id: EdgeId, source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self {
            id,
            source,
            target,
            kind,
            animated: false,
            hidden: false,
        }
    }

    /// Whether this edge references the node on either end.
    pub fn touches(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}
