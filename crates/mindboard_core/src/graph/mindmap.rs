//! Mind-map generation: radial layout of a topic and its subtopics.
//!
//! # Responsibility
//! - Produce center/child node batches the store inserts atomically.
//! - Extend an existing mind-map node with one child without moving any
//!   previously placed siblings.
//!
//! # Invariants
//! - Generation is pure and deterministic: equal input geometry yields
//!   equal output geometry.
//! - Children of a generated map are evenly spaced on a circle of radius
//!   [`MIND_MAP_RADIUS`] around the center, starting from the top.

use crate::graph::store::GraphDelta;
use crate::model::edge::{Edge, EdgeKind};
use crate::model::geometry::Position;
use crate::model::node::{MindMapNodeData, Node, NodeData, COLOR_PALETTE_SIZE};
use log::debug;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Distance from the center node to generated subtopic children.
pub const MIND_MAP_RADIUS: f64 = 200.0;

/// Distance from a parent to a manually added child.
pub const CHILD_RADIUS: f64 = 150.0;

/// Number of angular slots used when growing a node child by child.
const CHILD_SLOTS: usize = 8;

/// Input for [`create_mind_map`].
#[derive(Debug, Clone, PartialEq)]
pub struct MindMapConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub topic: String,
    pub subtopics: Vec<String>,
}

/// A built-in starter layout offered by the host when creating a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MindMapTemplate {
    pub name: &'static str,
    pub topic: &'static str,
    pub subtopics: &'static [&'static str],
}

const TEMPLATES: &[MindMapTemplate] = &[
    MindMapTemplate {
        name: "Project planning",
        topic: "New project",
        subtopics: &["Requirements", "Tech stack", "Staffing", "Timeline", "Risks"],
    },
    MindMapTemplate {
        name: "Study plan",
        topic: "Study topic",
        subtopics: &["Fundamentals", "Practice", "Deep dive", "Write-up"],
    },
    MindMapTemplate {
        name: "Problem analysis",
        topic: "Core problem",
        subtopics: &["Current state", "Root causes", "Solutions", "Action plan", "Evaluation"],
    },
    MindMapTemplate {
        name: "Product design",
        topic: "Product concept",
        subtopics: &["User needs", "Features", "Interaction", "Implementation", "Validation"],
    },
    MindMapTemplate {
        name: "Meeting notes",
        topic: "Meeting topic",
        subtopics: &["Discussion", "Decisions", "Action items", "Owners", "Deadlines"],
    },
];

/// The built-in mind-map templates, in display order.
pub fn templates() -> &'static [MindMapTemplate] {
    TEMPLATES
}

/// Generates a center node plus radially arranged children and the edges
/// connecting them.
///
/// Child `i` of `n` sits at angle `i * (2π/n) − π/2` (top first, clockwise)
/// at [`MIND_MAP_RADIUS`] from the center; its color cycles `(i+1) % 6` so
/// no child shares the center's color slot. An empty subtopic list yields
/// just the center node.
pub fn create_mind_map(config: &MindMapConfig) -> GraphDelta {
    let mut nodes = Vec::with_capacity(config.subtopics.len() + 1);
    let mut edges = Vec::with_capacity(config.subtopics.len());

    let center = Node::new(
        NodeData::MindMapNode(MindMapNodeData {
            label: config.topic.clone(),
            color_index: 0,
            is_center: true,
        }),
        Position::new(config.center_x, config.center_y),
    );
    let center_id = center.id;
    nodes.push(center);

    if !config.subtopics.is_empty() {
        let angle_step = TAU / config.subtopics.len() as f64;
        for (index, subtopic) in config.subtopics.iter().enumerate() {
            let angle = angle_step * index as f64 - FRAC_PI_2;
            let position = Position::new(
                config.center_x + MIND_MAP_RADIUS * angle.cos(),
                config.center_y + MIND_MAP_RADIUS * angle.sin(),
            );
            let child = Node::new(
                NodeData::MindMapNode(MindMapNodeData {
                    label: subtopic.clone(),
                    color_index: ((index + 1) % COLOR_PALETTE_SIZE) as u8,
                    is_center: false,
                }),
                position,
            );
            edges.push(Edge::new(center_id, child.id, EdgeKind::MindMap));
            nodes.push(child);
        }
    }

    debug!(
        "event=mindmap_generated module=mindmap status=ok children={}",
        config.subtopics.len()
    );
    GraphDelta { nodes, edges }
}

/// Extends an existing mind-map node with one child.
///
/// The child takes the next of eight π/4 slots at [`CHILD_RADIUS`], counted
/// from the parent's existing outgoing edges, so a manually grown map stays
/// roughly radial without moving earlier children. Returns `None` when the
/// parent is not a mind-map node.
pub fn add_child_to_node(
    parent: &Node,
    existing_edges: &[Edge],
    label: impl Into<String>,
) -> Option<(Node, Edge)> {
    if !matches!(parent.data, NodeData::MindMapNode(_)) {
        debug!(
            "event=mindmap_child_rejected module=mindmap status=noop reason=not_mindmap node={}",
            parent.id
        );
        return None;
    }

    let children = existing_edges
        .iter()
        .filter(|edge| edge.source == parent.id)
        .count();
    let angle = (children % CHILD_SLOTS) as f64 * (TAU / CHILD_SLOTS as f64);
    let position = Position::new(
        parent.position.x + CHILD_RADIUS * angle.cos(),
        parent.position.y + CHILD_RADIUS * angle.sin(),
    );

    let child = Node::new(
        NodeData::MindMapNode(MindMapNodeData {
            label: label.into(),
            color_index: ((children + 1) % COLOR_PALETTE_SIZE) as u8,
            is_center: false,
        }),
        position,
    );
    let edge = Edge::new(parent.id, child.id, EdgeKind::MindMap);
    Some((child, edge))
}
