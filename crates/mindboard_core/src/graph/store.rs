//! Graph store: structural CRUD over one open board.
//!
//! # Responsibility
//! - Provide the only mutation path for a board's nodes and edges.
//! - Commit every mutation as a fresh copy-on-write snapshot and keep the
//!   board's `updated_at` and a revision counter moving.
//!
//! # Invariants
//! - No edge ever references a missing node, not even transiently between
//!   operations.
//! - Group containment stays bidirectionally consistent: a group's
//!   `node_ids` is exactly the set of nodes parented to it.
//! - Structural misuse (duplicate ids, missing endpoints, invalid group
//!   requests) is rejected as a logged no-op, never a panic.

use crate::graph::grouping;
use crate::model::board::Board;
use crate::model::edge::{Edge, EdgeId, EdgeKind};
use crate::model::geometry::{Position, Size};
use crate::model::node::{Node, NodeData, NodeId};
use log::{debug, info, warn};
use std::collections::HashSet;

/// Partial update applied to one node through [`GraphStore::update_node`].
///
/// Parenting is intentionally absent: group membership only changes through
/// [`GraphStore::group`] and [`GraphStore::ungroup`], which keep the
/// containment invariant in one place.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub data: Option<NodeData>,
    pub selected: Option<bool>,
    pub hidden: Option<bool>,
}

impl NodePatch {
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn data(data: NodeData) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn selected(selected: bool) -> Self {
        Self {
            selected: Some(selected),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.size.is_none()
            && self.data.is_none()
            && self.selected.is_none()
            && self.hidden.is_none()
    }
}

/// A batch of generated nodes and edges inserted atomically, e.g. the
/// output of the mind-map generator.
#[derive(Debug, Clone, Default)]
pub struct GraphDelta {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Editing session over one board.
///
/// The store owns the board for the session; the registry hands the board
/// in via [`GraphStore::open`] and takes it back via
/// [`GraphStore::into_board`].
pub struct GraphStore {
    board: Board,
    revision: u64,
}

impl GraphStore {
    /// Opens a board for editing.
    pub fn open(board: Board) -> Self {
        info!(
            "event=board_opened module=graph status=ok board={} nodes={} edges={}",
            board.id,
            board.nodes.len(),
            board.edges.len()
        );
        Self { board, revision: 0 }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the edited board, ending the session.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Number of snapshots committed in this session. Each structural
    /// mutation and each gesture commit bumps this exactly once.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn nodes(&self) -> &[Node] {
        &self.board.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.board.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.board.node(id)
    }

    /// Ids of currently selected nodes, in board order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.board
            .nodes
            .iter()
            .filter(|node| node.selected)
            .map(|node| node.id)
            .collect()
    }

    /// Replaces both vectors with the next snapshot and records the commit.
    fn commit(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.board.nodes = nodes;
        self.board.edges = edges;
        self.board.touch();
        self.revision += 1;
    }

    /// Adds one node. No-op when the id is already taken.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.board.node(node.id).is_some() {
            warn!(
                "event=node_add_rejected module=graph status=noop reason=duplicate_id node={}",
                node.id
            );
            return false;
        }
        let node_id = node.id;
        let kind = node.kind();
        let mut nodes = self.board.nodes.clone();
        nodes.push(node);
        self.commit(nodes, self.board.edges.clone());
        debug!(
            "event=node_added module=graph status=ok node={node_id} kind={kind:?}"
        );
        true
    }

    /// Adds one edge. No-op when either endpoint is missing or the id is
    /// already taken.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if self.board.edge(edge.id).is_some() {
            warn!(
                "event=edge_add_rejected module=graph status=noop reason=duplicate_id edge={}",
                edge.id
            );
            return false;
        }
        if self.board.node(edge.source).is_none() || self.board.node(edge.target).is_none() {
            warn!(
                "event=edge_add_rejected module=graph status=noop reason=missing_endpoint source={} target={}",
                edge.source, edge.target
            );
            return false;
        }
        let edge_id = edge.id;
        let mut edges = self.board.edges.clone();
        edges.push(edge);
        self.commit(self.board.nodes.clone(), edges);
        debug!("event=edge_added module=graph status=ok edge={edge_id}");
        true
    }

    /// Connects two nodes with a plain edge.
    ///
    /// # Contract
    /// - No-op (`None`) when either endpoint is missing.
    /// - Idempotent: no-op when the pair already has a plain edge in this
    ///   direction.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        if self.board.node(source).is_none() || self.board.node(target).is_none() {
            debug!(
                "event=connect_rejected module=graph status=noop reason=missing_endpoint source={source} target={target}"
            );
            return None;
        }
        let duplicate = self.board.edges.iter().any(|edge| {
            edge.source == source && edge.target == target && edge.kind == EdgeKind::Plain
        });
        if duplicate {
            debug!(
                "event=connect_rejected module=graph status=noop reason=duplicate source={source} target={target}"
            );
            return None;
        }

        let edge = Edge::new(source, target, EdgeKind::Plain);
        let edge_id = edge.id;
        let mut edges = self.board.edges.clone();
        edges.push(edge);
        self.commit(self.board.nodes.clone(), edges);
        debug!("event=connected module=graph status=ok edge={edge_id}");
        Some(edge_id)
    }

    /// Applies a partial update to one node in a single commit.
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) -> bool {
        self.update_nodes(vec![(id, patch)]) > 0
    }

    /// Applies a batch of partial updates in a single commit.
    ///
    /// Returns the number of nodes actually patched; entries targeting
    /// missing nodes or carrying empty patches are skipped.
    pub fn update_nodes(&mut self, patches: Vec<(NodeId, NodePatch)>) -> usize {
        let mut applied = 0;
        let mut nodes = self.board.nodes.clone();
        for (id, patch) in patches {
            if patch.is_empty() {
                continue;
            }
            match nodes.iter_mut().find(|node| node.id == id) {
                Some(node) => {
                    apply_patch(node, patch);
                    applied += 1;
                }
                None => {
                    warn!(
                        "event=node_update_rejected module=graph status=noop reason=not_found node={id}"
                    );
                }
            }
        }
        if applied > 0 {
            self.commit(nodes, self.board.edges.clone());
            debug!("event=nodes_updated module=graph status=ok count={applied}");
        }
        applied
    }

    /// Deletes one node, cascading to every edge that references it and to
    /// any owning group's member list. Deleting a group dissolves it: the
    /// children are re-parented back to board-absolute coordinates.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.board.node(id) else {
            debug!("event=node_delete_rejected module=graph status=noop reason=not_found node={id}");
            return false;
        };
        if node.is_group() {
            return self.ungroup(id);
        }

        let nodes: Vec<Node> = self
            .board
            .nodes
            .iter()
            .filter(|node| node.id != id)
            .map(|node| {
                let mut node = node.clone();
                if let Some(group) = node.as_group_mut() {
                    group.node_ids.retain(|member| *member != id);
                }
                node
            })
            .collect();
        let edges: Vec<Edge> = self
            .board
            .edges
            .iter()
            .filter(|edge| !edge.touches(id))
            .cloned()
            .collect();

        let removed_edges = self.board.edges.len() - edges.len();
        self.commit(nodes, edges);
        info!(
            "event=node_deleted module=graph status=ok node={id} cascaded_edges={removed_edges}"
        );
        true
    }

    /// Deletes one edge. Never deletes a node.
    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        if self.board.edge(id).is_none() {
            debug!("event=edge_delete_rejected module=graph status=noop reason=not_found edge={id}");
            return false;
        }
        let edges: Vec<Edge> = self
            .board
            .edges
            .iter()
            .filter(|edge| edge.id != id)
            .cloned()
            .collect();
        self.commit(self.board.nodes.clone(), edges);
        debug!("event=edge_deleted module=graph status=ok edge={id}");
        true
    }

    /// Inserts a generated batch (e.g. a mind map) atomically.
    ///
    /// # Contract
    /// - Every new id must be unused; every new edge endpoint must exist in
    ///   the board or in the batch. Otherwise the whole batch is rejected.
    pub fn extend(&mut self, delta: GraphDelta) -> bool {
        let mut known: HashSet<NodeId> = self.board.nodes.iter().map(|node| node.id).collect();
        for node in &delta.nodes {
            if !known.insert(node.id) {
                warn!(
                    "event=extend_rejected module=graph status=noop reason=duplicate_node node={}",
                    node.id
                );
                return false;
            }
        }
        let edge_ids: HashSet<EdgeId> = self.board.edges.iter().map(|edge| edge.id).collect();
        for edge in &delta.edges {
            if edge_ids.contains(&edge.id) {
                warn!(
                    "event=extend_rejected module=graph status=noop reason=duplicate_edge edge={}",
                    edge.id
                );
                return false;
            }
            if !known.contains(&edge.source) || !known.contains(&edge.target) {
                warn!(
                    "event=extend_rejected module=graph status=noop reason=missing_endpoint edge={}",
                    edge.id
                );
                return false;
            }
        }

        let added_nodes = delta.nodes.len();
        let added_edges = delta.edges.len();
        let mut nodes = self.board.nodes.clone();
        nodes.extend(delta.nodes);
        let mut edges = self.board.edges.clone();
        edges.extend(delta.edges);
        self.commit(nodes, edges);
        info!(
            "event=graph_extended module=graph status=ok nodes={added_nodes} edges={added_edges}"
        );
        true
    }

    /// Replaces the selection set wholesale.
    ///
    /// Selection is modeled as one explicit set value: nodes listed in `ids`
    /// become selected, every other node becomes unselected.
    pub fn set_selection(&mut self, ids: &[NodeId]) {
        let wanted: HashSet<NodeId> = ids.iter().copied().collect();
        let nodes: Vec<Node> = self
            .board
            .nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                node.selected = wanted.contains(&node.id);
                node
            })
            .collect();
        self.commit(nodes, self.board.edges.clone());
    }

    /// Groups the given nodes under a new group container.
    ///
    /// # Contract
    /// - Requires at least two distinct members, none of which is a group
    ///   and none of which is already grouped (flat grouping only).
    /// - Member positions are rebased to group-relative space so that
    ///   `group.position + member.position` stays where the member was.
    /// - Invalid requests are logged no-ops returning `None`.
    pub fn group(&mut self, node_ids: &[NodeId]) -> Option<NodeId> {
        let plan = grouping::plan_group(&self.board, node_ids)?;
        let group_id = plan.group.id;
        let origin = plan.origin;
        let members: HashSet<NodeId> = plan.members.iter().copied().collect();

        let mut nodes: Vec<Node> = self
            .board
            .nodes
            .iter()
            .map(|node| {
                if !members.contains(&node.id) {
                    return node.clone();
                }
                let mut member = node.clone();
                member.position = member.position.to_relative(origin);
                member.parent_id = Some(group_id);
                member.selected = false;
                member
            })
            .collect();
        nodes.push(plan.group);

        self.commit(nodes, self.board.edges.clone());
        info!(
            "event=group_created module=grouping status=ok group={group_id} members={}",
            members.len()
        );
        Some(group_id)
    }

    /// Dissolves a group: children are restored to board-absolute
    /// coordinates and the group node (plus edges referencing it) is
    /// removed. The children survive.
    pub fn ungroup(&mut self, group_id: NodeId) -> bool {
        let Some(plan) = grouping::plan_ungroup(&self.board, group_id) else {
            debug!(
                "event=ungroup_rejected module=grouping status=noop reason=not_a_group node={group_id}"
            );
            return false;
        };
        let members: HashSet<NodeId> = plan.members.iter().copied().collect();

        let nodes: Vec<Node> = self
            .board
            .nodes
            .iter()
            .filter(|node| node.id != group_id)
            .map(|node| {
                if !members.contains(&node.id) {
                    return node.clone();
                }
                let mut member = node.clone();
                member.position = member.position.to_absolute(plan.origin);
                member.parent_id = None;
                member.hidden = false;
                member
            })
            .collect();
        let edges: Vec<Edge> = self
            .board
            .edges
            .iter()
            .filter(|edge| !edge.touches(group_id))
            .cloned()
            .collect();

        self.commit(nodes, edges);
        info!(
            "event=group_dissolved module=grouping status=ok group={group_id} members={}",
            members.len()
        );
        true
    }

    /// Collapses or expands a group, hiding or revealing its members and
    /// the edges attached to them.
    pub fn set_group_collapsed(&mut self, group_id: NodeId, collapsed: bool) -> bool {
        let members: HashSet<NodeId> = match self.board.node(group_id).and_then(Node::as_group) {
            Some(group) => group.node_ids.iter().copied().collect(),
            None => {
                debug!(
                    "event=collapse_rejected module=grouping status=noop reason=not_a_group node={group_id}"
                );
                return false;
            }
        };

        let nodes: Vec<Node> = self
            .board
            .nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                if node.id == group_id {
                    if let Some(group) = node.as_group_mut() {
                        group.is_collapsed = collapsed;
                    }
                } else if members.contains(&node.id) {
                    node.hidden = collapsed;
                }
                node
            })
            .collect();
        let edges: Vec<Edge> = self
            .board
            .edges
            .iter()
            .map(|edge| {
                let mut edge = edge.clone();
                if members.contains(&edge.source) || members.contains(&edge.target) {
                    edge.hidden = collapsed;
                }
                edge
            })
            .collect();

        self.commit(nodes, edges);
        debug!(
            "event=group_collapse_set module=grouping status=ok group={group_id} collapsed={collapsed}"
        );
        true
    }
}

/// Overwrites the patched fields on a node. A size patch on a group also
/// refreshes the mirrored extent in the group payload.
fn apply_patch(node: &mut Node, patch: NodePatch) {
    if let Some(position) = patch.position {
        node.position = position;
    }
    if let Some(size) = patch.size {
        node.size = Some(size);
        if let Some(group) = node.as_group_mut() {
            group.width = size.width;
            group.height = size.height;
        }
    }
    if let Some(data) = patch.data {
        node.data = data;
    }
    if let Some(selected) = patch.selected {
        node.selected = selected;
    }
    if let Some(hidden) = patch.hidden {
        node.hidden = hidden;
    }
}
