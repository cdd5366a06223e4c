//! Group planning: pure bounds and containment math for the store.
//!
//! # Responsibility
//! - Validate group requests above the store's commit path.
//! - Compute the padded union bounds and the coordinate rebase for new
//!   groups, and the inverse for dissolution.
//!
//! # Invariants
//! - Grouping is flat: a member must not be a group and must not already
//!   belong to a group.
//! - `ungroup(group(ids))` restores every member's absolute position.

use crate::model::board::Board;
use crate::model::geometry::{Bounds, Position};
use crate::model::node::{GroupData, Node, NodeData, NodeId, COLOR_PALETTE_SIZE};
use log::debug;
use std::collections::HashSet;

/// Padding added around the member union when sizing a new group.
pub(crate) const GROUP_PADDING: f64 = 30.0;

/// Validated plan for creating one group.
pub(crate) struct GroupPlan {
    /// The new group container node, positioned at the padded bounds
    /// origin and sized to the padded bounds.
    pub group: Node,
    /// Members in request order, deduplicated.
    pub members: Vec<NodeId>,
    /// Bounds origin; member positions are rebased relative to this.
    pub origin: Position,
}

/// Validated plan for dissolving one group.
pub(crate) struct UngroupPlan {
    /// Group position; member positions are rebased back by this.
    pub origin: Position,
    pub members: Vec<NodeId>,
}

/// Validates a group request and computes its geometry.
///
/// Returns `None` (a structural no-op for the caller) when fewer than two
/// distinct members remain, a member is missing, a member is itself a
/// group, or a member already belongs to a group.
pub(crate) fn plan_group(board: &Board, member_ids: &[NodeId]) -> Option<GroupPlan> {
    let mut seen = HashSet::new();
    let members: Vec<NodeId> = member_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();
    if members.len() < 2 {
        debug!(
            "event=group_rejected module=grouping status=noop reason=too_few_members count={}",
            members.len()
        );
        return None;
    }

    let mut frames = Vec::with_capacity(members.len());
    for id in &members {
        let Some(node) = board.node(*id) else {
            debug!("event=group_rejected module=grouping status=noop reason=missing_member node={id}");
            return None;
        };
        if node.is_group() {
            debug!("event=group_rejected module=grouping status=noop reason=member_is_group node={id}");
            return None;
        }
        if node.parent_id.is_some() {
            debug!(
                "event=group_rejected module=grouping status=noop reason=member_already_grouped node={id}"
            );
            return None;
        }
        frames.push((node.position, node.bounds_size()));
    }

    let bounds = Bounds::around(frames)?.expanded(GROUP_PADDING);
    let extent = bounds.size();
    let group_index = board.group_count();
    let data = GroupData {
        title: format!("Group {}", group_index + 1),
        node_ids: members.clone(),
        width: extent.width,
        height: extent.height,
        color_index: (group_index % COLOR_PALETTE_SIZE) as u8,
        is_collapsed: false,
    };
    let mut group = Node::new(NodeData::GroupNode(data), bounds.origin());
    group.size = Some(extent);

    Some(GroupPlan {
        group,
        members,
        origin: bounds.origin(),
    })
}

/// Resolves a group node into its dissolution plan.
pub(crate) fn plan_ungroup(board: &Board, group_id: NodeId) -> Option<UngroupPlan> {
    let group = board.node(group_id)?;
    let data = group.as_group()?;
    Some(UngroupPlan {
        origin: group.position,
        members: data.node_ids.clone(),
    })
}
