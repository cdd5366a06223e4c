//! Interactive drag/resize protocol.
//!
//! # Responsibility
//! - Track one pointer gesture (drag or resize) as an explicit value owned
//!   by the interaction handler, outside the graph store.
//! - Write high-frequency pointer updates directly to the presentation
//!   surface and commit exactly one store update when the gesture ends.
//!
//! # Invariants
//! - At most one gesture is in flight per controller.
//! - One gesture produces exactly one store commit, regardless of how many
//!   pointer-move events it saw.
//! - Input capture acquired at gesture start is released on every exit
//!   path, including teardown.
//!
//! Interruption policy: a gesture ended by [`GestureController::teardown`]
//! (owning component torn down, window focus lost) commits the last
//! presented frame exactly as a pointer-up would. Releasing the pointer
//! always commits; so does losing it.

use crate::graph::store::{GraphStore, NodePatch};
use crate::model::geometry::{Position, Size};
use crate::model::node::NodeId;
use log::debug;

/// Position and size of a node as the presentation layer shows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeFrame {
    pub position: Position,
    pub size: Size,
}

/// Presentation collaborator for the gesture protocol.
///
/// The host rendering layer implements this; the engine makes no assumption
/// about the rendering technology behind it. `capture_input` stands for
/// whatever global pointer grab the host uses for the gesture's duration
/// (document-level listeners, cursor override, selection suppression);
/// `release_input` must undo all of it.
pub trait GestureSurface {
    /// Shows a node at the given transient frame, bypassing the store.
    fn present_frame(&mut self, node_id: NodeId, frame: NodeFrame);

    /// Reads back the frame most recently presented for a node, if any.
    fn presented_frame(&self, node_id: NodeId) -> Option<NodeFrame>;

    /// Shows or updates the transient position/size readout for a node.
    fn show_readout(&mut self, node_id: NodeId, text: &str);

    /// Removes the transient readout for a node.
    fn clear_readout(&mut self, node_id: NodeId);

    /// Acquires global pointer capture for the gesture's duration.
    fn capture_input(&mut self);

    /// Releases global pointer capture.
    fn release_input(&mut self);
}

#[derive(Debug, Clone, Copy)]
enum GesturePhase {
    Idle,
    Dragging {
        node_id: NodeId,
        start_pointer: Position,
        start_frame: NodeFrame,
    },
    Resizing {
        node_id: NodeId,
        start_pointer: Position,
        start_frame: NodeFrame,
        min_size: Size,
    },
}

/// Per-canvas gesture state machine: `Idle -> Dragging -> Idle` and
/// `Idle -> Resizing -> Idle`.
pub struct GestureController {
    phase: GesturePhase,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, GesturePhase::Idle)
    }

    /// Node owning the in-flight gesture, if any.
    pub fn active_node(&self) -> Option<NodeId> {
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Dragging { node_id, .. } | GesturePhase::Resizing { node_id, .. } => {
                Some(node_id)
            }
        }
    }

    /// Starts dragging a node. No-op when a gesture is already in flight or
    /// the node does not exist.
    pub fn begin_drag<S: GestureSurface>(
        &mut self,
        store: &GraphStore,
        surface: &mut S,
        node_id: NodeId,
        pointer: Position,
    ) -> bool {
        let Some(start_frame) = self.begin(store, surface, node_id, "drag") else {
            return false;
        };
        self.phase = GesturePhase::Dragging {
            node_id,
            start_pointer: pointer,
            start_frame,
        };
        true
    }

    /// Starts resizing a node via its size handle. No-op when a gesture is
    /// already in flight or the node does not exist.
    pub fn begin_resize<S: GestureSurface>(
        &mut self,
        store: &GraphStore,
        surface: &mut S,
        node_id: NodeId,
        pointer: Position,
    ) -> bool {
        let Some(start_frame) = self.begin(store, surface, node_id, "resize") else {
            return false;
        };
        // `begin` verified the node exists.
        let min_size = store
            .node(node_id)
            .map(|node| node.kind().min_size())
            .unwrap_or(start_frame.size);
        self.phase = GesturePhase::Resizing {
            node_id,
            start_pointer: pointer,
            start_frame,
            min_size,
        };
        true
    }

    /// Shared gesture-start bookkeeping: captures the committed frame and
    /// acquires input capture.
    fn begin<S: GestureSurface>(
        &mut self,
        store: &GraphStore,
        surface: &mut S,
        node_id: NodeId,
        kind: &str,
    ) -> Option<NodeFrame> {
        if self.is_active() {
            debug!(
                "event=gesture_rejected module=gesture status=noop reason=busy node={node_id}"
            );
            return None;
        }
        let node = store.node(node_id)?;
        let start_frame = NodeFrame {
            position: node.position,
            size: node.frame_size(),
        };
        surface.capture_input();
        debug!("event=gesture_started module=gesture status=ok kind={kind} node={node_id}");
        Some(start_frame)
    }

    /// Handles one pointer-move event: derives the candidate frame from the
    /// pointer delta, clamps resize candidates to the variant minimum, and
    /// writes it to the presentation surface only.
    pub fn pointer_moved<S: GestureSurface>(&mut self, surface: &mut S, pointer: Position) {
        match self.phase {
            GesturePhase::Idle => {}
            GesturePhase::Dragging {
                node_id,
                start_pointer,
                start_frame,
            } => {
                let (dx, dy) = pointer.delta_from(start_pointer);
                let frame = NodeFrame {
                    position: start_frame.position.offset(dx, dy),
                    size: start_frame.size,
                };
                surface.present_frame(node_id, frame);
                surface.show_readout(
                    node_id,
                    &format!("{:.0}, {:.0}", frame.position.x, frame.position.y),
                );
            }
            GesturePhase::Resizing {
                node_id,
                start_pointer,
                start_frame,
                min_size,
            } => {
                let (dx, dy) = pointer.delta_from(start_pointer);
                let frame = NodeFrame {
                    position: start_frame.position,
                    size: start_frame.size.grown_by(dx, dy).clamped_to_min(min_size),
                };
                surface.present_frame(node_id, frame);
                surface.show_readout(
                    node_id,
                    &format!("{:.0} × {:.0}", frame.size.width, frame.size.height),
                );
            }
        }
    }

    /// Ends the gesture on pointer-up: reads the final presented frame
    /// back, rounds/clamps it, and issues exactly one store commit.
    ///
    /// Returns `false` when no gesture was in flight.
    pub fn pointer_released<S: GestureSurface>(
        &mut self,
        store: &mut GraphStore,
        surface: &mut S,
    ) -> bool {
        self.finish(store, surface, "gesture_committed")
    }

    /// Ends an interrupted gesture (owning component teardown, focus loss).
    ///
    /// Applies the commit policy described in the module docs and releases
    /// input capture unconditionally. Safe to call when idle.
    pub fn teardown<S: GestureSurface>(&mut self, store: &mut GraphStore, surface: &mut S) {
        self.finish(store, surface, "gesture_interrupted");
    }

    fn finish<S: GestureSurface>(
        &mut self,
        store: &mut GraphStore,
        surface: &mut S,
        event: &str,
    ) -> bool {
        let phase = std::mem::replace(&mut self.phase, GesturePhase::Idle);
        let (node_id, patch) = match phase {
            GesturePhase::Idle => return false,
            GesturePhase::Dragging {
                node_id,
                start_frame,
                ..
            } => {
                let frame = surface.presented_frame(node_id).unwrap_or(start_frame);
                (node_id, NodePatch::position(frame.position.rounded()))
            }
            GesturePhase::Resizing {
                node_id,
                start_frame,
                min_size,
                ..
            } => {
                let frame = surface.presented_frame(node_id).unwrap_or(start_frame);
                (
                    node_id,
                    NodePatch::size(frame.size.clamped_to_min(min_size).rounded()),
                )
            }
        };

        store.update_node(node_id, patch);
        surface.clear_readout(node_id);
        surface.release_input();
        debug!("event={event} module=gesture status=ok node={node_id}");
        true
    }
}
