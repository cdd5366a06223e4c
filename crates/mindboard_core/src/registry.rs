//! Board registry: the collection of boards and the list-view state.
//!
//! # Responsibility
//! - Own every board and the selection of the single active one.
//! - Provide the favorite/filter/search queries backing the board list.
//! - Hand boards to editing sessions and take the edited copy back.
//!
//! # Invariants
//! - At most one board is active (open in the canvas) at a time.
//! - Only the registry changes which board is active, and switching never
//!   mutates the previously active board's data.

use crate::graph::store::GraphStore;
use crate::model::board::{Board, BoardId};
use crate::model::geometry::Position;
use crate::model::node::{Node, NodeData, NoteCardData};
use log::{debug, info};

/// Whether the module shows the board list or the open canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Canvas,
}

/// How the board list renders its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Card,
    List,
}

/// Favorite filter applied to the board list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardFilter {
    #[default]
    All,
    Favorite,
}

/// Note record supplied by the card-search collaborator. Only the fields
/// the canvas needs to wrap a note into a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// Collection of boards plus the module's list-view state.
#[derive(Debug, Default)]
pub struct BoardRegistry {
    boards: Vec<Board>,
    active: Option<BoardId>,
    view_mode: ViewMode,
    display_mode: DisplayMode,
    filter: BoardFilter,
    search_term: String,
}

impl BoardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id == id)
    }

    /// Creates a new empty board titled `"Mind Board N"` and returns its id.
    pub fn create_board(&mut self) -> BoardId {
        let board = Board::new(format!("Mind Board {}", self.boards.len() + 1));
        let id = board.id;
        info!("event=board_created module=registry status=ok board={id}");
        self.boards.push(board);
        id
    }

    /// Deletes a board with all its nodes and edges. Clears the active
    /// selection (and leaves the canvas) when it pointed at the deleted
    /// board.
    pub fn delete_board(&mut self, id: BoardId) -> bool {
        let before = self.boards.len();
        self.boards.retain(|board| board.id != id);
        if self.boards.len() == before {
            return false;
        }
        if self.active == Some(id) {
            self.active = None;
            self.view_mode = ViewMode::List;
        }
        info!("event=board_deleted module=registry status=ok board={id}");
        true
    }

    pub fn rename_board(&mut self, id: BoardId, title: impl Into<String>) -> bool {
        match self.boards.iter_mut().find(|board| board.id == id) {
            Some(board) => {
                board.title = title.into();
                board.touch();
                true
            }
            None => false,
        }
    }

    pub fn toggle_favorite(&mut self, id: BoardId) -> bool {
        match self.boards.iter_mut().find(|board| board.id == id) {
            Some(board) => {
                board.is_favorite = !board.is_favorite;
                true
            }
            None => false,
        }
    }

    /// Opens a board in the canvas. No-op when the board does not exist.
    pub fn open_board(&mut self, id: BoardId) -> bool {
        if self.board(id).is_none() {
            debug!("event=board_open_rejected module=registry status=noop board={id}");
            return false;
        }
        self.active = Some(id);
        self.view_mode = ViewMode::Canvas;
        info!("event=board_opened module=registry status=ok board={id}");
        true
    }

    /// Leaves the canvas back to the board list.
    pub fn exit_canvas(&mut self) {
        self.active = None;
        self.view_mode = ViewMode::List;
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.active.and_then(|id| self.board(id))
    }

    /// Starts an editing session over a copy of the board; the registry's
    /// copy stays untouched until [`BoardRegistry::commit_board`].
    pub fn checkout_board(&self, id: BoardId) -> Option<GraphStore> {
        self.board(id).cloned().map(GraphStore::open)
    }

    /// Writes an edited board back over the stored copy with the same id.
    pub fn commit_board(&mut self, board: Board) -> bool {
        match self.boards.iter_mut().find(|stored| stored.id == board.id) {
            Some(stored) => {
                *stored = board;
                true
            }
            None => {
                debug!(
                    "event=board_commit_rejected module=registry status=noop board={}",
                    board.id
                );
                false
            }
        }
    }

    /// Installs a board produced by [`crate::snapshot::import_from_json`].
    pub fn install_imported(&mut self, board: Board) -> BoardId {
        let id = board.id;
        info!("event=board_installed module=registry status=ok board={id}");
        self.boards.push(board);
        id
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn filter(&self) -> BoardFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: BoardFilter) {
        self.filter = filter;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Boards matching the favorite filter and the case-insensitive title
    /// search, in creation order.
    pub fn filtered_boards(&self) -> Vec<&Board> {
        let needle = self.search_term.to_lowercase();
        self.boards
            .iter()
            .filter(|board| match self.filter {
                BoardFilter::All => true,
                BoardFilter::Favorite => board.is_favorite,
            })
            .filter(|board| needle.is_empty() || board.title.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Wraps a card-search result into a note-card node at the given position.
pub fn note_card_from_record(record: &CardRecord, position: Position) -> Node {
    Node::new(
        NodeData::NoteCard(NoteCardData {
            title: Some(record.title.clone()),
            content: record.content.clone(),
            source_card_id: Some(record.id.clone()),
            color_index: 0,
        }),
        position,
    )
}
