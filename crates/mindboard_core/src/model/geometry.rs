//! Position/size math and coordinate-space conversion.
//!
//! # Responsibility
//! - Provide the 2D primitives used by the store, grouping and layout code.
//! - Convert node coordinates between board-absolute and group-relative
//!   space.
//!
//! # Invariants
//! - `to_relative` and `to_absolute` are exact inverses for the same origin.
//! - `Bounds` always satisfies `min_x <= max_x` and `min_y <= max_y` when
//!   built through its constructors.

use serde::{Deserialize, Serialize};

/// A point on the board, in canvas units.
///
/// Board-absolute unless the owning node is parented to a group, in which
/// case it is relative to the group's own position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translates by the given deltas.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Component-wise difference `self - earlier`, as a delta pair.
    pub fn delta_from(self, earlier: Position) -> (f64, f64) {
        (self.x - earlier.x, self.y - earlier.y)
    }

    /// Converts a board-absolute position into the coordinate space anchored
    /// at `origin` (typically a group's position).
    pub fn to_relative(self, origin: Position) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    /// Converts a position relative to `origin` back into board-absolute
    /// space. Inverse of [`Position::to_relative`].
    pub fn to_absolute(self, origin: Position) -> Self {
        Self {
            x: self.x + origin.x,
            y: self.y + origin.y,
        }
    }

    /// Rounds both components to whole canvas units (commit-time rounding).
    pub fn rounded(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// Rendered extent of a node, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grows by the given deltas. Negative deltas shrink.
    pub fn grown_by(self, dw: f64, dh: f64) -> Self {
        Self {
            width: self.width + dw,
            height: self.height + dh,
        }
    }

    /// Clamps both dimensions so they are never below `min`.
    pub fn clamped_to_min(self, min: Size) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }

    pub fn rounded(self) -> Self {
        Self {
            width: self.width.round(),
            height: self.height.round(),
        }
    }
}

/// Axis-aligned bounding box over one or more node frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of a single frame.
    pub fn from_frame(position: Position, size: Size) -> Self {
        Self {
            min_x: position.x,
            min_y: position.y,
            max_x: position.x + size.width,
            max_y: position.y + size.height,
        }
    }

    /// Smallest box containing both operands.
    pub fn union(self, other: Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Union over an iterator of frames. `None` when the iterator is empty.
    pub fn around<I>(frames: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Position, Size)>,
    {
        frames
            .into_iter()
            .map(|(position, size)| Self::from_frame(position, size))
            .reduce(Self::union)
    }

    /// Expands every side outward by `padding`.
    pub fn expanded(self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }

    /// Top-left corner.
    pub fn origin(self) -> Position {
        Position::new(self.min_x, self.min_y)
    }

    pub fn size(self) -> Size {
        Size::new(self.max_x - self.min_x, self.max_y - self.min_y)
    }
}
