//! Pieces module - Tetromino shapes, rotation tables and the piece value type
//!
//! Every shape lives in a 4x4 box. A rotation state is the list of occupied
//! (column, row) offsets inside that box, in row-major order. The number of
//! rotation states depends on the kind: O has 1, I/S/Z have 2, T/J/L have 4.
//!
//! Rotating a [`Piece`] only changes its rotation index. The tables are
//! `'static` and never mutated.

use crate::types::{PieceKind, KICK_OFFSETS};

/// Offset of a single mino relative to the top-left of the piece box
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the box origin
pub type PieceShape = [MinoOffset; 4];

const I_ROTATIONS: [PieceShape; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_ROTATIONS: [PieceShape; 1] = [[(1, 1), (2, 1), (1, 2), (2, 2)]];

const T_ROTATIONS: [PieceShape; 4] = [
    [(1, 1), (0, 2), (1, 2), (2, 2)],
    [(1, 1), (1, 2), (2, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (1, 3)],
    [(1, 1), (0, 2), (1, 2), (1, 3)],
];

const S_ROTATIONS: [PieceShape; 2] = [
    [(2, 1), (3, 1), (1, 2), (2, 2)],
    [(1, 1), (1, 2), (2, 2), (2, 3)],
];

const Z_ROTATIONS: [PieceShape; 2] = [
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(2, 1), (1, 2), (2, 2), (1, 3)],
];

const J_ROTATIONS: [PieceShape; 4] = [
    [(1, 1), (1, 2), (0, 3), (1, 3)],
    [(0, 1), (0, 2), (1, 2), (2, 2)],
    [(1, 1), (2, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (2, 3)],
];

const L_ROTATIONS: [PieceShape; 4] = [
    [(1, 1), (1, 2), (1, 3), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (0, 3)],
    [(0, 1), (1, 1), (1, 2), (1, 3)],
    [(2, 1), (0, 2), (1, 2), (2, 2)],
];

/// All rotation states for a piece kind
pub fn rotations(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_ROTATIONS,
        PieceKind::O => &O_ROTATIONS,
        PieceKind::T => &T_ROTATIONS,
        PieceKind::S => &S_ROTATIONS,
        PieceKind::Z => &Z_ROTATIONS,
        PieceKind::J => &J_ROTATIONS,
        PieceKind::L => &L_ROTATIONS,
    }
}

/// Number of distinct rotation states for a piece kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotations(kind).len() as u8
}

/// Get the shape (mino offsets) for a piece kind and rotation index.
///
/// The index wraps, so any value is accepted.
pub fn get_shape(kind: PieceKind, rotation: u8) -> &'static PieceShape {
    let table = rotations(kind);
    &table[rotation as usize % table.len()]
}

/// Horizontal spawn column for a board of the given width.
pub fn spawn_x(board_width: usize) -> i32 {
    board_width as i32 / 2 - 2
}

/// A tetromino instance: kind, rotation index and box position.
///
/// `x`/`y` are the board coordinates of the top-left corner of the 4x4 box.
/// `y` may be negative while the piece is still entering the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece in its first rotation state at `(x, y)`
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Create a piece at the spawn position of a board `board_width` wide
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        Self::new(kind, spawn_x(board_width), 0)
    }

    /// Current rotation index, always in `0..rotation_count()`
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn rotation_count(&self) -> u8 {
        rotation_count(self.kind)
    }

    /// Same piece with a different rotation index (wrapped into range)
    pub fn with_rotation(mut self, rotation: u8) -> Self {
        self.rotation = rotation % self.rotation_count();
        self
    }

    /// Palette color of this piece
    pub fn color(&self) -> u8 {
        self.kind.color()
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = (self.rotation + 1) % self.rotation_count();
    }

    pub fn rotate_counterclockwise(&mut self) {
        let count = self.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Get the shape (mino offsets) for the current rotation
    pub fn shape(&self) -> &'static PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of every occupied cell.
    ///
    /// Recomputed from position and rotation on each call.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        self.shape()
            .iter()
            .map(move |&(dx, dy)| (x + dx as i32, y + dy as i32))
    }

    /// Same piece shifted by `(dx, dy)`
    pub fn shifted(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Corners of the 3x3 area inset in the box, used for spin detection
    pub fn spin_corners(&self) -> [(i32, i32); 4] {
        let (x, y) = (self.x, self.y);
        [(x, y), (x + 2, y), (x, y + 2), (x + 2, y + 2)]
    }
}

/// Try to rotate a piece, kicking sideways if needed.
///
/// The new rotation is tried at each offset of [`KICK_OFFSETS`] (x only), and
/// the first valid placement wins. Returns `None` if every offset collides.
pub fn try_rotate(
    piece: Piece,
    clockwise: bool,
    is_valid: impl Fn(&Piece) -> bool,
) -> Option<(Piece, i32)> {
    let mut rotated = piece;
    if clockwise {
        rotated.rotate_clockwise();
    } else {
        rotated.rotate_counterclockwise();
    }

    KICK_OFFSETS
        .iter()
        .map(|&dx| (rotated.shifted(dx, 0), dx))
        .find(|(candidate, _)| is_valid(candidate))
}
