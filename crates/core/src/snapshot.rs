use arrayvec::ArrayVec;
use serde::Serialize;

use crate::effects::Particle;
use crate::pieces::Piece;
use crate::types::{PieceKind, SpinKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
    pub color: u8,
    pub cells: ArrayVec<(i32, i32), 4>,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation(),
            x: value.x,
            y: value.y,
            color: value.color(),
            cells: value.cells().collect(),
        }
    }
}

/// Every countdown and held-input counter, in frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TimersSnapshot {
    pub lock_delay: u32,
    pub clear_animation: u32,
    pub level_up: u32,
    pub score_popup: u32,
    pub tetris: u32,
    pub spin_banner: u32,
    pub shake: u32,
    pub jump_scare: u32,
    pub move_left: u32,
    pub move_right: u32,
    pub soft_drop: u32,
    pub fall: u32,
    pub fall_speed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major palette colors, 0 = empty.
    pub board: Vec<u8>,
    pub active: Option<PieceSnapshot>,
    pub ghost_y: Option<i32>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub score_popup: u32,
    pub spin_banner: Option<SpinKind>,
    pub paused: bool,
    pub game_over: bool,
    pub on_ground: bool,
    pub last_rotation_was_spin: bool,
    pub jump_scare_active: bool,
    pub clearing_lines: Vec<usize>,
    pub particles: Vec<Particle>,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    /// Palette color at (x, y), 0 when empty or out of range
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.board.get(y * self.width + x).copied().unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
