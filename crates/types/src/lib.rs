//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the core simulation, the host loop and any
//! rendering collaborator can share these types without pulling in game logic.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Dimensions are fixed at
//! construction time through [`GameConfig`]:
//!
//! - **Width**: columns indexed `0..width` (left to right)
//! - **Height**: rows indexed `0..height` (top to bottom)
//! - **Spawn position**: `(width / 2 - 2, 0)` (top-left of the 4x4 piece box)
//!
//! # Frame Timing Constants
//!
//! The simulation advances in whole frames. One call to `GameState::tick`
//! is one frame; every timer below is a frame count.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_DELAY` | 8 | Frames between horizontal auto-repeats |
//! | `INITIAL_MOVE_DELAY` | 15 | Frames held before auto-repeat starts |
//! | `LOCK_DELAY` | 15 | Lock delay armed when a piece touches down |
//! | `LOCK_DELAY_EXTENSION` | 5 | Added back on a grounded move/rotate (capped) |
//! | `CLEAR_ANIMATION_FRAMES` | 8 | Line-clear animation before rows collapse |
//! | `LEVEL_UP_FRAMES` | 90 | Level-up banner |
//! | `SCORE_POPUP_FRAMES` | 60 | Score popup |
//! | `TETRIS_BANNER_FRAMES` | 80 | Four-line banner |
//! | `SPIN_BANNER_FRAMES` | 80 | Spin banner |
//!
//! # Fall Speed by Level
//!
//! Gravity follows an NES-style frames-per-row table ([`FALL_SPEED_TABLE`]).
//! Level 1 drops one row every 48 frames; from level 30 on, every frame.
//!
//! # Examples
//!
//! ```
//! use frame_tetris_types::{GameAction, GameConfig, InputFrame, PieceKind};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! // Build one frame of input
//! let input = InputFrame::default()
//!     .with(GameAction::MoveLeft)
//!     .with(GameAction::RotateCw);
//! assert!(input.is_pressed(GameAction::MoveLeft));
//! assert!(!input.is_pressed(GameAction::HardDrop));
//!
//! // Degenerate configuration is clamped, never rejected
//! let config = GameConfig { start_level: 0, ..GameConfig::default() }.normalized();
//! assert_eq!(config.start_level, 1);
//! assert_eq!((config.width, config.height), (10, 20));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Smallest accepted board side; a piece box is 4x4.
pub const MIN_BOARD_SIDE: usize = 4;

/// Frames between auto-repeated horizontal moves once repeat has started.
pub const MOVE_DELAY: u32 = 8;

/// Frames a direction must be held before auto-repeat starts.
pub const INITIAL_MOVE_DELAY: u32 = 15;

/// Lock delay (frames) armed when a piece first rests on a surface.
pub const LOCK_DELAY: u32 = 15;

/// Frames added back to the lock delay by a successful grounded move or rotation.
pub const LOCK_DELAY_EXTENSION: u32 = 5;

/// Line-clear animation length. Rows collapse when it runs out.
pub const CLEAR_ANIMATION_FRAMES: u32 = 8;

/// Level-up banner length.
pub const LEVEL_UP_FRAMES: u32 = 90;

/// Score popup length.
pub const SCORE_POPUP_FRAMES: u32 = 60;

/// Four-line clear banner length.
pub const TETRIS_BANNER_FRAMES: u32 = 80;

/// Spin banner length.
pub const SPIN_BANNER_FRAMES: u32 = 80;

/// Minimum screen shake armed by a scoring spin.
pub const SPIN_SHAKE_FRAMES: u32 = 12;

/// Base screen shake for a line clear; `LINE_SHAKE_PER_ROW` is added per row.
pub const LINE_SHAKE_BASE_FRAMES: u32 = 4;

/// Extra screen shake per cleared row.
pub const LINE_SHAKE_PER_ROW: u32 = 2;

/// Rare-event overlay length.
pub const JUMP_SCARE_FRAMES: u32 = 10;

/// Screen shake armed by the rare event.
pub const JUMP_SCARE_SHAKE_FRAMES: u32 = 30;

/// Chance per line-clearing lock that the rare event fires.
pub const JUMP_SCARE_CHANCE: f32 = 0.05;

/// Lifetime of a line-clear particle.
pub const PARTICLE_LIFE: u32 = 20;

/// One particle is emitted every `PARTICLE_COLUMN_STRIDE` columns of a cleared row.
pub const PARTICLE_COLUMN_STRIDE: usize = 3;

/// Palette index used for a particle spawned over an empty cell.
pub const PARTICLE_FALLBACK_COLOR: u8 = 7;

/// Wall-kick offsets tried (x only, in order) when a rotation collides.
pub const KICK_OFFSETS: [i32; 5] = [0, -1, 1, -2, 2];

/// Frames per row of gravity, indexed by `level - 1`.
///
/// Levels beyond the table reuse the last entry.
pub const FALL_SPEED_TABLE: [u32; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, //
    5, 5, 5, 4, 4, 4, 3, 3, 3, 2, //
    2, 2, 2, 2, 2, 2, 2, 2, 2, 1,
];

/// Line clear scoring table, multiplied by the current level.
///
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Spin bonus by cleared rows, multiplied by the current level.
///
/// A four-row spin has no entry and earns no bonus.
pub const SPIN_SCORES: [u32; 4] = [0, 800, 1200, 1600];

/// Combo bonus per combo step, multiplied by the current level.
pub const COMBO_BASE: u32 = 50;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest start level whose lines baseline still fits in a `u32`
pub const MAX_START_LEVEL: u32 = u32::MAX / LINES_PER_LEVEL;

/// Points per row of soft drop.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row of hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// The seven tetromino piece kinds
///
/// Each piece has a fixed palette color:
/// - **I**: 12, straight bar
/// - **O**: 10, 2x2 square
/// - **T**: 13, T-shaped
/// - **S**: 11, S-shaped
/// - **Z**: 8, Z-shaped (mirror of S)
/// - **J**: 5, J-shaped
/// - **L**: 9, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use frame_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Uppercase letter, as shown in banners.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Palette color written into the board when this kind locks. Never 0.
    pub fn color(&self) -> u8 {
        match self {
            PieceKind::I => 12,
            PieceKind::O => 10,
            PieceKind::T => 13,
            PieceKind::S => 11,
            PieceKind::Z => 8,
            PieceKind::J => 5,
            PieceKind::L => 9,
        }
    }

    /// Whether a rotation of this kind can be scored as a spin.
    pub fn can_spin(&self) -> bool {
        matches!(self, PieceKind::T | PieceKind::S | PieceKind::Z)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
///
/// The palette color of a filled cell is `kind.color()`.
pub type Cell = Option<PieceKind>;

/// Player actions consumed by the simulation.
///
/// `MoveLeft`, `MoveRight` and `SoftDrop` are held-state actions (auto-repeat
/// is computed by the core). The rest are edge-triggered: the input
/// collaborator reports them on the single frame they were pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Shift left while held
    MoveLeft,
    /// Shift right while held
    MoveRight,
    /// Accelerated fall while held (+1 point per row)
    SoftDrop,
    /// Drop to the landing row and lock immediately (+2 points per row)
    HardDrop,
    /// Rotate clockwise
    RotateCw,
    /// Rotate counter-clockwise
    RotateCcw,
    /// Swap with the hold slot (once per piece)
    Hold,
    /// Toggle the pause overlay
    TogglePause,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use frame_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("HARDDROP"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::TogglePause => "togglePause",
        }
    }

    /// Held-state actions stay pressed across frames; the rest are edges.
    pub fn is_held(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
        )
    }
}

/// One frame of already debounced input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub hold: bool,
    pub toggle_pause: bool,
}

impl InputFrame {
    /// Frame with every action in `actions` pressed.
    pub fn from_actions(actions: &[GameAction]) -> Self {
        let mut frame = Self::default();
        for &action in actions {
            frame.press(action);
        }
        frame
    }

    /// Mark `action` as pressed for this frame.
    pub fn press(&mut self, action: GameAction) {
        *self.slot_mut(action) = true;
    }

    /// Builder form of [`InputFrame::press`].
    pub fn with(mut self, action: GameAction) -> Self {
        self.press(action);
        self
    }

    pub fn is_pressed(&self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left,
            GameAction::MoveRight => self.move_right,
            GameAction::SoftDrop => self.soft_drop,
            GameAction::HardDrop => self.hard_drop,
            GameAction::RotateCw => self.rotate_cw,
            GameAction::RotateCcw => self.rotate_ccw,
            GameAction::Hold => self.hold,
            GameAction::TogglePause => self.toggle_pause,
        }
    }

    fn slot_mut(&mut self, action: GameAction) -> &mut bool {
        match action {
            GameAction::MoveLeft => &mut self.move_left,
            GameAction::MoveRight => &mut self.move_right,
            GameAction::SoftDrop => &mut self.soft_drop,
            GameAction::HardDrop => &mut self.hard_drop,
            GameAction::RotateCw => &mut self.rotate_cw,
            GameAction::RotateCcw => &mut self.rotate_ccw,
            GameAction::Hold => &mut self.hold,
            GameAction::TogglePause => &mut self.toggle_pause,
        }
    }
}

/// Construction-time settings.
///
/// Missing fields fall back to the defaults when deserialized, so a host can
/// ship a partial config such as `{"start_level": 5}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub start_level: u32,
}

impl GameConfig {
    /// Clamp degenerate values: level in `1..=`[`MAX_START_LEVEL`], each side
    /// at least [`MIN_BOARD_SIDE`].
    pub fn normalized(self) -> Self {
        Self {
            width: self.width.max(MIN_BOARD_SIDE),
            height: self.height.max(MIN_BOARD_SIDE),
            start_level: self.start_level.clamp(1, MAX_START_LEVEL),
        }
    }

    /// Lines-cleared baseline that makes `lines / 10 + 1` equal the start level.
    pub fn lines_baseline(&self) -> u32 {
        self.start_level
            .clamp(1, MAX_START_LEVEL)
            .saturating_sub(1)
            .saturating_mul(LINES_PER_LEVEL)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            start_level: 1,
        }
    }
}

/// A scoring spin: which piece spun and how many rows it cleared (1..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinKind {
    pub kind: PieceKind,
    pub lines: u8,
}

impl fmt::Display for SpinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.letter();
        match self.lines {
            2 => write!(f, "{letter}-SPIN DOUBLE!"),
            3 => write!(f, "{letter}-SPIN TRIPLE!"),
            _ => write!(f, "{letter}-SPIN!"),
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Audio and effect collaborators poll this once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    pub spin: Option<SpinKind>,
    pub combo: u32,
    pub level_up: bool,
    pub jump_scare: bool,
}
