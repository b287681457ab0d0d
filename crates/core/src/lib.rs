//! Core game logic - pure, deterministic, frame-stepped
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependencies on rendering, input devices, or I/O:
//!
//! - **Deterministic**: The same random source replays the same match
//! - **Frame-based**: Every timer counts frames; the host calls [`GameState::tick`]
//!   once per frame (nominally 60 per second)
//! - **Total**: No operation panics or returns an error; illegal moves report `false`
//!
//! # Module Structure
//!
//! - [`board`]: Configurable grid with collision detection and line clearing
//! - [`pieces`]: Tetromino rotation tables and simple horizontal wall kicks
//! - [`rng`]: Pluggable random source, uniform piece selection by default
//! - [`scoring`]: Line, spin, combo and drop points; level curve and gravity table
//! - [`effects`]: Cosmetic line-clear particles
//! - [`game_state`]: The per-frame state machine tying everything together
//! - [`snapshot`]: Read-only view of the state for renderers and observers
//!
//! # Game Rules
//!
//! - **Uniform Randomizer**: Each new piece is one of the seven kinds with equal odds
//! - **Kicks**: A rotation that collides is retried shifted by 0, -1, +1, -2, +2 columns
//! - **Lock Delay**: 15 frames once grounded; a successful move or rotation adds 5
//!   frames back, capped at 15
//! - **Ghost Piece**: Shows where the current piece will land
//! - **Hold**: Store one piece for later use (once per spawn)
//! - **Spin Detection**: T, S and Z rotations into three blocked box corners
//! - **Line Clear Animation**: Cleared rows stay visible for 8 frames before collapsing
//!
//! # Example
//!
//! ```
//! use frame_tetris_core::GameState;
//! use frame_tetris_core::types::{GameAction, GameConfig, InputFrame};
//!
//! let mut game = GameState::new(GameConfig::default(), 12345);
//!
//! game.tick(&InputFrame::from_actions(&[GameAction::MoveRight]));
//! game.tick(&InputFrame::from_actions(&[GameAction::HardDrop]));
//!
//! // Hard drop awards two points per row
//! assert!(game.score() > 0);
//! ```

pub mod board;
pub mod effects;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use frame_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use effects::Particle;
pub use game_state::GameState;
pub use pieces::{get_shape, try_rotate, Piece};
pub use rng::{RandomSource, SequenceSource, UniformSource};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot, TimersSnapshot};
