//! Frame Tetris (workspace facade crate).
//!
//! Re-exports the game core and its shared types under one name, so hosts can
//! depend on `frame_tetris::{core, types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use frame_tetris_core as core;
pub use frame_tetris_types as types;
