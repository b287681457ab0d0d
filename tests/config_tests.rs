//! Config and input model tests

use frame_tetris::core::GameState;
use frame_tetris::types::{
    GameAction, GameConfig, InputFrame, LockEvent, PieceKind, SpinKind, BOARD_HEIGHT, BOARD_WIDTH,
    MAX_START_LEVEL,
};

#[test]
fn test_config_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.width, BOARD_WIDTH);
    assert_eq!(config.height, BOARD_HEIGHT);
    assert_eq!(config.start_level, 1);
}

#[test]
fn test_partial_config_from_json() {
    let config: GameConfig = serde_json::from_str(r#"{"start_level": 5}"#).unwrap();
    assert_eq!(config.width, BOARD_WIDTH);
    assert_eq!(config.height, BOARD_HEIGHT);
    assert_eq!(config.start_level, 5);

    let state = GameState::new(config, 1);
    assert_eq!(state.level(), 5);
    assert_eq!(state.lines(), 40);
    assert_eq!(state.fall_speed(), 28);
}

#[test]
fn test_max_start_level_from_json_is_clamped() {
    let config: GameConfig = serde_json::from_str(r#"{"start_level": 4294967295}"#).unwrap();
    let mut state = GameState::new(config, 1);

    assert_eq!(state.config().start_level, MAX_START_LEVEL);
    assert_eq!(state.level(), MAX_START_LEVEL);
    assert_eq!(state.level(), state.lines() / 10 + 1);
    assert_eq!(state.fall_speed(), 1);

    let drop = InputFrame::from_actions(&[GameAction::HardDrop]);
    for _ in 0..200 {
        state.tick(&drop);
        if state.game_over() {
            break;
        }
    }
    assert!(state.level() >= MAX_START_LEVEL);
    assert_eq!(state.level(), state.lines() / 10 + 1);
}

#[test]
fn test_degenerate_config_is_normalized() {
    let config = GameConfig {
        width: 1,
        height: 0,
        start_level: 0,
    };
    let state = GameState::new(config, 3);

    assert_eq!(state.config().width, 4);
    assert_eq!(state.config().height, 4);
    assert_eq!(state.board().width(), 4);
    assert_eq!(state.level(), 1);
    // Every kind fits the 4x4 box at spawn.
    assert!(state.active().is_some());
}

#[test]
fn test_tiny_board_still_plays() {
    let config = GameConfig {
        width: 4,
        height: 4,
        start_level: 1,
    };
    let mut state = GameState::new(config, 11);
    let drop = InputFrame::from_actions(&[GameAction::HardDrop]);

    for _ in 0..1000 {
        state.tick(&drop);
        if state.game_over() {
            break;
        }
    }
    assert!(state.game_over());
}

#[test]
fn test_input_frame_from_json() {
    let input: InputFrame = serde_json::from_str(r#"{"move_left": true, "hold": true}"#).unwrap();
    assert!(input.move_left);
    assert!(input.hold);
    assert!(!input.hard_drop);
    assert_eq!(
        input,
        InputFrame::from_actions(&[GameAction::Hold, GameAction::MoveLeft])
    );
}

#[test]
fn test_action_names() {
    let json = serde_json::to_string(&GameAction::HardDrop).unwrap();
    assert_eq!(json, r#""hardDrop""#);
    assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    assert_eq!(GameAction::from_str("pause"), Some(GameAction::TogglePause));
    assert_eq!(GameAction::from_str("teleport"), None);

    // Directional moves and soft drop repeat while held; the rest are taps.
    let held: Vec<_> = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Hold,
        GameAction::TogglePause,
    ]
    .into_iter()
    .filter(GameAction::is_held)
    .collect();
    assert_eq!(
        held,
        vec![
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
        ]
    );
}

#[test]
fn test_lock_event_serializes() {
    let event = LockEvent {
        kind: PieceKind::T,
        lines_cleared: 2,
        points: 3300,
        spin: Some(SpinKind {
            kind: PieceKind::T,
            lines: 2,
        }),
        combo: 3,
        level_up: false,
        jump_scare: false,
    };
    let json = serde_json::to_value(event).unwrap();
    assert_eq!(json["kind"], "t");
    assert_eq!(json["spin"]["lines"], 2);
    assert_eq!(event.spin.unwrap().to_string(), "T-SPIN DOUBLE!");

    let back: LockEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}
