//! Board tests - grid access, collision and line clearing

use frame_tetris::core::pieces::rotation_count;
use frame_tetris::core::{Board, Piece};
use frame_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    // All cells should be empty
    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), None, "Cell ({}, {}) should be empty", x, y);
        }
    }
    assert!(!board.is_game_over());
}

#[test]
fn test_board_custom_dimensions() {
    let board = Board::new(6, 12);
    assert_eq!(board.width(), 6);
    assert_eq!(board.height(), 12);
    assert_eq!(board.cells().len(), 72);
    assert!(board.is_out_of_bounds(6, 0));
    assert!(!board.is_out_of_bounds(5, 11));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(PieceKind::T));
    assert_eq!(board.color_at(5, 10), PieceKind::T.color());

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), None);
    assert_eq!(board.color_at(5, 10), 0);
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);

    // Should return false for out of bounds
    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, -1, Some(PieceKind::T)));
    assert!(!board.set(BOARD_WIDTH as i32, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i32, Some(PieceKind::T)));

    // Out of bounds reads as empty
    assert_eq!(board.get(-1, 0), None);
    assert!(!board.is_occupied(-1, 0));
}

#[test]
fn test_valid_position_walls_floor_and_blocks() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    let o = Piece::new(PieceKind::O, 3, 0);
    assert!(board.is_valid_position(&o));

    // O occupies box columns 1-2; x=-1 puts it flush with the left wall.
    assert!(board.is_valid_position(&Piece::new(PieceKind::O, -1, 0)));
    assert!(!board.is_valid_position(&Piece::new(PieceKind::O, -2, 0)));
    assert!(board.is_valid_position(&Piece::new(PieceKind::O, 7, 0)));
    assert!(!board.is_valid_position(&Piece::new(PieceKind::O, 8, 0)));

    // Floor: box rows 1-2 must stay above row 20.
    assert!(board.is_valid_position(&Piece::new(PieceKind::O, 3, 17)));
    assert!(!board.is_valid_position(&Piece::new(PieceKind::O, 3, 18)));

    board.set(4, 1, Some(PieceKind::I));
    assert!(!board.is_valid_position(&o));
}

#[test]
fn test_bounds_hold_for_every_kind_and_rotation() {
    let (w, h) = (BOARD_WIDTH as i32, BOARD_HEIGHT as i32);
    let empty = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    let mut full = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    for y in 0..h {
        full.fill_row(y, PieceKind::Z, &[]);
    }

    for kind in PieceKind::ALL {
        for rotation in 0..rotation_count(kind) {
            for x in -5..=w + 1 {
                for y in -6..=h + 1 {
                    let piece = Piece::new(kind, x, y).with_rotation(rotation);
                    let out_of_bounds = piece
                        .cells()
                        .any(|(cx, cy)| cx < 0 || cx >= w || cy >= h);
                    let above_board = piece.cells().all(|(_, cy)| cy < 0);

                    assert_eq!(
                        empty.is_valid_position(&piece),
                        !out_of_bounds,
                        "{:?} r{} at ({}, {}) on empty board",
                        kind,
                        rotation,
                        x,
                        y
                    );
                    // A full board rejects every in-bounds cell on the grid.
                    assert_eq!(
                        full.is_valid_position(&piece),
                        !out_of_bounds && above_board,
                        "{:?} r{} at ({}, {}) on full board",
                        kind,
                        rotation,
                        x,
                        y
                    );
                }
            }
        }
    }
}

#[test]
fn test_cells_above_the_top_do_not_collide() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    board.fill_row(0, PieceKind::J, &[]);

    // Vertical I at y=-4 sits entirely above the board.
    let piece = Piece::new(PieceKind::I, 3, -4).with_rotation(1);
    assert!(board.is_valid_position(&piece));
}

#[test]
fn test_lock_writes_kind_and_skips_offscreen_cells() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    let piece = Piece::new(PieceKind::I, 0, -2).with_rotation(1);

    board.lock(&piece);

    // Column 1, rows -2..=1: only rows 0 and 1 land on the board.
    assert_eq!(board.get(1, 0), Some(PieceKind::I));
    assert_eq!(board.get(1, 1), Some(PieceKind::I));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    assert!(board.is_game_over());
}

#[test]
fn test_board_is_row_full() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);

    // Empty row is not full
    assert!(!board.is_row_full(5));

    board.fill_row(5, PieceKind::T, &[]);
    assert!(board.is_row_full(5));

    // Leave one cell empty in row 6
    board.fill_row(6, PieceKind::I, &[9]);
    assert!(!board.is_row_full(6));

    // Past the floor is never full
    assert!(!board.is_row_full(BOARD_HEIGHT));
}

#[test]
fn test_clear_lines_shifts_rows_down() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);

    board.fill_row(5, PieceKind::T, &[]);
    board.set(0, 3, Some(PieceKind::I));
    board.set(1, 4, Some(PieceKind::O));

    assert_eq!(board.full_rows(), vec![5]);
    assert_eq!(board.clear_lines(), 1);

    // What was at row 4 should now be at row 5 (shifted down)
    assert_eq!(board.get(1, 5), Some(PieceKind::O));
    // What was at row 3 should now be at row 4
    assert_eq!(board.get(0, 4), Some(PieceKind::I));
    assert_eq!(board.get(0, 3), None);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);

    board.fill_row(19, PieceKind::O, &[]);
    board.fill_row(18, PieceKind::S, &[2]);
    board.fill_row(17, PieceKind::I, &[]);
    board.set(0, 16, Some(PieceKind::T));

    assert_eq!(board.full_rows(), vec![17, 19]);
    assert_eq!(board.clear_lines(), 2);

    // The partial row keeps its holes and lands on the floor; T sits above it.
    assert!(!board.is_row_full(19));
    assert_eq!(board.get(2, 19), None);
    assert_eq!(board.get(3, 19), Some(PieceKind::S));
    assert_eq!(board.get(0, 18), Some(PieceKind::T));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 10);
}

#[test]
fn test_clear_lines_on_clean_board_is_noop() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    board.set(4, 19, Some(PieceKind::Z));
    let before = board.clone();

    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_u8_grid_reuses_buffer() {
    let mut board = Board::new(4, 4);
    board.set(1, 2, Some(PieceKind::I));
    let mut grid = vec![99; 100];

    board.write_u8_grid(&mut grid);
    assert_eq!(grid.len(), 16);
    assert_eq!(grid[2 * 4 + 1], PieceKind::I.color());
    assert_eq!(grid.iter().filter(|&&c| c != 0).count(), 1);
}

#[test]
fn test_reset_empties_the_grid() {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    board.fill_row(0, PieceKind::L, &[]);
    board.reset();
    assert!(board.cells().iter().all(|c| c.is_none()));
    assert_eq!(board.width(), BOARD_WIDTH);
}
