//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or filled with
//! the kind of the piece that locked there. Storage is a flat row-major vector
//! sized once at construction; the dimensions never change afterwards.
//! Coordinates: (x, y) where x ranges `0..width` (left to right) and y ranges
//! `0..height` (top to bottom). Rows above the board (`y < 0`) are open space.

use crate::pieces::Piece;
use crate::types::{Cell, PieceKind};

/// The game board - flat array storage, row-major order (y * width + x)
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y).
    ///
    /// Out-of-range positions read as empty.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Palette color at (x, y), 0 for empty or out of range
    pub fn color_at(&self, x: i32, y: i32) -> u8 {
        self.get(x, y).map_or(0, |kind| kind.color())
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32
    }

    /// Whether `piece` may occupy its current position.
    ///
    /// Every cell must be inside the side walls and above the floor. Cells with
    /// `y < 0` are above the board and never collide with anything.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().all(|(x, y)| {
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write the piece into the grid. Cells outside the board are skipped.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Cells of row `y`, or `None` past the floor
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Indices of every full row, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove every full row, shift the rows above down and return how many
    /// rows were removed. Remaining rows keep their relative order.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        let mut write_y = self.height;

        // Scan from bottom to top, compacting kept rows downwards.
        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // The vacated rows at the top become empty.
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// True iff any cell of the top row is filled
    pub fn is_game_over(&self) -> bool {
        self.row(0)
            .is_some_and(|row| row.iter().any(|cell| cell.is_some()))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write palette colors (0 = empty) into `out`, row-major.
    ///
    /// Reuses `out`'s allocation.
    pub fn write_u8_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| cell.map_or(0, |k| k.color())));
    }

    /// Fill row `y` with `kind`, leaving the listed columns empty
    pub fn fill_row(&mut self, y: i32, kind: PieceKind, holes: &[i32]) {
        for x in 0..self.width as i32 {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
    }

    /// Clear the entire board, keeping its dimensions
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }
}
