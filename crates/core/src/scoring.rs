//! Scoring module - line clear, spin, combo and drop points; level curve
//!
//! All clear points scale with the current level (levels start at 1):
//! - Line clears use [`LINE_SCORES`], capped at four rows.
//! - A spin by T/S/Z adds [`SPIN_SCORES`] on top for 1..=3 rows. Four-row spins
//!   earn no spin bonus.
//! - Once the combo reaches 2, each clear adds `50 * combo * level`.

use crate::types::{
    PieceKind, SpinKind, COMBO_BASE, FALL_SPEED_TABLE, HARD_DROP_POINTS, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_POINTS, SPIN_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points for the rows cleared.
    pub line_clear_score: u32,
    /// Spin bonus, 0 when the clear was not a scoring spin.
    pub spin_bonus: u32,
    /// Combo bonus added on top.
    pub combo_bonus: u32,
    pub total: u32,
    /// Banner for a scoring spin.
    pub spin: Option<SpinKind>,
}

/// Calculate line clear score
/// lines: number of rows cleared (values above 4 score as 4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Spin bonus for `lines` cleared rows, `None` when the row count has no entry
pub fn calculate_spin_bonus(lines: usize, level: u32) -> Option<u32> {
    match lines {
        1..=3 => Some(SPIN_SCORES[lines].saturating_mul(level)),
        _ => None,
    }
}

/// Combo bonus: nothing for the first clear of a chain
pub fn calculate_combo_bonus(combo: u32, level: u32) -> u32 {
    if combo <= 1 {
        return 0;
    }
    COMBO_BASE.saturating_mul(combo).saturating_mul(level)
}

/// Calculate complete score for a line clear.
///
/// `spin` is the piece kind when the last rotation was flagged as a spin.
/// Kinds that cannot spin are ignored.
pub fn calculate_score(lines: usize, level: u32, spin: Option<PieceKind>, combo: u32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level);

    let (spin_bonus, spin) = match spin.filter(|kind| kind.can_spin()) {
        Some(kind) => match calculate_spin_bonus(lines, level) {
            Some(bonus) => (
                bonus,
                Some(SpinKind {
                    kind,
                    lines: lines as u8,
                }),
            ),
            None => (0, None),
        },
        None => (0, None),
    };

    let combo_bonus = calculate_combo_bonus(combo, level);
    let total = line_clear_score
        .saturating_add(spin_bonus)
        .saturating_add(combo_bonus);

    ScoreResult {
        line_clear_score,
        spin_bonus,
        combo_bonus,
        total,
        spin,
    }
}

/// Calculate drop score
/// soft_drop: +1 per row
/// hard_drop: +2 per row
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows.saturating_mul(HARD_DROP_POINTS)
    } else {
        rows.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Frames per row of gravity for a level.
///
/// Levels below 1 use the first entry; levels past the table use the last.
pub fn fall_speed(level: u32) -> u32 {
    let index = (level.saturating_sub(1) as usize).min(FALL_SPEED_TABLE.len() - 1);
    FALL_SPEED_TABLE[index]
}

/// Soft drop cadence: a fraction of gravity, never faster than every 2 frames
pub fn soft_drop_interval(fall_speed: u32) -> u32 {
    (fall_speed / 10).max(2)
}
