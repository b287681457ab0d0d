//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, random source
//! and scoring. It owns the per-frame state machine:
//!
//! ```text
//! Spawning -> Falling -> Locking (lock delay) -> LineClearAnimating -> Spawning
//!                 \______________________________________________/
//!                      (no rows cleared: respawn immediately)
//! ```
//!
//! `GameOver` is reached when a spawned piece does not fit, or when a lock
//! leaves the top row occupied. `Paused` freezes gameplay while cosmetic
//! timers keep decaying.

use log::{debug, trace};

use crate::effects::{emit_row_particles, update_particles, Particle};
use crate::pieces::{try_rotate, Piece};
use crate::rng::{RandomSource, UniformSource};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_score, fall_speed, soft_drop_interval,
};
use crate::snapshot::{GameSnapshot, PieceSnapshot, TimersSnapshot};
use crate::types::*;
use crate::Board;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = UniformSource> {
    config: GameConfig,
    board: Board,
    rng: R,
    active: Option<Piece>,
    next: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    high_score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    fall_speed: u32,
    paused: bool,
    game_over: bool,
    last_rotation_was_spin: bool,
    on_ground: bool,
    lock_delay_timer: u32,
    clear_animation_timer: u32,
    clearing_lines: Vec<usize>,
    level_up_timer: u32,
    score_popup: u32,
    score_popup_timer: u32,
    tetris_timer: u32,
    spin_banner: Option<SpinKind>,
    spin_banner_timer: u32,
    shake_timer: u32,
    jump_scare_active: bool,
    jump_scare_timer: u32,
    particles: Vec<Particle>,
    // Held-input and gravity counters
    move_left_counter: u32,
    move_right_counter: u32,
    soft_drop_counter: u32,
    fall_counter: u32,
}

impl GameState<UniformSource> {
    /// Create a new game with uniform piece selection seeded by `seed`
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_source(config, UniformSource::new(seed))
    }
}

impl Default for GameState<UniformSource> {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game drawing every random decision from `rng`.
    ///
    /// The configuration is normalized first; the first piece spawns
    /// immediately.
    pub fn with_source(config: GameConfig, mut rng: R) -> Self {
        let config = config.normalized();
        let next = rng.next_kind();
        let lines = config.lines_baseline();
        let level = config.start_level;

        let mut state = Self {
            config,
            board: Board::new(config.width, config.height),
            rng,
            active: None,
            next,
            held: None,
            can_hold: true,
            last_event: None,
            score: 0,
            high_score: 0,
            level,
            lines,
            combo: 0,
            fall_speed: fall_speed(level),
            paused: false,
            game_over: false,
            last_rotation_was_spin: false,
            on_ground: false,
            lock_delay_timer: 0,
            clear_animation_timer: 0,
            clearing_lines: Vec::new(),
            level_up_timer: 0,
            score_popup: 0,
            score_popup_timer: 0,
            tetris_timer: 0,
            spin_banner: None,
            spin_banner_timer: 0,
            shake_timer: 0,
            jump_scare_active: false,
            jump_scare_timer: 0,
            particles: Vec::new(),
            move_left_counter: 0,
            move_right_counter: 0,
            soft_drop_counter: 0,
            fall_counter: 0,
        };
        state.spawn_piece();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Frames per row of gravity at the current level
    pub fn fall_speed(&self) -> u32 {
        self.fall_speed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn lock_delay_timer(&self) -> u32 {
        self.lock_delay_timer
    }

    pub fn last_rotation_was_spin(&self) -> bool {
        self.last_rotation_was_spin
    }

    pub fn clear_animation_timer(&self) -> u32 {
        self.clear_animation_timer
    }

    /// Rows currently shown in the clear animation
    pub fn clearing_lines(&self) -> &[usize] {
        &self.clearing_lines
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn spin_banner(&self) -> Option<SpinKind> {
        self.spin_banner
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Where the active piece would land, as a throwaway copy
    pub fn ghost_piece(&self) -> Option<Piece> {
        let mut ghost = self.active?;
        while self.board.is_valid_position(&ghost.shifted(0, 1)) {
            ghost.y += 1;
        }
        Some(ghost)
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i32> {
        self.ghost_piece().map(|ghost| ghost.y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = Some(self.next);
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.score_popup = self.score_popup;
        out.spin_banner = self.spin_banner;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.on_ground = self.on_ground;
        out.last_rotation_was_spin = self.last_rotation_was_spin;
        out.jump_scare_active = self.jump_scare_active;
        out.clearing_lines.clear();
        out.clearing_lines.extend_from_slice(&self.clearing_lines);
        out.particles.clear();
        out.particles.extend_from_slice(&self.particles);
        out.timers = TimersSnapshot {
            lock_delay: self.lock_delay_timer,
            clear_animation: self.clear_animation_timer,
            level_up: self.level_up_timer,
            score_popup: self.score_popup_timer,
            tetris: self.tetris_timer,
            spin_banner: self.spin_banner_timer,
            shake: self.shake_timer,
            jump_scare: self.jump_scare_timer,
            move_left: self.move_left_counter,
            move_right: self.move_right_counter,
            soft_drop: self.soft_drop_counter,
            fall: self.fall_counter,
            fall_speed: self.fall_speed,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the next piece to active and draw a new next piece.
    ///
    /// Returns false (and ends the game) if the new piece does not fit.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = std::mem::replace(&mut self.next, self.rng.next_kind());
        let piece = Piece::spawn(kind, self.board.width());

        self.lock_delay_timer = 0;
        self.on_ground = false;
        self.can_hold = true;
        self.last_rotation_was_spin = false;

        if !self.board.is_valid_position(&piece) {
            debug!("spawn of {:?} blocked, game over (score {})", kind, self.score);
            self.active = None;
            self.game_over = true;
            return false;
        }

        trace!("spawned {:?}, next {:?}", kind, self.next);
        self.active = Some(piece);
        true
    }

    /// Try to move the active piece by `(dx, dy)`.
    ///
    /// A successful move while grounded pushes the lock delay back by
    /// [`LOCK_DELAY_EXTENSION`], capped at [`LOCK_DELAY`].
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_over || self.paused {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !self.board.is_valid_position(&moved) {
            return false;
        }
        self.active = Some(moved);

        if self.on_ground && (dx, dy) != (0, 0) {
            self.extend_lock_delay();
        }
        true
    }

    /// Try to rotate the active piece, kicking sideways if needed
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.game_over || self.paused {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let Some((rotated, _kick)) =
            try_rotate(active, clockwise, |p| self.board.is_valid_position(p))
        else {
            self.last_rotation_was_spin = false;
            return false;
        };

        self.active = Some(rotated);
        self.last_rotation_was_spin = rotated.kind.can_spin() && self.is_spin_position(&rotated);

        if self.on_ground {
            self.extend_lock_delay();
        }
        true
    }

    /// At least three of the four inset box corners are walls, floor or blocks
    fn is_spin_position(&self, piece: &Piece) -> bool {
        let blocked = piece
            .spin_corners()
            .iter()
            .filter(|&&(x, y)| self.board.is_out_of_bounds(x, y) || self.board.is_occupied(x, y))
            .count();
        blocked >= 3
    }

    fn extend_lock_delay(&mut self) {
        self.lock_delay_timer = (self.lock_delay_timer + LOCK_DELAY_EXTENSION).min(LOCK_DELAY);
    }

    fn touch_down(&mut self) {
        if !self.on_ground {
            self.on_ground = true;
            self.lock_delay_timer = LOCK_DELAY;
        }
    }

    /// Swap active piece with hold piece
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || self.game_over || self.paused {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.held.replace(active.kind) {
            None => {
                // No hold piece yet, move current to hold and spawn new
                self.spawn_piece();
            }
            Some(held_kind) => {
                let piece = Piece::spawn(held_kind, self.board.width());
                self.lock_delay_timer = 0;
                self.on_ground = false;

                if self.board.is_valid_position(&piece) {
                    self.active = Some(piece);
                } else {
                    debug!("held {:?} does not fit at spawn, game over", held_kind);
                    self.active = None;
                    self.game_over = true;
                }
            }
        }
        debug!("hold: {:?} -> slot, active {:?}", active.kind, self.active.map(|p| p.kind));

        self.can_hold = false;
        self.last_rotation_was_spin = false;
        true
    }

    /// Drop the active piece to the bottom and lock it.
    ///
    /// Returns the points awarded for the drop itself.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over || self.paused || self.active.is_none() {
            return 0;
        }

        let mut rows: u32 = 0;
        while self.move_piece(0, 1) {
            rows += 1;
        }

        let points = calculate_drop_score(rows, true);
        self.add_score(points);
        self.lock_piece();
        points
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock(&piece);
        let full_rows = self.board.full_rows();

        let mut event = LockEvent {
            kind: piece.kind,
            lines_cleared: full_rows.len() as u32,
            points: 0,
            spin: None,
            combo: 0,
            level_up: false,
            jump_scare: false,
        };

        if full_rows.is_empty() {
            self.combo = 0;
        } else {
            let lines = full_rows.len();
            self.clear_animation_timer = CLEAR_ANIMATION_FRAMES;
            self.combo += 1;

            if self.rng.next_unit() < JUMP_SCARE_CHANCE {
                self.jump_scare_active = true;
                self.jump_scare_timer = JUMP_SCARE_FRAMES;
                self.shake_timer = JUMP_SCARE_SHAKE_FRAMES;
                event.jump_scare = true;
            }

            self.lines = self.lines.saturating_add(lines as u32);

            let spin = self.last_rotation_was_spin.then_some(piece.kind);
            let result = calculate_score(lines, self.level, spin, self.combo);
            if let Some(banner) = result.spin {
                self.spin_banner = Some(banner);
                self.spin_banner_timer = SPIN_BANNER_FRAMES;
                self.shake_timer = self.shake_timer.max(SPIN_SHAKE_FRAMES);
            }

            self.add_score(result.total);
            // High score only moves on a clear (and on reset).
            self.high_score = self.high_score.max(self.score);
            self.score_popup = result.total;
            self.score_popup_timer = SCORE_POPUP_FRAMES;
            self.shake_timer = self
                .shake_timer
                .max(LINE_SHAKE_BASE_FRAMES + LINE_SHAKE_PER_ROW * lines as u32);

            if lines >= 4 {
                self.tetris_timer = TETRIS_BANNER_FRAMES;
            }

            let old_level = self.level;
            self.level = calculate_level(self.lines);
            if self.level > old_level {
                self.level_up_timer = LEVEL_UP_FRAMES;
                event.level_up = true;
                debug!("level up: {} -> {}", old_level, self.level);
            }
            self.fall_speed = fall_speed(self.level);

            emit_row_particles(&mut self.particles, &self.board, &full_rows, &mut self.rng);
            debug!(
                "cleared rows {:?} (+{} points, combo {})",
                full_rows, result.total, self.combo
            );
            self.clearing_lines = full_rows;

            event.points = result.total;
            event.spin = result.spin;
        }

        event.combo = self.combo;
        self.last_event = Some(event);

        if self.board.is_game_over() {
            debug!("top row occupied after lock, game over (score {})", self.score);
            self.game_over = true;
        } else if self.clear_animation_timer == 0 {
            self.spawn_piece();
        }
    }

    /// Collapse the animated rows and bring in the next piece
    fn finish_line_clear(&mut self) {
        self.board.clear_lines();
        self.clearing_lines.clear();
        if !self.game_over {
            self.spawn_piece();
        }
    }

    fn decay_overlay_timers(&mut self) {
        self.level_up_timer = self.level_up_timer.saturating_sub(1);
        self.score_popup_timer = self.score_popup_timer.saturating_sub(1);
        self.tetris_timer = self.tetris_timer.saturating_sub(1);
        self.shake_timer = self.shake_timer.saturating_sub(1);

        self.spin_banner_timer = self.spin_banner_timer.saturating_sub(1);
        if self.spin_banner_timer == 0 {
            self.spin_banner = None;
        }

        self.jump_scare_timer = self.jump_scare_timer.saturating_sub(1);
        if self.jump_scare_timer == 0 {
            self.jump_scare_active = false;
        }
    }

    /// Flip the pause overlay. Ignored once the game is over.
    pub fn toggle_pause(&mut self) {
        if !self.game_over {
            self.paused = !self.paused;
        }
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self, input: &InputFrame) {
        update_particles(&mut self.particles);

        // Nothing else moves while cleared rows are animating.
        if self.clear_animation_timer > 0 {
            self.clear_animation_timer -= 1;
            if self.clear_animation_timer == 0 {
                self.finish_line_clear();
            }
            return;
        }

        self.decay_overlay_timers();

        if self.game_over {
            return;
        }

        if input.toggle_pause {
            self.toggle_pause();
        }
        if self.paused {
            return;
        }

        if input.rotate_cw {
            self.rotate(true);
        }
        if input.rotate_ccw {
            self.rotate(false);
        }
        if input.hold {
            self.hold();
        }
        if input.hard_drop {
            self.hard_drop();
            return;
        }

        if self.game_over || self.active.is_none() {
            return;
        }

        if auto_repeat_fires(&mut self.move_left_counter, input.move_left) {
            self.move_piece(-1, 0);
        }
        if auto_repeat_fires(&mut self.move_right_counter, input.move_right) {
            self.move_piece(1, 0);
        }

        if input.soft_drop {
            self.soft_drop_counter = self.soft_drop_counter.saturating_add(1);
            if self.soft_drop_counter % soft_drop_interval(self.fall_speed) == 0 {
                if self.move_piece(0, 1) {
                    self.add_score(calculate_drop_score(1, false));
                } else {
                    self.touch_down();
                }
            }
        } else {
            self.soft_drop_counter = 0;
        }

        self.fall_counter += 1;
        if self.fall_counter >= self.fall_speed {
            self.fall_counter = 0;
            if self.move_piece(0, 1) {
                self.on_ground = false;
                self.lock_delay_timer = 0;
            } else {
                self.touch_down();
            }
        }

        if self.on_ground {
            self.lock_delay_timer = self.lock_delay_timer.saturating_sub(1);
            if self.lock_delay_timer == 0 {
                self.lock_piece();
            }
        }
    }

    /// Advance one frame with no input held
    pub fn tick_idle(&mut self) {
        self.tick(&InputFrame::default());
    }

    /// Restart the match. The high score survives.
    pub fn reset(&mut self) {
        self.high_score = self.high_score.max(self.score);
        debug!("reset (high score {})", self.high_score);

        self.board.reset();
        self.active = None;
        self.held = None;
        self.can_hold = true;
        self.last_event = None;
        self.score = 0;
        self.lines = self.config.lines_baseline();
        self.level = self.config.start_level;
        self.combo = 0;
        self.fall_speed = fall_speed(self.level);
        self.paused = false;
        self.game_over = false;
        self.last_rotation_was_spin = false;
        self.on_ground = false;
        self.lock_delay_timer = 0;
        self.clear_animation_timer = 0;
        self.clearing_lines.clear();
        self.level_up_timer = 0;
        self.score_popup = 0;
        self.score_popup_timer = 0;
        self.tetris_timer = 0;
        self.spin_banner = None;
        self.spin_banner_timer = 0;
        self.shake_timer = 0;
        self.jump_scare_active = false;
        self.jump_scare_timer = 0;
        self.particles.clear();
        self.move_left_counter = 0;
        self.move_right_counter = 0;
        self.soft_drop_counter = 0;
        self.fall_counter = 0;

        self.next = self.rng.next_kind();
        self.spawn_piece();
    }
}

/// Held-direction auto-repeat: fire on the first frame, then every
/// [`MOVE_DELAY`] frames once held longer than [`INITIAL_MOVE_DELAY`].
fn auto_repeat_fires(counter: &mut u32, held: bool) -> bool {
    if !held {
        *counter = 0;
        return false;
    }
    *counter = counter.saturating_add(1);
    *counter == 1 || (*counter > INITIAL_MOVE_DELAY && *counter % MOVE_DELAY == 0)
}
