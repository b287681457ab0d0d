//! Line-clear particles.
//!
//! Purely cosmetic: nothing here feeds back into game rules. Positions are in
//! board cells (fractional), velocities in cells per frame before the 0.1 step
//! scale.

use serde::Serialize;

use crate::board::Board;
use crate::rng::RandomSource;
use crate::types::{PARTICLE_COLUMN_STRIDE, PARTICLE_FALLBACK_COLOR, PARTICLE_LIFE};

const STEP_SCALE: f32 = 0.1;
const GRAVITY: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub life: u32,
    pub color: u8,
}

impl Particle {
    /// Advance one frame. Returns false once the particle has expired.
    fn step(&mut self) -> bool {
        self.x += self.dx * STEP_SCALE;
        self.y += self.dy * STEP_SCALE;
        self.dy += GRAVITY;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

/// Advance every particle one frame and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(Particle::step);
}

/// Emit particles along each row in `rows`, reading colors from `board`.
///
/// Must run before the rows are collapsed. Draws two values from `rng` per
/// particle: horizontal velocity in `[-1, 1)`, vertical in `[-2, -0.5)`.
pub fn emit_row_particles<R: RandomSource + ?Sized>(
    particles: &mut Vec<Particle>,
    board: &Board,
    rows: &[usize],
    rng: &mut R,
) {
    for &y in rows {
        for x in (0..board.width()).step_by(PARTICLE_COLUMN_STRIDE) {
            let color = match board.color_at(x as i32, y as i32) {
                0 => PARTICLE_FALLBACK_COLOR,
                c => c,
            };
            let dx = -1.0 + 2.0 * rng.next_unit();
            let dy = -2.0 + 1.5 * rng.next_unit();
            particles.push(Particle {
                x: x as f32,
                y: y as f32,
                dx,
                dy,
                life: PARTICLE_LIFE,
                color,
            });
        }
    }
}
