//! RNG module - pluggable random source for piece selection and effects
//!
//! Pieces are picked uniformly among the seven kinds, independent of history:
//! there is no 7-bag and no anti-repeat rule. The same source also feeds the
//! cosmetic rolls (rare event, particle velocities), so one seed reproduces a
//! whole match.
//!
//! [`SequenceSource`] replays a fixed list of kinds for deterministic tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Source of every random decision the simulation makes.
pub trait RandomSource {
    /// Kind of the next generated piece
    fn next_kind(&mut self) -> PieceKind;

    /// Uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f32;
}

/// Uniform selection over the seven kinds, backed by a seeded [`StdRng`]
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: StdRng,
    seed: u64,
}

impl UniformSource {
    /// Create a new source with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    fn next_unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// Cycles through a fixed list of kinds.
///
/// `next_unit` always returns the same value; the default of `1.0` never
/// triggers a chance-based effect.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    index: usize,
    unit: f32,
}

impl SequenceSource {
    /// Create a source replaying `kinds` in order, forever.
    ///
    /// An empty list falls back to a single `T`.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::T);
        }
        Self {
            kinds,
            index: 0,
            unit: 1.0,
        }
    }

    /// Same sequence, with `next_unit` pinned to `unit`
    pub fn with_unit(mut self, unit: f32) -> Self {
        self.unit = unit;
        self
    }
}

impl RandomSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = self.index.wrapping_add(1);
        kind
    }

    fn next_unit(&mut self) -> f32 {
        self.unit
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }

    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}
