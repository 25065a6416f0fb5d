//! Randomness threaded explicitly through generation, population, and combat.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// The stream a session draws from. Tests substitute scripted sources.
pub trait RandomSource {
    fn draw_u32(&mut self) -> u32;

    /// One combat batch.
    fn draw_u16(&mut self) -> u16 {
        (self.draw_u32() >> 16) as u16
    }

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        self.draw_u32() as usize % bound
    }
}

impl RandomSource for ChaCha8Rng {
    fn draw_u32(&mut self) -> u32 {
        Rng::next_u32(self)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw_u32(&mut self) -> u32 {
        (**self).draw_u32()
    }

    fn draw_u16(&mut self) -> u16 {
        (**self).draw_u16()
    }
}

pub fn session_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
