//! Seeded fair coin for the wagering game.
//!
//! Every toss advances a Weyl counter and scrambles it with the SplitMix64
//! finalizer; the top bit of the scrambled word is the face. Reproducible
//! for a given seed, not suitable for anything secret.

/// Odd Weyl increment, 2^64 divided by the golden ratio.
const TOSS_INCREMENT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone)]
pub struct Coin {
    counter: u64,
}

impl Coin {
    pub fn seeded(seed: u64) -> Self {
        Self { counter: seed }
    }

    /// Tosses the coin; `true` is heads.
    pub fn flip(&mut self) -> bool {
        self.counter = self.counter.wrapping_add(TOSS_INCREMENT);
        scramble(self.counter) >> 63 == 1
    }
}

fn scramble(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
