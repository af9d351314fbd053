//! Randomness for pin deflections
//!
//! The simulation only ever asks for a fair coin flip. Sources are injected so
//! tests can script exact left/right sequences.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of independent fair coin flips
pub trait CoinSource {
    /// `true` deflects right, `false` deflects left
    fn coin(&mut self) -> bool;
}

impl<T: CoinSource + ?Sized> CoinSource for &mut T {
    fn coin(&mut self) -> bool {
        (**self).coin()
    }
}

/// Seeded PCG coin, reproducible for a given seed
#[derive(Debug, Clone)]
pub struct PcgCoin {
    seed: u64,
    rng: Pcg32,
}

impl PcgCoin {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl CoinSource for PcgCoin {
    fn coin(&mut self) -> bool {
        self.rng.random::<bool>()
    }
}

/// Always returns the same side
#[derive(Debug, Clone, Copy)]
pub struct FixedCoin(pub bool);

impl CoinSource for FixedCoin {
    fn coin(&mut self) -> bool {
        self.0
    }
}

/// Replays a fixed sequence, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedCoin {
    flips: Vec<bool>,
    next: usize,
}

impl ScriptedCoin {
    /// An empty script behaves like `FixedCoin(false)`
    pub fn new(flips: Vec<bool>) -> Self {
        Self { flips, next: 0 }
    }

    /// Number of flips handed out so far
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl CoinSource for ScriptedCoin {
    fn coin(&mut self) -> bool {
        if self.flips.is_empty() {
            return false;
        }
        let flip = self.flips[self.next % self.flips.len()];
        self.next += 1;
        flip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcg_is_reproducible() {
        let mut a = PcgCoin::new(42);
        let mut b = PcgCoin::new(42);
        let seq_a: Vec<bool> = (0..64).map(|_| a.coin()).collect();
        let seq_b: Vec<bool> = (0..64).map(|_| b.coin()).collect();
        assert_eq!(seq_a, seq_b);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_pcg_produces_both_sides() {
        let mut coin = PcgCoin::new(7);
        let heads = (0..1000).filter(|_| coin.coin()).count();
        assert!(heads > 350 && heads < 650, "heads = {}", heads);
    }

    #[test]
    fn test_scripted_wraps() {
        let mut coin = ScriptedCoin::new(vec![true, false, false]);
        let seq: Vec<bool> = (0..5).map(|_| coin.coin()).collect();
        assert_eq!(seq, vec![true, false, false, true, false]);
        assert_eq!(coin.drawn(), 5);

        let mut empty = ScriptedCoin::new(Vec::new());
        assert!(!empty.coin());
    }
}
