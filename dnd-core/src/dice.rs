//! D&D dice types and the roller seam.
//!
//! Anything on the sheet that needs a live roll (initiative) goes through a
//! [`Roller`], so a render can be made deterministic by handing it a
//! [`FixedRoller`].

use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard D&D die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Source of die rolls.
pub trait Roller {
    /// Roll a single die of the given type.
    fn roll(&mut self, die: DieType) -> u32;

    /// Roll a single d20.
    fn d20(&mut self) -> u32 {
        self.roll(DieType::D20)
    }
}

/// Rolls backed by a `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngRoller<R> {
    rng: R,
}

impl<R: Rng> RngRoller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRoller<ThreadRng> {
    /// Roller using the thread-local RNG.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> Roller for RngRoller<R> {
    fn roll(&mut self, die: DieType) -> u32 {
        self.rng.gen_range(1..=die.sides())
    }
}

/// Always returns the same face, clamped to the die's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRoller(pub u32);

impl Roller for FixedRoller {
    fn roll(&mut self, die: DieType) -> u32 {
        self.0.clamp(1, die.sides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_die_sides_and_notation() {
        for die in [
            DieType::D4,
            DieType::D6,
            DieType::D8,
            DieType::D10,
            DieType::D12,
            DieType::D20,
            DieType::D100,
        ] {
            assert_eq!(die.to_string(), format!("d{}", die.sides()));
        }
        assert_eq!(DieType::D20.to_string(), "d20");
    }

    #[test]
    fn test_rng_roller_stays_in_range() {
        let mut roller = RngRoller::new(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let roll = roller.d20();
            assert!((1..=20).contains(&roll));
        }
    }

    #[test]
    fn test_seeded_rollers_agree() {
        let mut a = RngRoller::new(StdRng::seed_from_u64(42));
        let mut b = RngRoller::new(StdRng::seed_from_u64(42));
        let left: Vec<u32> = (0..10).map(|_| a.d20()).collect();
        let right: Vec<u32> = (0..10).map(|_| b.d20()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_fixed_roller_clamps() {
        let mut roller = FixedRoller(15);
        assert_eq!(roller.d20(), 15);
        assert_eq!(roller.roll(DieType::D6), 6);
        assert_eq!(FixedRoller(0).d20(), 1);
    }
}
