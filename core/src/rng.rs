//! Seeded randomness for the complaint generator.
//!
//! The generator never touches an OS or thread-local RNG. One master seed
//! from `GeneratorConfig` fans out into a separate PCG stream per
//! [`RuleSlot`], so a rule that draws more or fewer values per record leaves
//! every other rule's sequence untouched. Two runs with the same seed and
//! config therefore emit the same table byte for byte.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Golden-ratio multiplier that spreads neighbouring slot indices apart.
const SLOT_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

fn stream_seed(master_seed: u64, slot: RuleSlot) -> u64 {
    master_seed ^ (slot as u64).wrapping_mul(SLOT_MIX)
}

/// The random stream owned by one generation rule.
pub struct RuleRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl RuleRng {
    pub fn new(master_seed: u64, slot: RuleSlot) -> Self {
        Self {
            name: slot.name(),
            inner: Pcg64Mcg::seed_from_u64(stream_seed(master_seed, slot)),
        }
    }

    /// Float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Integer in [0, n). Panics when `n` is zero.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        self.inner.gen_range(0..n)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi], both ends inclusive.
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(lo <= hi, "range_inclusive: lo > hi");
        lo + self.next_u64_below(u64::from(hi - lo) + 1) as u32
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = self.next_u64_below(items.len() as u64) as usize;
        &items[idx]
    }

    /// Index drawn proportionally to `weights`. Weights need not sum to 1.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weights must not be empty");
        let total: f64 = weights.iter().sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        // Float rounding can leave roll == total; land on the last non-zero weight.
        weights.iter().rposition(|w| *w > 0.0).unwrap_or(weights.len() - 1)
    }
}

/// Hands out one [`RuleRng`] per slot for a run seeded with `master_seed`.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_rule(&self, slot: RuleSlot) -> RuleRng {
        RuleRng::new(self.master_seed, slot)
    }
}

/// Slot numbers are part of the seed derivation: renumbering a slot changes
/// every table generated from an existing seed. New rules take the next free number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RuleSlot {
    Timestamp = 0,
    FraudType = 1,
    Amount = 2,
    VictimCity = 3,
    NightShift = 4,
    Withdrawal = 5,
    WithdrawalCity = 6,
    Hotspot = 7,
}

impl RuleSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::FraudType => "fraud_type",
            Self::Amount => "amount",
            Self::VictimCity => "victim_city",
            Self::NightShift => "night_shift",
            Self::Withdrawal => "withdrawal",
            Self::WithdrawalCity => "withdrawal_city",
            Self::Hotspot => "hotspot",
        }
    }
}
