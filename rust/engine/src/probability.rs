use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::pool::CardPool;

/// Counts of remaining cards above, below and equal to a lane's top card.
/// Derived on demand; `higher + lower + equal == total == pool.size()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilitySnapshot {
    pub higher: u32,
    pub lower: u32,
    pub equal: u32,
    pub total: u32,
}

impl ProbabilitySnapshot {
    /// All-zero snapshot reported for eliminated lanes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn higher_ratio(&self) -> f64 {
        self.ratio(self.higher)
    }

    pub fn lower_ratio(&self) -> f64 {
        self.ratio(self.lower)
    }

    pub fn equal_ratio(&self) -> f64 {
        self.ratio(self.equal)
    }

    /// Chance that a guess on this lane survives in the given direction,
    /// counting ties as wins.
    pub fn success_ratio(&self, higher: bool) -> f64 {
        let hits = if higher { self.higher } else { self.lower };
        self.ratio(hits + self.equal)
    }

    fn ratio(&self, count: u32) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.total)
        }
    }
}

/// Buckets every remaining card against `top_value`.
pub fn compute(pool: &CardPool, top_value: u8) -> ProbabilitySnapshot {
    pool.cards()
        .iter()
        .fold(ProbabilitySnapshot::empty(), |mut acc, card| {
            match card.value().cmp(&top_value) {
                std::cmp::Ordering::Greater => acc.higher += 1,
                std::cmp::Ordering::Less => acc.lower += 1,
                std::cmp::Ordering::Equal => acc.equal += 1,
            }
            acc.total += 1;
            acc
        })
}

/// Snapshot for a lane's top card; `None` (eliminated) yields all zeros.
pub fn for_top_card(pool: &CardPool, top: Option<&Card>) -> ProbabilitySnapshot {
    match top {
        Some(card) => compute(pool, card.value()),
        None => ProbabilitySnapshot::empty(),
    }
}
