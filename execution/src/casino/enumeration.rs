//! Declared hand-rank tables (poker, blackjack, slots).
//!
//! Each rank occupies `weight` equiprobable slots, so the compiled array is the
//! table expanded by weight. Nothing is computed per call; the validator is the
//! only check that the declared table meets its target.

use edgeline_types::casino::{enumeration_slots, BetArray, HandRank, Multiplier};
use serde::Serialize;

pub fn compile(hand_ranks: &[HandRank]) -> BetArray {
    let mut values = Vec::with_capacity(enumeration_slots(hand_ranks));
    for rank in hand_ranks {
        values.extend(std::iter::repeat(rank.multiplier).take(rank.weight as usize));
    }
    BetArray::from_multipliers(values)
}

/// One row per rank, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub name: String,
    pub multiplier: Multiplier,
    pub probability: f64,
}

pub fn rank_table(hand_ranks: &[HandRank]) -> Vec<RankEntry> {
    let slots = enumeration_slots(hand_ranks);
    hand_ranks
        .iter()
        .map(|rank| RankEntry {
            name: rank.name.clone(),
            multiplier: rank.multiplier,
            probability: if slots == 0 {
                0.0
            } else {
                rank.weight as f64 / slots as f64
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blackjack() -> Vec<HandRank> {
        vec![
            HandRank::new("Win", 18_500, 42),
            HandRank::new("Blackjack", 23_000, 5),
            HandRank::new("Push", 10_000, 8),
            HandRank::new("Lose", 0, 45),
        ]
    }

    #[test]
    fn test_expands_by_weight() {
        let bet = compile(&blackjack());
        assert_eq!(bet.len(), 100);
        assert_eq!(bet.get(0), Some(Multiplier::from_bps(18_500)));
        assert_eq!(bet.get(41), Some(Multiplier::from_bps(18_500)));
        assert_eq!(bet.get(42), Some(Multiplier::from_bps(23_000)));
        assert_eq!(bet.get(47), Some(Multiplier::from_bps(10_000)));
        assert_eq!(bet.get(55), Some(Multiplier::ZERO));
        assert_eq!(bet.total_bps(), 972_000);
    }

    #[test]
    fn test_identical_every_call() {
        assert_eq!(compile(&blackjack()), compile(&blackjack()));
    }

    #[test]
    fn test_zero_weight_rank_is_skipped() {
        let ranks = vec![HandRank::new("Never", 50_000, 0), HandRank::new("Even", 20_000, 2)];
        assert_eq!(compile(&ranks).to_bps(), vec![20_000, 20_000]);
    }

    #[test]
    fn test_rank_table() {
        let table = rank_table(&blackjack());
        assert_eq!(table.len(), 4);
        assert_eq!(table[1].name, "Blackjack");
        assert_eq!(table[1].probability, 0.05);
        let total: f64 = table.iter().map(|entry| entry.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
