//! Wagers covering an arbitrary set of equally likely pockets (roulette).
//!
//! Covering `c` of `N` pockets pays `rtp * N / c` on each covered index. The
//! set need not be contiguous, which is what separates this from a threshold.

use crate::fixed::Fraction;
use edgeline_types::casino::{BetArray, Multiplier, Ratio};
use std::collections::BTreeSet;
use tracing::debug;

pub fn compile(outcome_count: u32, pockets: &BTreeSet<u32>, rtp: Ratio) -> BetArray {
    let len = outcome_count as usize;
    if pockets.is_empty() || pockets.iter().any(|pocket| *pocket >= outcome_count) {
        debug!(outcome_count, covered = pockets.len(), "coverage outside domain");
        return BetArray::zeroed(len);
    }

    let multiplier = Fraction::new(outcome_count as u128, pockets.len() as u128)
        .and_then(|fair| fair.checked_mul(Fraction::from_ratio(rtp)))
        .and_then(Fraction::to_multiplier);
    let Some(multiplier) = multiplier else {
        debug!(outcome_count, "multiplier overflow");
        return BetArray::zeroed(len);
    };
    let mut values = vec![Multiplier::ZERO; len];
    for pocket in pockets {
        values[*pocket as usize] = multiplier;
    }
    BetArray::from_multipliers(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeline_types::casino::{RouletteBet, ROULETTE_POCKETS};

    fn rtp(bps: u64) -> Ratio {
        Ratio::from_bps(bps).unwrap()
    }

    #[test]
    fn test_straight_up() {
        let bet = compile(ROULETTE_POCKETS, &RouletteBet::Straight(17).pockets(), rtp(9_730));
        assert_eq!(bet.len(), 37);
        assert_eq!(bet.winning_count(), 1);
        // 37 * 0.973 = 36.001
        assert_eq!(bet.get(17), Some(Multiplier::from_bps(360_010)));
    }

    #[test]
    fn test_red_is_not_contiguous() {
        let bet = compile(ROULETTE_POCKETS, &RouletteBet::Red.pockets(), rtp(9_730));
        assert_eq!(bet.winning_count(), 18);
        assert_eq!(bet.get(0), Some(Multiplier::ZERO));
        assert_eq!(bet.get(1), Some(Multiplier::from_bps(20_001)));
        assert_eq!(bet.get(2), Some(Multiplier::ZERO));
        assert_eq!(bet.get(36), Some(Multiplier::from_bps(20_001)));
    }

    #[test]
    fn test_inside_sets() {
        // Corner: 37 / 4 * 0.973 = 9.00025
        let corner = BTreeSet::from([1, 2, 4, 5]);
        let bet = compile(ROULETTE_POCKETS, &corner, rtp(9_730));
        assert_eq!(bet.to_bps()[..6], [0, 90_002, 90_002, 0, 90_002, 90_002]);

        // Six line: 37 / 6 * 0.973 = 6.00016..
        let six_line: BTreeSet<u32> = (31..=36).collect();
        let bet = compile(ROULETTE_POCKETS, &six_line, rtp(9_730));
        assert_eq!(bet.get(31), Some(Multiplier::from_bps(60_002)));
    }

    #[test]
    fn test_degenerate_coverage() {
        for pockets in [BTreeSet::new(), BTreeSet::from([3, 37]), RouletteBet::Dozen(4).pockets()] {
            let bet = compile(ROULETTE_POCKETS, &pockets, rtp(9_730));
            assert_eq!(bet.len(), 37);
            assert!(bet.is_all_zero());
        }
    }
}
