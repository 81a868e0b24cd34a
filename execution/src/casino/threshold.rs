//! Roll-under / roll-over over `N` equally likely outcomes.
//!
//! Index `i` is the rolled value. `Under` wins `[0, threshold)`, `Over` wins
//! `[threshold, N)`. Every winning index carries `rtp * N / wins`.

use crate::fixed::Fraction;
use edgeline_types::casino::{BetArray, Direction, Ratio};
use tracing::debug;

pub fn compile(outcome_count: u32, threshold: u32, direction: Direction, rtp: Ratio) -> BetArray {
    let len = outcome_count as usize;
    if threshold == 0 || threshold >= outcome_count {
        debug!(threshold, outcome_count, "threshold outside domain");
        return BetArray::zeroed(len);
    }

    let (winning, wins) = match direction {
        Direction::Under => (0..threshold as usize, threshold),
        Direction::Over => (threshold as usize..len, outcome_count - threshold),
    };
    let multiplier = Fraction::new(outcome_count as u128, wins as u128)
        .and_then(|fair| fair.checked_mul(Fraction::from_ratio(rtp)))
        .and_then(Fraction::to_multiplier);
    match multiplier {
        Some(multiplier) => BetArray::with_winning_range(len, winning, multiplier),
        None => {
            debug!(threshold, outcome_count, "multiplier overflow");
            BetArray::zeroed(len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeline_types::casino::Multiplier;

    fn rtp(bps: u64) -> Ratio {
        Ratio::from_bps(bps).unwrap()
    }

    #[test]
    fn test_roll_under_half() {
        let bet = compile(100, 50, Direction::Under, rtp(9_500));
        assert_eq!(bet.len(), 100);
        for i in 0..50 {
            assert_eq!(bet.get(i), Some(Multiplier::from_bps(19_000)));
        }
        for i in 50..100 {
            assert_eq!(bet.get(i), Some(Multiplier::ZERO));
        }
    }

    #[test]
    fn test_roll_over() {
        let bet = compile(100, 75, Direction::Over, rtp(9_500));
        assert_eq!(bet.winning_count(), 25);
        assert_eq!(bet.get(74), Some(Multiplier::ZERO));
        assert_eq!(bet.get(75), Some(Multiplier::from_bps(38_000)));
        assert_eq!(bet.get(99), Some(Multiplier::from_bps(38_000)));
    }

    #[test]
    fn test_hilo_rounding() {
        // 13 / 4 * 0.95 = 3.0875
        let bet = compile(13, 4, Direction::Under, rtp(9_500));
        assert_eq!(bet.get(0), Some(Multiplier::from_bps(30_875)));
        // 13 / 7 * 0.95 = 1.76428..
        let bet = compile(13, 6, Direction::Over, rtp(9_500));
        assert_eq!(bet.get(12), Some(Multiplier::from_bps(17_643)));
    }

    #[test]
    fn test_rounding_drift_at_zero_edge() {
        // 13 / 6 = 2.16666.. rounds up to 21_667
        let bet = compile(13, 6, Direction::Under, Ratio::ONE);
        assert_eq!(bet.get(0), Some(Multiplier::from_bps(21_667)));

        for outcome_count in [2u32, 6, 13, 37, 100] {
            for threshold in 1..outcome_count {
                for direction in [Direction::Under, Direction::Over] {
                    let bet = compile(outcome_count, threshold, direction, Ratio::ONE);
                    let win_rate = bet.winning_count() as f64 / bet.len() as f64;
                    let realized = bet.total_bps() as f64 / bet.len() as f64 / 10_000.0;
                    let bound = 0.00005 * win_rate + 1e-12;
                    assert!(
                        (realized - 1.0).abs() <= bound,
                        "{outcome_count}/{threshold} {direction:?}: {realized}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_degenerate_thresholds() {
        for threshold in [0, 100, 150] {
            for direction in [Direction::Under, Direction::Over] {
                let bet = compile(100, threshold, direction, rtp(9_500));
                assert_eq!(bet.len(), 100);
                assert!(bet.is_all_zero());
            }
        }
    }
}
