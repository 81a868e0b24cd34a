//! Reveal-without-hitting-a-trap games.
//!
//! The bet array has `grid_size + 1` entries indexed by the number of safe
//! cells revealed. Only the cashed-out level `revealed_safe` pays. Each level's
//! multiplier is computed from scratch so the current and next level never
//! share rounding error.

use super::combinatorics::sequential_fraction;
use crate::fixed::Fraction;
use edgeline_types::casino::{BetArray, Multiplier, Ratio};
use tracing::debug;

/// Survival probability for the level, or `None` when the parameters are out of range.
pub fn level_probability(grid_size: u8, mine_count: u8, revealed_safe: u8) -> Option<Fraction> {
    if mine_count == 0 || mine_count >= grid_size || revealed_safe > grid_size - mine_count {
        return None;
    }
    sequential_fraction(grid_size as u32, mine_count as u32, revealed_safe as u32)
}

/// Multiplier for cashing out after `revealed_safe` safe cells.
pub fn level_multiplier(
    grid_size: u8,
    mine_count: u8,
    revealed_safe: u8,
    rtp: Ratio,
) -> Option<Multiplier> {
    let p = level_probability(grid_size, mine_count, revealed_safe)?;
    if p.is_zero() {
        return None;
    }
    Fraction::from_ratio(rtp)
        .checked_div(p)
        .and_then(Fraction::to_multiplier)
}

/// Multiplier the player would reach with one more safe reveal.
pub fn next_level_multiplier(
    grid_size: u8,
    mine_count: u8,
    revealed_safe: u8,
    rtp: Ratio,
) -> Option<Multiplier> {
    level_multiplier(grid_size, mine_count, revealed_safe.checked_add(1)?, rtp)
}

pub fn compile(grid_size: u8, mine_count: u8, revealed_safe: u8, rtp: Ratio) -> BetArray {
    let len = grid_size as usize + 1;
    match level_multiplier(grid_size, mine_count, revealed_safe, rtp) {
        Some(multiplier) => {
            let level = revealed_safe as usize;
            BetArray::with_winning_range(len, level..level + 1, multiplier)
        }
        None => {
            debug!(grid_size, mine_count, revealed_safe, "level unreachable");
            BetArray::zeroed(len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rtp(bps: u64) -> Ratio {
        Ratio::from_bps(bps).unwrap()
    }

    #[test]
    fn test_five_safe_of_twenty_two() {
        // 0.96 * 13800 / 6840 = 1.93684..
        let bet = compile(25, 3, 5, rtp(9_600));
        assert_eq!(bet.len(), 26);
        assert_eq!(bet.winning_count(), 1);
        assert_eq!(bet.get(5), Some(Multiplier::from_bps(19_368)));
    }

    #[test]
    fn test_strictly_increasing() {
        for mines in 1..25u8 {
            let mut previous = Multiplier::ZERO;
            for revealed in 0..=(25 - mines) {
                let current = level_multiplier(25, mines, revealed, rtp(9_600)).unwrap();
                assert!(
                    current > previous,
                    "mines {mines} revealed {revealed}: {current} <= {previous}"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_next_level_matches_fresh_computation() {
        for revealed in 0..21u8 {
            assert_eq!(
                next_level_multiplier(25, 3, revealed, rtp(9_600)),
                level_multiplier(25, 3, revealed + 1, rtp(9_600))
            );
        }
        assert_eq!(next_level_multiplier(25, 3, 22, rtp(9_600)), None);
    }

    #[test]
    fn test_zero_reveals_pays_rtp() {
        let bet = compile(25, 3, 0, rtp(9_600));
        assert_eq!(bet.get(0), Some(Multiplier::from_bps(9_600)));
    }

    #[test]
    fn test_invalid_levels() {
        for (mines, revealed) in [(0, 1), (25, 0), (30, 0), (3, 23)] {
            let bet = compile(25, mines, revealed, rtp(9_600));
            assert_eq!(bet.len(), 26);
            assert!(bet.is_all_zero());
        }
    }
}
