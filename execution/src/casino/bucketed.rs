//! Target-multiplier games (limbo, crash) over a fixed slot resolution.
//!
//! A target `t` wins on the first `floor(resolution / t)` slots and pays
//! `t * rtp`. Flooring the win range costs strictly less than one slot, so the
//! realized RTP lies in `(rtp * (1 - t / resolution), rtp]`. Targets are capped
//! at `resolution / 100` whole units, which keeps the loss under 1% of target.

use super::combinatorics::bucketed_continuous_exact;
use crate::fixed::Fraction;
use edgeline_types::casino::{BetArray, Multiplier, Ratio, BPS_PER_WHOLE};
use tracing::debug;

/// Largest target accepted at `resolution`.
pub fn max_target(resolution: u32) -> Multiplier {
    Multiplier::from_bps(resolution as u64 * (BPS_PER_WHOLE / 100))
}

pub fn compile(resolution: u32, target: Multiplier, rtp: Ratio) -> BetArray {
    let len = resolution as usize;
    if target <= Multiplier::ONE || target > max_target(resolution) {
        debug!(%target, resolution, "target outside range");
        return BetArray::zeroed(len);
    }

    let partition =
        bucketed_continuous_exact(resolution, BPS_PER_WHOLE as u128, target.bps() as u128);
    if partition.win_slots() == 0 {
        debug!(%target, resolution, "no winning slot");
        return BetArray::zeroed(len);
    }
    let Some(payout) = Fraction::from_bps(target.bps())
        .checked_mul(Fraction::from_ratio(rtp))
        .and_then(Fraction::to_multiplier)
    else {
        debug!(%target, "payout overflow");
        return BetArray::zeroed(len);
    };
    BetArray::with_winning_range(len, partition.win, payout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rtp(bps: u64) -> Ratio {
        Ratio::from_bps(bps).unwrap()
    }

    #[test]
    fn test_limbo_two_x() {
        let bet = compile(10_000, Multiplier::from_bps(20_000), rtp(9_500));
        assert_eq!(bet.len(), 10_000);
        assert_eq!(bet.winning_count(), 5_000);
        assert_eq!(bet.get(4_999), Some(Multiplier::from_bps(19_000)));
        assert_eq!(bet.get(5_000), Some(Multiplier::ZERO));
    }

    #[test]
    fn test_crash_floors_win_range() {
        // 1000 / 3 = 333.3 slots
        let bet = compile(1_000, Multiplier::from_bps(30_000), rtp(9_600));
        assert_eq!(bet.winning_count(), 333);
        assert_eq!(bet.get(0), Some(Multiplier::from_bps(28_800)));
    }

    #[test]
    fn test_error_bound_holds_across_targets() {
        for resolution in [1_000u32, 10_000] {
            for target_bps in (10_001..=max_target(resolution).bps()).step_by(997) {
                let target = Multiplier::from_bps(target_bps);
                let bet = compile(resolution, target, rtp(9_600));
                let realized = bet.total_bps() as f64 / bet.len() as f64 / BPS_PER_WHOLE as f64;
                let lower = 0.96 * (1.0 - target.as_f64() / resolution as f64);
                assert!(
                    realized > lower - 1e-4 && realized <= 0.96 + 1e-4,
                    "resolution {resolution} target {target}: {realized}"
                );
                assert!(realized >= 0.96 * 0.99 - 1e-4);
            }
        }
    }

    #[test]
    fn test_out_of_range_targets() {
        for target_bps in [0, 5_000, 10_000, 1_000_001] {
            let bet = compile(10_000, Multiplier::from_bps(target_bps), rtp(9_500));
            assert_eq!(bet.len(), 10_000);
            assert!(bet.is_all_zero());
        }
        assert_eq!(max_target(1_000), Multiplier::from_bps(100_000));
        assert_eq!(
            compile(1_000, Multiplier::from_bps(100_000), rtp(9_600)).winning_count(),
            100
        );
        assert!(compile(1_000, Multiplier::from_bps(100_001), rtp(9_600)).is_all_zero());
    }
}
