//! "At least K of a face" over `n` fair coins.
//!
//! Index `m` is the number of heads. A heads bet wins on `[k, n]`, a tails bet
//! on `[0, n - k]`.

use super::combinatorics::prob_at_least_fair_coins;
use crate::fixed::Fraction;
use edgeline_types::casino::{BetArray, CoinFace, Ratio};
use tracing::debug;

/// Exact win probability, or `None` when the parameters are out of range.
pub fn win_probability(max_trials: u8, coin_count: u8, at_least: u8) -> Option<Fraction> {
    if coin_count == 0 || coin_count > max_trials {
        return None;
    }
    prob_at_least_fair_coins(coin_count, at_least)
}

pub fn compile(
    max_trials: u8,
    coin_count: u8,
    at_least: u8,
    face: CoinFace,
    rtp: Ratio,
) -> BetArray {
    let len = coin_count as usize + 1;
    let p = match win_probability(max_trials, coin_count, at_least) {
        Some(p) if !p.is_zero() => p,
        _ => {
            debug!(coin_count, at_least, max_trials, "no winning outcome");
            return BetArray::zeroed(len);
        }
    };
    let Some(multiplier) = Fraction::from_ratio(rtp)
        .checked_div(p)
        .and_then(Fraction::to_multiplier)
    else {
        debug!(coin_count, at_least, "multiplier overflow");
        return BetArray::zeroed(len);
    };

    let (n, k) = (coin_count as usize, at_least as usize);
    let winning = match face {
        CoinFace::Heads => k..n + 1,
        CoinFace::Tails => 0..n - k + 1,
    };
    BetArray::with_winning_range(len, winning, multiplier)
}
