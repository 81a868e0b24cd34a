//! Probability primitives shared by the compilers.
//!
//! The `f64` functions are for reporting and weighting. Anything that ends up
//! in a bet array goes through the exact variants.

use crate::fixed::Fraction;
use std::ops::Range;

/// `C(n, k)` as a float. Zero when `k < 0` or `k > n`.
pub fn binomial(n: u64, k: i64) -> f64 {
    if k < 0 || k as u64 > n {
        return 0.0;
    }
    let k = (k as u64).min(n - k as u64);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// `C(n, k)` exactly. `Some(0)` when `k > n`, `None` on overflow.
pub fn binomial_exact(n: u32, k: u32) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1).
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

pub fn prob_exact_binomial(n: u64, k: i64, p: f64) -> f64 {
    if k < 0 || k as u64 > n {
        return 0.0;
    }
    binomial(n, k) * p.powi(k as i32) * (1.0 - p).powi((n - k as u64) as i32)
}

/// Probability of at least `k` successes in `n` trials.
pub fn prob_at_least_binomial(n: u64, k: i64, p: f64) -> f64 {
    if k <= 0 {
        return 1.0;
    }
    if k as u64 > n {
        return 0.0;
    }
    (k..=n as i64)
        .map(|i| prob_exact_binomial(n, i, p))
        .sum()
}

/// Exact probability of at least `k` heads from `n` fair coins.
pub fn prob_at_least_fair_coins(n: u8, k: u8) -> Option<Fraction> {
    if n as u32 >= u128::BITS {
        return None;
    }
    let mut hits: u128 = 0;
    for i in k..=n {
        hits = hits.checked_add(binomial_exact(n as u32, i as u32)?)?;
    }
    Fraction::new(hits, 1u128 << n)
}

/// Probability of drawing `draws` safe cells in a row from a grid holding `bad` traps.
pub fn prob_sequential_without_replacement(grid: u32, bad: u32, draws: u32) -> f64 {
    if bad > grid || draws > grid - bad {
        return 0.0;
    }
    let safe = grid - bad;
    (0..draws).fold(1.0, |acc, i| {
        acc * (safe - i) as f64 / (grid - i) as f64
    })
}

/// Exact form of [`prob_sequential_without_replacement`]. `None` on overflow.
pub fn sequential_fraction(grid: u32, bad: u32, draws: u32) -> Option<Fraction> {
    if bad > grid || draws > grid - bad {
        return Some(Fraction::ZERO);
    }
    let safe = grid - bad;
    (0..draws).try_fold(Fraction::ONE, |acc, i| {
        acc.checked_mul(Fraction::new((safe - i) as u128, (grid - i) as u128)?)
    })
}

/// Probability of exactly `hits` marked numbers among `draws` drawn from `pool`.
pub fn prob_hypergeometric(pool: u32, marked: u32, draws: u32, hits: u32) -> f64 {
    if marked > pool || draws > pool || hits > marked || hits > draws {
        return 0.0;
    }
    let unmarked = pool - marked;
    if draws - hits > unmarked {
        return 0.0;
    }
    binomial(marked as u64, hits as i64) * binomial(unmarked as u64, (draws - hits) as i64)
        / binomial(pool as u64, draws as i64)
}

/// Split of `0..resolution` into a winning prefix and a losing suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPartition {
    pub win: Range<usize>,
    pub lose: Range<usize>,
}

impl BucketPartition {
    fn with_win_slots(resolution: u32, win_slots: u128) -> Self {
        let resolution = resolution as usize;
        let win_slots = usize::try_from(win_slots).unwrap_or(resolution).min(resolution);
        BucketPartition {
            win: 0..win_slots,
            lose: win_slots..resolution,
        }
    }

    pub fn win_slots(&self) -> usize {
        self.win.len()
    }
}

/// Win range of `floor(resolution * p)` slots. Never rounds up.
pub fn bucketed_continuous(resolution: u32, p: f64) -> BucketPartition {
    let slots = if p.is_finite() && p > 0.0 {
        (resolution as f64 * p).floor() as u128
    } else {
        0
    };
    BucketPartition::with_win_slots(resolution, slots)
}

/// Win range of `floor(resolution * numerator / denominator)` slots.
pub fn bucketed_continuous_exact(
    resolution: u32,
    numerator: u128,
    denominator: u128,
) -> BucketPartition {
    let slots = match (resolution as u128).checked_mul(numerator) {
        Some(scaled) if denominator > 0 => scaled / denominator,
        _ => 0,
    };
    BucketPartition::with_win_slots(resolution, slots)
}
