//! Binomially weighted bucket tables (plinko).
//!
//! A drop through `n` rows lands in bucket `k` with probability `C(n, k) / 2^n`.
//! The base table gives each bucket's relative payout; compiling scales it by
//! `rtp * 2^n / sum(base[k] * C(n, k))` so the weighted return equals `rtp`.

use super::combinatorics::binomial_exact;
use crate::fixed::Fraction;
use edgeline_types::casino::{BetArray, Multiplier, Ratio};
use tracing::debug;

/// Binomial weights `C(n, k)` for every bucket, with their total `2^n`.
fn bucket_weights(rows: u32) -> Option<(Vec<u128>, u128)> {
    let weights = (0..=rows)
        .map(|bucket| binomial_exact(rows, bucket))
        .collect::<Option<Vec<_>>>()?;
    let total = 1u128.checked_shl(rows)?;
    Some((weights, total))
}

fn scaled(base: &[Multiplier], rtp: Ratio) -> Option<Vec<Multiplier>> {
    let rows = u32::try_from(base.len().checked_sub(1)?).ok()?;
    let (weights, total) = bucket_weights(rows)?;
    let mut expected_base: u128 = 0;
    for (multiplier, weight) in base.iter().zip(&weights) {
        let weighted = (multiplier.bps() as u128).checked_mul(*weight)?;
        expected_base = expected_base.checked_add(weighted)?;
    }
    let scale = Fraction::new(total, expected_base)?.checked_mul(Fraction::from_ratio(rtp))?;
    base.iter()
        .map(|multiplier| {
            Fraction::from_int(multiplier.bps() as u128)
                .checked_mul(scale)?
                .to_bps()
                .map(Multiplier::from_bps)
        })
        .collect()
}

pub fn compile(base: &[Multiplier], rtp: Ratio) -> BetArray {
    match scaled(base, rtp) {
        Some(values) => BetArray::from_multipliers(values),
        None => {
            debug!(buckets = base.len(), "bucket table cannot be scaled");
            BetArray::zeroed(base.len())
        }
    }
}
