//! Static hit-count paytables (keno).
//!
//! Base tables are indexed by hit count and scaled once by the target RTP.
//! Selections without a table resolve to [`PaytableLookup::Unsupported`] and
//! compile to a guaranteed loss.

use crate::fixed::{div_round_half_even, Fraction};
use edgeline_types::casino::{BetArray, Multiplier, Ratio};
use tracing::debug;

/// Base multipliers in basis points, one table per selection count `1..=10`.
const KENO_BASE_TABLES: [&[u64]; 10] = [
    &[0, 30_000],
    &[0, 10_000, 90_000],
    &[0, 10_000, 20_000, 160_000],
    &[0, 5_000, 20_000, 60_000, 250_000],
    &[0, 5_000, 10_000, 30_000, 150_000, 500_000],
    &[0, 5_000, 10_000, 20_000, 30_000, 300_000, 750_000],
    &[0, 5_000, 5_000, 10_000, 60_000, 120_000, 360_000, 1_000_000],
    &[0, 5_000, 5_000, 10_000, 20_000, 40_000, 200_000, 800_000, 5_000_000],
    &[
        0, 5_000, 5_000, 10_000, 10_000, 50_000, 100_000, 500_000, 2_000_000, 10_000_000,
    ],
    &[
        0, 0, 5_000, 10_000, 20_000, 50_000, 150_000, 400_000, 1_000_000, 2_500_000, 18_000_000,
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaytableLookup {
    /// Base table of length `selection_count + 1`.
    Defined(&'static [u64]),
    Unsupported,
}

pub fn lookup(max_selection: u8, selection_count: u8) -> PaytableLookup {
    if selection_count == 0 || selection_count > max_selection {
        return PaytableLookup::Unsupported;
    }
    match KENO_BASE_TABLES.get(selection_count as usize - 1) {
        Some(table) => PaytableLookup::Defined(*table),
        None => PaytableLookup::Unsupported,
    }
}

pub fn compile(max_selection: u8, selection_count: u8, rtp: Ratio) -> BetArray {
    let len = selection_count as usize + 1;
    let table = match lookup(max_selection, selection_count) {
        PaytableLookup::Defined(table) => table,
        PaytableLookup::Unsupported => {
            debug!(selection_count, max_selection, "no paytable for selection");
            return BetArray::zeroed(len);
        }
    };

    let scale = Fraction::from_ratio(rtp);
    let mut values = Vec::with_capacity(len);
    for base in table {
        let scaled = (*base as u128).checked_mul(scale.numerator());
        let Some(bps) = scaled.and_then(|scaled| div_round_half_even(scaled, scale.denominator()))
        else {
            debug!(selection_count, "paytable overflow");
            return BetArray::zeroed(len);
        };
        values.push(Multiplier::from_bps(u64::try_from(bps).unwrap_or(u64::MAX)));
    }
    BetArray::from_multipliers(values)
}
