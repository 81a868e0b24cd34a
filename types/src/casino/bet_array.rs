//! Bet arrays: the multiplier table handed to the settlement layer.
//!
//! Wire format (commonware-codec):
//! [length:varint] [multiplier_bps:u64 BE × length]
//!
//! Decoding takes the expected outcome count as its config and rejects any
//! other length, so a truncated or padded array can never reach settlement.

use super::{Multiplier, BPS_PER_WHOLE};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadRangeExt, Write};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Ordered multipliers indexed by outcome index.
///
/// Index `i` pays `wager * self[i]` when the external random index equals `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetArray(Vec<Multiplier>);

impl BetArray {
    /// A guaranteed-loss array of the given length.
    pub fn zeroed(len: usize) -> Self {
        BetArray(vec![Multiplier::ZERO; len])
    }

    /// An array where every index in `winning` pays `multiplier` and the rest pay nothing.
    ///
    /// `winning` is clamped to `0..len`.
    pub fn with_winning_range(len: usize, winning: Range<usize>, multiplier: Multiplier) -> Self {
        let mut values = vec![Multiplier::ZERO; len];
        let end = winning.end.min(len);
        let start = winning.start.min(end);
        values[start..end].fill(multiplier);
        BetArray(values)
    }

    pub fn from_multipliers(values: Vec<Multiplier>) -> Self {
        BetArray(values)
    }

    pub fn from_bps(values: impl IntoIterator<Item = u64>) -> Self {
        BetArray(values.into_iter().map(Multiplier::from_bps).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Multiplier> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Multiplier> + '_ {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Multiplier] {
        &self.0
    }

    /// The raw basis-point values, in the form the settlement program consumes.
    pub fn to_bps(&self) -> Vec<u64> {
        self.0.iter().map(Multiplier::bps).collect()
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(Multiplier::is_zero)
    }

    /// Number of indices with a non-zero payout.
    pub fn winning_count(&self) -> usize {
        self.0.iter().filter(|m| !m.is_zero()).count()
    }

    /// Sum of all multipliers in basis points.
    pub fn total_bps(&self) -> u128 {
        self.0.iter().map(|m| m.bps() as u128).sum()
    }

    /// Amount returned for `wager` if the random index lands on `index`.
    ///
    /// Rounds down to the smallest unit. Returns `None` for an out-of-range index
    /// or when the payout does not fit in a `u64`.
    pub fn payout(&self, index: usize, wager: u64) -> Option<u64> {
        let multiplier = self.get(index)?;
        let scaled = wager as u128 * multiplier.bps() as u128 / BPS_PER_WHOLE as u128;
        u64::try_from(scaled).ok()
    }
}

impl From<Vec<Multiplier>> for BetArray {
    fn from(values: Vec<Multiplier>) -> Self {
        BetArray(values)
    }
}

impl Write for BetArray {
    fn write(&self, writer: &mut impl BufMut) {
        self.to_bps().write(writer);
    }
}

impl Read for BetArray {
    /// Expected outcome count.
    type Cfg = usize;

    fn read_cfg(reader: &mut impl Buf, expected_len: &Self::Cfg) -> Result<Self, Error> {
        let expected_len = *expected_len;
        let values = Vec::<u64>::read_range(reader, expected_len..=expected_len)?;
        Ok(BetArray::from_bps(values))
    }
}

impl EncodeSize for BetArray {
    fn encode_size(&self) -> usize {
        self.to_bps().encode_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::{Decode, Encode};

    #[test]
    fn test_with_winning_range_clamps() {
        let bet = BetArray::with_winning_range(4, 2..10, Multiplier::from_bps(15_000));
        assert_eq!(bet.to_bps(), vec![0, 0, 15_000, 15_000]);

        let bet = BetArray::with_winning_range(3, 5..8, Multiplier::ONE);
        assert!(bet.is_all_zero());
        assert_eq!(bet.len(), 3);
    }

    #[test]
    fn test_payout_rounds_down() {
        let bet = BetArray::from_bps([0, 19_000, 13_964]);
        assert_eq!(bet.payout(0, 1_000), Some(0));
        assert_eq!(bet.payout(1, 1_000), Some(1_900));
        assert_eq!(bet.payout(2, 3), Some(4)); // 4.1892
        assert_eq!(bet.payout(3, 1_000), None);
    }

    #[test]
    fn test_payout_overflow_is_none() {
        let bet = BetArray::from_bps([10_000, 20_000]);
        assert_eq!(bet.payout(0, u64::MAX), Some(u64::MAX));
        assert_eq!(bet.payout(1, u64::MAX), None);
        assert_eq!(bet.payout(1, u64::MAX / 2), Some(u64::MAX - 1));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let bet = BetArray::from_bps([9_500, 0, 0]);
        let encoded = bet.encode();

        let decoded = BetArray::decode_cfg(encoded.as_ref(), &3).unwrap();
        assert_eq!(decoded, bet);

        assert!(BetArray::decode_cfg(encoded.as_ref(), &2).is_err());
        assert!(BetArray::decode_cfg(encoded.as_ref(), &4).is_err());
    }
}
