use super::BPS_PER_WHOLE;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RatioError {
    #[error("ratio must be finite (got {0})")]
    NotFinite(f64),
    #[error("ratio must be in (0, 1] (got {0})")]
    OutOfRange(f64),
    #[error("ratio must be within 1..={max} basis points (got {value})", max = BPS_PER_WHOLE)]
    OutOfRangeBps { value: u64 },
}

/// A fraction in `(0, 1]`, stored in basis points.
///
/// Used for target RTPs. `Ratio::ONE` is a zero-edge game.
///
/// Compiled multipliers are rounded half to even, so a realized return may
/// exceed its target by at most half a basis point (0.00005) per unit of win
/// probability. At `Ratio::ONE` that can leave the player a sub-basis-point
/// edge; targets below one absorb it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Ratio(u64);

impl Ratio {
    pub const ONE: Ratio = Ratio(BPS_PER_WHOLE);

    /// Caller guarantees `1..=BPS_PER_WHOLE`.
    pub(crate) const fn from_bps_const(bps: u64) -> Self {
        Ratio(bps)
    }

    pub fn from_bps(bps: u64) -> Result<Self, RatioError> {
        if bps == 0 || bps > BPS_PER_WHOLE {
            return Err(RatioError::OutOfRangeBps { value: bps });
        }
        Ok(Ratio(bps))
    }

    /// Round a decimal ratio to the nearest basis point.
    pub fn from_f64(value: f64) -> Result<Self, RatioError> {
        if !value.is_finite() {
            return Err(RatioError::NotFinite(value));
        }
        if value <= 0.0 || value > 1.0 {
            return Err(RatioError::OutOfRange(value));
        }
        let bps = (value * BPS_PER_WHOLE as f64).round() as u64;
        if bps == 0 {
            return Err(RatioError::OutOfRange(value));
        }
        Ok(Ratio(bps))
    }

    pub fn bps(&self) -> u64 {
        self.0
    }

    /// `1 - ratio`, in basis points.
    pub fn house_edge_bps(&self) -> u64 {
        BPS_PER_WHOLE - self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / BPS_PER_WHOLE as f64
    }
}

impl TryFrom<f64> for Ratio {
    type Error = RatioError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Ratio::from_f64(value)
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> Self {
        ratio.as_f64()
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// A non-negative payout multiplier in basis points (1.0x = 10_000).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Multiplier(u64);

impl Multiplier {
    pub const ZERO: Multiplier = Multiplier(0);
    pub const ONE: Multiplier = Multiplier(BPS_PER_WHOLE);

    pub const fn from_bps(bps: u64) -> Self {
        Multiplier(bps)
    }

    pub const fn bps(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / BPS_PER_WHOLE as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid multiplier: {0}")]
pub struct ParseMultiplierError(pub String);

impl FromStr for Multiplier {
    type Err = ParseMultiplierError;

    /// Accepts decimal notation with an optional trailing `x` (`"2.5"`, `"2.5x"`).
    /// At most four fractional digits are allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMultiplierError(s.to_string());
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix(['x', 'X']).unwrap_or(trimmed);
        let (whole, frac) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };
        if whole.is_empty() || frac.len() > 4 {
            return Err(err());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }
        let whole: u64 = whole.parse().map_err(|_| err())?;
        let mut frac_bps: u64 = 0;
        for (i, digit) in frac.bytes().enumerate() {
            frac_bps += (digit - b'0') as u64 * 10u64.pow(3 - i as u32);
        }
        whole
            .checked_mul(BPS_PER_WHOLE)
            .and_then(|bps| bps.checked_add(frac_bps))
            .map(Multiplier)
            .ok_or_else(err)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:04}x",
            self.0 / BPS_PER_WHOLE,
            self.0 % BPS_PER_WHOLE
        )
    }
}
