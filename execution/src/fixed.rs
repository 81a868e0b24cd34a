use edgeline_types::casino::{Multiplier, Ratio, BPS_PER_WHOLE};

/// Exact non-negative rational, always stored in lowest terms.
///
/// Probabilities and multipliers are carried as fractions until the final
/// conversion to basis points, which is the only place rounding happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: u128,
    den: u128,
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `numerator / denominator` rounded to the nearest integer, ties to even.
///
/// Returns `None` on a zero denominator.
pub fn div_round_half_even(numerator: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let upper = denominator - remainder;
    let rounded = if remainder > upper || (remainder == upper && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    Some(rounded)
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };
    pub const ONE: Fraction = Fraction { num: 1, den: 1 };

    /// Returns `None` for a zero denominator.
    pub fn new(numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator, denominator);
        Some(Fraction {
            num: numerator / divisor,
            den: denominator / divisor,
        })
    }

    pub fn from_int(value: u128) -> Self {
        Fraction { num: value, den: 1 }
    }

    /// A basis-point value as a fraction of one whole.
    pub fn from_bps(bps: u64) -> Self {
        let divisor = gcd(bps as u128, BPS_PER_WHOLE as u128);
        Fraction {
            num: bps as u128 / divisor,
            den: BPS_PER_WHOLE as u128 / divisor,
        }
    }

    pub fn from_ratio(ratio: Ratio) -> Self {
        Fraction::from_bps(ratio.bps())
    }

    pub fn numerator(self) -> u128 {
        self.num
    }

    pub fn denominator(self) -> u128 {
        self.den
    }

    pub fn is_zero(self) -> bool {
        self.num == 0
    }

    pub fn checked_mul(self, other: Self) -> Option<Self> {
        // Cross-reduce first so intermediate products stay small.
        let left = gcd(self.num, other.den).max(1);
        let right = gcd(other.num, self.den).max(1);
        let num = (self.num / left).checked_mul(other.num / right)?;
        let den = (self.den / right).checked_mul(other.den / left)?;
        Fraction::new(num, den)
    }

    /// Returns `None` when dividing by zero or on overflow.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        self.checked_mul(other.recip()?)
    }

    pub fn recip(self) -> Option<Self> {
        Fraction::new(self.den, self.num)
    }

    /// Round to basis points, ties to even.
    ///
    /// The result is off by at most half a basis point in either direction.
    pub fn to_bps(self) -> Option<u64> {
        let scaled = self.num.checked_mul(BPS_PER_WHOLE as u128)?;
        let bps = div_round_half_even(scaled, self.den)?;
        u64::try_from(bps).ok()
    }

    pub fn to_multiplier(self) -> Option<Multiplier> {
        self.to_bps().map(Multiplier::from_bps)
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reduces() {
        let f = Fraction::new(6, 8).unwrap();
        assert_eq!((f.numerator(), f.denominator()), (3, 4));

        let f = Fraction::new(0, 7).unwrap();
        assert_eq!((f.numerator(), f.denominator()), (0, 1));
        assert!(f.is_zero());

        assert_eq!(Fraction::new(1, 0), None);
    }

    #[test]
    fn test_from_bps() {
        let f = Fraction::from_bps(9_500);
        assert_eq!((f.numerator(), f.denominator()), (19, 20));
        assert_eq!(Fraction::from_bps(10_000), Fraction::ONE);
        assert_eq!(Fraction::from_bps(0), Fraction::ZERO);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(div_round_half_even(5, 2), Some(2)); // 2.5
        assert_eq!(div_round_half_even(7, 2), Some(4)); // 3.5
        assert_eq!(div_round_half_even(9, 4), Some(2)); // 2.25
        assert_eq!(div_round_half_even(11, 4), Some(3)); // 2.75
        assert_eq!(div_round_half_even(0, 3), Some(0));
        assert_eq!(div_round_half_even(1, 0), None);
    }

    #[test]
    fn test_to_bps() {
        // 0.96 * 16 / 11 = 1.39636...
        let f = Fraction::from_bps(9_600)
            .checked_mul(Fraction::new(16, 11).unwrap())
            .unwrap();
        assert_eq!(f.to_bps(), Some(13_964));

        // 0.00005 sits exactly between 0 and 1 bps.
        assert_eq!(Fraction::new(1, 20_000).unwrap().to_bps(), Some(0));
        assert_eq!(Fraction::new(3, 20_000).unwrap().to_bps(), Some(2));
    }

    #[test]
    fn test_arithmetic() {
        let half = Fraction::new(1, 2).unwrap();
        let third = Fraction::new(1, 3).unwrap();

        assert_eq!(half.checked_mul(third), Fraction::new(1, 6));
        assert_eq!(half.checked_div(third), Fraction::new(3, 2));
    }

    #[test]
    fn test_division_by_zero() {
        let a = Fraction::from_int(10);
        assert_eq!(a.checked_div(Fraction::ZERO), None);
        assert_eq!(Fraction::ZERO.recip(), None);
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = Fraction::from_int(u128::MAX);
        assert_eq!(big.checked_mul(Fraction::from_int(2)), None);
        assert_eq!(big.to_bps(), None);
    }
}
