//! Named European roulette wagers over pockets `0..=36`.
//!
//! Every wager resolves to the set of pockets it covers; the coverage
//! compiler prices any set, so inside bets (split, street, corner, six line)
//! are passed as explicit pockets.

use super::{GameParams, ROULETTE_POCKETS};
use std::collections::BTreeSet;

pub const RED_POCKETS: [u32; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouletteBet {
    Straight(u32),
    Red,
    Black,
    Odd,
    Even,
    /// 1 to 18.
    Low,
    /// 19 to 36.
    High,
    /// 1, 2 or 3.
    Dozen(u32),
    /// 1, 2 or 3.
    Column(u32),
}

impl RouletteBet {
    /// Every even-money and two-to-one wager.
    pub const OUTSIDE: [RouletteBet; 12] = [
        RouletteBet::Red,
        RouletteBet::Black,
        RouletteBet::Odd,
        RouletteBet::Even,
        RouletteBet::Low,
        RouletteBet::High,
        RouletteBet::Dozen(1),
        RouletteBet::Dozen(2),
        RouletteBet::Dozen(3),
        RouletteBet::Column(1),
        RouletteBet::Column(2),
        RouletteBet::Column(3),
    ];

    /// Covered pockets. Empty when the number, dozen or column does not exist.
    pub fn pockets(&self) -> BTreeSet<u32> {
        let numbered = 1..ROULETTE_POCKETS;
        match *self {
            RouletteBet::Straight(pocket) if pocket < ROULETTE_POCKETS => BTreeSet::from([pocket]),
            RouletteBet::Straight(_) => BTreeSet::new(),
            RouletteBet::Red => RED_POCKETS.into_iter().collect(),
            RouletteBet::Black => numbered
                .filter(|pocket| !RED_POCKETS.contains(pocket))
                .collect(),
            RouletteBet::Odd => numbered.filter(|pocket| pocket % 2 == 1).collect(),
            RouletteBet::Even => numbered.filter(|pocket| pocket % 2 == 0).collect(),
            RouletteBet::Low => (1..=18).collect(),
            RouletteBet::High => (19..=36).collect(),
            RouletteBet::Dozen(dozen @ 1..=3) => {
                let first = (dozen - 1) * 12 + 1;
                (first..first + 12).collect()
            }
            RouletteBet::Column(column @ 1..=3) => (column..=36).step_by(3).collect(),
            RouletteBet::Dozen(_) | RouletteBet::Column(_) => BTreeSet::new(),
        }
    }

    pub fn params(&self) -> GameParams {
        GameParams::Coverage {
            pockets: self.pockets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_bets_cover_expected_counts() {
        for bet in RouletteBet::OUTSIDE {
            let pockets = bet.pockets();
            let expected = match bet {
                RouletteBet::Dozen(_) | RouletteBet::Column(_) => 12,
                _ => 18,
            };
            assert_eq!(pockets.len(), expected, "{bet:?}");
            assert!(!pockets.contains(&0), "{bet:?} covers zero");
            assert!(pockets.iter().all(|pocket| *pocket <= 36));
        }
    }

    #[test]
    fn test_colors_partition_numbers() {
        let red = RouletteBet::Red.pockets();
        let black = RouletteBet::Black.pockets();
        assert!(red.is_disjoint(&black));
        assert_eq!(red.union(&black).count(), 36);
        assert!(black.contains(&2) && black.contains(&35));
    }

    #[test]
    fn test_dozens_and_columns() {
        assert_eq!(RouletteBet::Dozen(3).pockets().first(), Some(&25));
        assert_eq!(RouletteBet::Dozen(3).pockets().last(), Some(&36));
        assert_eq!(RouletteBet::Column(1).pockets().last(), Some(&34));
        assert_eq!(RouletteBet::Column(3).pockets().first(), Some(&3));
    }

    #[test]
    fn test_invalid_bets_cover_nothing() {
        assert!(RouletteBet::Straight(37).pockets().is_empty());
        assert!(RouletteBet::Dozen(0).pockets().is_empty());
        assert!(RouletteBet::Column(4).pockets().is_empty());
        assert_eq!(
            RouletteBet::Straight(0).params(),
            GameParams::Coverage {
                pockets: BTreeSet::from([0])
            }
        );
    }
}
