use super::{
    Multiplier, MAX_BET_ARRAY_LENGTH, MAX_BINOMIAL_TRIALS, MAX_BUCKET_RESOLUTION, MAX_GRID_SIZE,
    MIN_BUCKET_RESOLUTION,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};
use thiserror::Error;

/// One row of a fixed enumeration table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandRank {
    pub name: String,
    pub multiplier: Multiplier,
    /// Number of equiprobable outcome slots this rank occupies.
    pub weight: u32,
}

impl HandRank {
    pub fn new(name: &str, multiplier_bps: u64, weight: u32) -> Self {
        Self {
            name: name.to_string(),
            multiplier: Multiplier::from_bps(multiplier_bps),
            weight,
        }
    }
}

/// Probability family of a game's outcome space.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeShape {
    /// `outcome_count` equally likely outcomes split by a threshold.
    FixedThreshold { outcome_count: u32 },
    /// `n` fair coins, win on at least `k` of one face.
    BinomialCoins { max_trials: u8 },
    /// Reveal cells from a grid without hitting a trap.
    SequentialReveal { grid_size: u8 },
    /// Static paytable indexed by hit count.
    ///
    /// `pool_size` and `draw_count` only describe the draw for hit-count weights.
    DiscretePaytable {
        max_selection: u8,
        pool_size: u8,
        draw_count: u8,
    },
    /// Declared multiplier table; probabilities are implied by the weights.
    FixedEnumeration { hand_ranks: Vec<HandRank> },
    /// Near-continuous target multiplier over `resolution` slots.
    BucketedContinuous { resolution: u32 },
    /// `outcome_count` equally likely outcomes, win on any chosen subset.
    CoverageSet { outcome_count: u32 },
    /// A ball bouncing left or right through `n` rows lands in bucket `k` with
    /// probability `C(n, k) / 2^n`.
    ///
    /// Each table holds `n + 1` base multipliers; compiling rescales them so the
    /// binomially weighted return equals the target.
    BinomialBuckets {
        normal: Vec<Multiplier>,
        degen: Vec<Multiplier>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("{field} must be within {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("enumeration table is empty")]
    EmptyEnumeration,
    #[error("enumeration table has zero total weight")]
    ZeroWeight,
    #[error("{volatility} bucket table pays nothing")]
    ZeroBuckets { volatility: Volatility },
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ShapeError> {
    if value < min || value > max {
        return Err(ShapeError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl OutcomeShape {
    pub fn family(&self) -> &'static str {
        match self {
            OutcomeShape::FixedThreshold { .. } => "fixed_threshold",
            OutcomeShape::BinomialCoins { .. } => "binomial_coins",
            OutcomeShape::SequentialReveal { .. } => "sequential_reveal",
            OutcomeShape::DiscretePaytable { .. } => "discrete_paytable",
            OutcomeShape::FixedEnumeration { .. } => "fixed_enumeration",
            OutcomeShape::BucketedContinuous { .. } => "bucketed_continuous",
            OutcomeShape::CoverageSet { .. } => "coverage_set",
            OutcomeShape::BinomialBuckets { .. } => "binomial_buckets",
        }
    }

    /// Check the shape's own bounds. Called once when a registry is built.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            OutcomeShape::FixedThreshold { outcome_count } => {
                check_range(
                    "outcome_count",
                    *outcome_count as u64,
                    2,
                    MAX_BET_ARRAY_LENGTH as u64,
                )
            }
            OutcomeShape::BinomialCoins { max_trials } => {
                check_range("max_trials", *max_trials as u64, 1, MAX_BINOMIAL_TRIALS as u64)
            }
            OutcomeShape::SequentialReveal { grid_size } => {
                check_range("grid_size", *grid_size as u64, 2, MAX_GRID_SIZE as u64)
            }
            OutcomeShape::DiscretePaytable {
                max_selection,
                pool_size,
                draw_count,
            } => {
                check_range("pool_size", *pool_size as u64, 1, u8::MAX as u64)?;
                check_range("max_selection", *max_selection as u64, 1, *pool_size as u64)?;
                check_range("draw_count", *draw_count as u64, 1, *pool_size as u64)
            }
            OutcomeShape::FixedEnumeration { hand_ranks } => {
                if hand_ranks.is_empty() {
                    return Err(ShapeError::EmptyEnumeration);
                }
                let slots = enumeration_slots(hand_ranks);
                if slots == 0 {
                    return Err(ShapeError::ZeroWeight);
                }
                check_range("total weight", slots as u64, 1, MAX_BET_ARRAY_LENGTH as u64)
            }
            OutcomeShape::BucketedContinuous { resolution } => check_range(
                "resolution",
                *resolution as u64,
                MIN_BUCKET_RESOLUTION as u64,
                MAX_BUCKET_RESOLUTION as u64,
            ),
            OutcomeShape::CoverageSet { outcome_count } => check_range(
                "outcome_count",
                *outcome_count as u64,
                2,
                MAX_BET_ARRAY_LENGTH as u64,
            ),
            OutcomeShape::BinomialBuckets { .. } => {
                for volatility in [Volatility::Normal, Volatility::Degen] {
                    let table = self.bucket_table(volatility).unwrap_or_default();
                    check_range(
                        "bucket count",
                        table.len() as u64,
                        2,
                        MAX_BINOMIAL_TRIALS as u64 + 1,
                    )?;
                    if table.iter().all(Multiplier::is_zero) {
                        return Err(ShapeError::ZeroBuckets { volatility });
                    }
                }
                Ok(())
            }
        }
    }

    /// Base multipliers of a bucket shape for `volatility`.
    pub fn bucket_table(&self, volatility: Volatility) -> Option<&[Multiplier]> {
        match (self, volatility) {
            (OutcomeShape::BinomialBuckets { normal, .. }, Volatility::Normal) => Some(normal),
            (OutcomeShape::BinomialBuckets { degen, .. }, Volatility::Degen) => Some(degen),
            _ => None,
        }
    }

    /// Outcome cardinality the settlement layer expects for `params`.
    ///
    /// Returns `None` when `params` belong to a different family.
    pub fn outcome_count(&self, params: &GameParams) -> Option<usize> {
        match (self, params) {
            (OutcomeShape::FixedThreshold { outcome_count }, GameParams::Threshold { .. }) => {
                Some(*outcome_count as usize)
            }
            (OutcomeShape::BinomialCoins { .. }, GameParams::Coins { coin_count, .. }) => {
                Some(*coin_count as usize + 1)
            }
            (OutcomeShape::SequentialReveal { grid_size }, GameParams::Reveal { .. }) => {
                Some(*grid_size as usize + 1)
            }
            (
                OutcomeShape::DiscretePaytable { .. },
                GameParams::Selection { selection_count },
            ) => Some(*selection_count as usize + 1),
            (OutcomeShape::FixedEnumeration { hand_ranks }, GameParams::Enumeration) => {
                Some(enumeration_slots(hand_ranks))
            }
            (
                OutcomeShape::BucketedContinuous { resolution },
                GameParams::TargetMultiplier { .. },
            ) => Some(*resolution as usize),
            (OutcomeShape::CoverageSet { outcome_count }, GameParams::Coverage { .. }) => {
                Some(*outcome_count as usize)
            }
            (OutcomeShape::BinomialBuckets { .. }, GameParams::Buckets { volatility }) => {
                self.bucket_table(*volatility).map(<[Multiplier]>::len)
            }
            _ => None,
        }
    }
}

/// Total slot count of an enumeration table.
pub fn enumeration_slots(hand_ranks: &[HandRank]) -> usize {
    hand_ranks.iter().map(|rank| rank.weight as usize).sum()
}

/// Which side of a threshold wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Indices `[0, threshold)` win.
    #[default]
    Under,
    /// Indices `[threshold, outcome_count)` win.
    Over,
}

/// Coin face a binomial bet is placed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinFace {
    #[default]
    Heads,
    Tails,
}

/// Which bucket table a drop is priced against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    #[default]
    Normal,
    Degen,
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volatility::Normal => f.write_str("normal"),
            Volatility::Degen => f.write_str("degen"),
        }
    }
}

/// Per-call parameters, one variant per outcome family.
///
/// Outcome index conventions: a threshold index is the rolled value, a coin
/// index is the number of heads, a reveal index is the number of safe cells
/// revealed, a paytable index is the hit count, a coverage index is the pocket
/// and a bucket index is the number of rightward bounces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameParams {
    Threshold {
        threshold: u32,
        #[serde(default)]
        direction: Direction,
    },
    Coins {
        coin_count: u8,
        at_least: u8,
        #[serde(default)]
        face: CoinFace,
    },
    Reveal {
        mine_count: u8,
        revealed_safe: u8,
    },
    Selection {
        selection_count: u8,
    },
    Enumeration,
    TargetMultiplier {
        target: Multiplier,
    },
    /// Pockets the wager covers.
    Coverage {
        pockets: BTreeSet<u32>,
    },
    Buckets {
        #[serde(default)]
        volatility: Volatility,
    },
}

impl GameParams {
    pub fn family(&self) -> &'static str {
        match self {
            GameParams::Threshold { .. } => "fixed_threshold",
            GameParams::Coins { .. } => "binomial_coins",
            GameParams::Reveal { .. } => "sequential_reveal",
            GameParams::Selection { .. } => "discrete_paytable",
            GameParams::Enumeration => "fixed_enumeration",
            GameParams::TargetMultiplier { .. } => "bucketed_continuous",
            GameParams::Coverage { .. } => "coverage_set",
            GameParams::Buckets { .. } => "binomial_buckets",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_count_per_family() {
        let dice = OutcomeShape::FixedThreshold { outcome_count: 100 };
        let params = GameParams::Threshold {
            threshold: 50,
            direction: Direction::Under,
        };
        assert_eq!(dice.outcome_count(&params), Some(100));

        let flip = OutcomeShape::BinomialCoins { max_trials: 10 };
        let params = GameParams::Coins {
            coin_count: 4,
            at_least: 2,
            face: CoinFace::Heads,
        };
        assert_eq!(flip.outcome_count(&params), Some(5));

        let mines = OutcomeShape::SequentialReveal { grid_size: 25 };
        let params = GameParams::Reveal {
            mine_count: 3,
            revealed_safe: 5,
        };
        assert_eq!(mines.outcome_count(&params), Some(26));

        let keno = OutcomeShape::DiscretePaytable {
            max_selection: 10,
            pool_size: 40,
            draw_count: 10,
        };
        assert_eq!(
            keno.outcome_count(&GameParams::Selection { selection_count: 0 }),
            Some(1)
        );

        let table = OutcomeShape::FixedEnumeration {
            hand_ranks: vec![HandRank::new("win", 20_000, 3), HandRank::new("lose", 0, 7)],
        };
        assert_eq!(table.outcome_count(&GameParams::Enumeration), Some(10));

        let limbo = OutcomeShape::BucketedContinuous { resolution: 10_000 };
        let params = GameParams::TargetMultiplier {
            target: Multiplier::from_bps(20_000),
        };
        assert_eq!(limbo.outcome_count(&params), Some(10_000));

        let roulette = OutcomeShape::CoverageSet { outcome_count: 37 };
        let params = GameParams::Coverage {
            pockets: BTreeSet::from([0, 36]),
        };
        assert_eq!(roulette.outcome_count(&params), Some(37));

        let plinko = OutcomeShape::BinomialBuckets {
            normal: vec![Multiplier::from_bps(20_000); 9],
            degen: vec![Multiplier::from_bps(30_000); 11],
        };
        let params = GameParams::Buckets {
            volatility: Volatility::Degen,
        };
        assert_eq!(plinko.outcome_count(&params), Some(11));
    }

    #[test]
    fn test_outcome_count_rejects_foreign_params() {
        let dice = OutcomeShape::FixedThreshold { outcome_count: 100 };
        assert_eq!(dice.outcome_count(&GameParams::Enumeration), None);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(OutcomeShape::FixedThreshold { outcome_count: 1 }.validate().is_err());
        assert!(OutcomeShape::FixedThreshold {
            outcome_count: u32::MAX
        }
        .validate()
        .is_err());
        assert!(OutcomeShape::BinomialCoins { max_trials: 0 }.validate().is_err());
        assert!(OutcomeShape::BinomialCoins { max_trials: 65 }.validate().is_err());
        assert!(OutcomeShape::SequentialReveal { grid_size: 33 }.validate().is_err());
        assert!(OutcomeShape::DiscretePaytable {
            max_selection: 41,
            pool_size: 40,
            draw_count: 10
        }
        .validate()
        .is_err());
        assert_eq!(
            OutcomeShape::FixedEnumeration { hand_ranks: vec![] }.validate(),
            Err(ShapeError::EmptyEnumeration)
        );
        assert_eq!(
            OutcomeShape::FixedEnumeration {
                hand_ranks: vec![HandRank::new("bust", 0, 0)]
            }
            .validate(),
            Err(ShapeError::ZeroWeight)
        );
        assert!(OutcomeShape::BucketedContinuous { resolution: 99 }.validate().is_err());
        assert!(OutcomeShape::BucketedContinuous { resolution: 1_000 }.validate().is_ok());
        assert!(OutcomeShape::CoverageSet { outcome_count: 1 }.validate().is_err());

        let buckets = |normal: Vec<u64>, degen: Vec<u64>| OutcomeShape::BinomialBuckets {
            normal: normal.into_iter().map(Multiplier::from_bps).collect(),
            degen: degen.into_iter().map(Multiplier::from_bps).collect(),
        };
        assert!(buckets(vec![1, 2], vec![1, 2, 3]).validate().is_ok());
        assert!(buckets(vec![1], vec![1, 2, 3]).validate().is_err());
        assert!(buckets(vec![1; 66], vec![1, 2]).validate().is_err());
        assert_eq!(
            buckets(vec![1, 2], vec![0, 0, 0]).validate(),
            Err(ShapeError::ZeroBuckets {
                volatility: Volatility::Degen
            })
        );
    }

    #[test]
    fn test_params_json() {
        let params: GameParams =
            serde_json::from_str(r#"{"type":"coins","coin_count":4,"at_least":2}"#).unwrap();
        assert_eq!(
            params,
            GameParams::Coins {
                coin_count: 4,
                at_least: 2,
                face: CoinFace::Heads
            }
        );

        let params: GameParams =
            serde_json::from_str(r#"{"type":"target_multiplier","target":25000}"#).unwrap();
        assert_eq!(
            params,
            GameParams::TargetMultiplier {
                target: Multiplier::from_bps(25_000)
            }
        );

        let params: GameParams =
            serde_json::from_str(r#"{"type":"coverage","pockets":[3,1,3]}"#).unwrap();
        assert_eq!(
            params,
            GameParams::Coverage {
                pockets: BTreeSet::from([1, 3])
            }
        );

        let params: GameParams = serde_json::from_str(r#"{"type":"buckets"}"#).unwrap();
        assert_eq!(
            params,
            GameParams::Buckets {
                volatility: Volatility::Normal
            }
        );
    }
}
