//! The immutable game profile table.
//!
//! A [`Registry`] always holds exactly one profile per [`GameKey`]. It is built
//! once and shared by reference; changing a target RTP produces a new registry.

use super::{
    GameKey, HandRank, Multiplier, OutcomeShape, Ratio, ShapeError, CRASH_RESOLUTION,
    DICE_OUTCOMES, FLIP_MAX_COINS, HILO_RANKS, KENO_DRAW_COUNT, KENO_MAX_SELECTION,
    KENO_POOL_SIZE, LIMBO_RESOLUTION, MAGIC8BALL_OUTCOMES, MINES_GRID_SIZE, ROULETTE_POCKETS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Target RTP and outcome shape of a single game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameProfile {
    pub key: GameKey,
    pub target_rtp: Ratio,
    pub shape: OutcomeShape,
}

impl GameProfile {
    pub fn new(key: GameKey, target_rtp: Ratio, shape: OutcomeShape) -> Self {
        Self {
            key,
            target_rtp,
            shape,
        }
    }
}

/// Plinko base curve over 8 rows: `1 + (|k - 4| + 0.2)^1.8`.
const PLINKO_NORMAL_BASE: [u64; 9] = [
    142_388, 91_147, 51_339, 23_884, 10_552, 23_884, 51_339, 91_147, 142_388,
];

/// Plinko base curve over 10 rows: `1 + (|k - 5| + 0.4)^2.2`, far right bucket boosted 2.5x.
const PLINKO_DEGEN_BASE: [u64; 11] = [
    418_570, 270_373, 157_657, 78_622, 30_964, 11_332, 30_964, 78_622, 157_657, 270_373,
    1_046_425,
];

fn multipliers(bps: &[u64]) -> Vec<Multiplier> {
    bps.iter().copied().map(Multiplier::from_bps).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate profile for {0}")]
    Duplicate(GameKey),
    #[error("missing profile for {0}")]
    Missing(GameKey),
    #[error("invalid shape for {key}: {source}")]
    InvalidShape {
        key: GameKey,
        #[source]
        source: ShapeError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    // Sorted by key, one entry per `GameKey::ALL` member.
    profiles: Vec<GameProfile>,
}

impl Registry {
    /// Build a registry from an explicit profile list.
    ///
    /// Every game must appear exactly once and every shape must be in bounds.
    pub fn new(mut profiles: Vec<GameProfile>) -> Result<Self, RegistryError> {
        profiles.sort_by_key(|profile| profile.key);
        for pair in profiles.windows(2) {
            if pair[0].key == pair[1].key {
                return Err(RegistryError::Duplicate(pair[0].key));
            }
        }
        for (index, key) in GameKey::ALL.into_iter().enumerate() {
            if profiles.get(index).map(|profile| profile.key) != Some(key) {
                return Err(RegistryError::Missing(key));
            }
        }
        for profile in &profiles {
            profile
                .shape
                .validate()
                .map_err(|source| RegistryError::InvalidShape {
                    key: profile.key,
                    source,
                })?;
        }
        Ok(Self { profiles })
    }

    /// The production profile table.
    pub fn standard() -> Self {
        let rtp = Ratio::from_bps_const;
        let profiles = vec![
            GameProfile::new(
                GameKey::Dice,
                rtp(9_500),
                OutcomeShape::FixedThreshold {
                    outcome_count: DICE_OUTCOMES,
                },
            ),
            GameProfile::new(
                GameKey::HiLo,
                rtp(9_500),
                OutcomeShape::FixedThreshold {
                    outcome_count: HILO_RANKS,
                },
            ),
            GameProfile::new(
                GameKey::Magic8Ball,
                rtp(9_500),
                OutcomeShape::FixedThreshold {
                    outcome_count: MAGIC8BALL_OUTCOMES,
                },
            ),
            GameProfile::new(
                GameKey::Flip,
                rtp(9_600),
                OutcomeShape::BinomialCoins {
                    max_trials: FLIP_MAX_COINS,
                },
            ),
            GameProfile::new(
                GameKey::Mines,
                rtp(9_600),
                OutcomeShape::SequentialReveal {
                    grid_size: MINES_GRID_SIZE,
                },
            ),
            GameProfile::new(
                GameKey::Keno,
                rtp(9_500),
                OutcomeShape::DiscretePaytable {
                    max_selection: KENO_MAX_SELECTION,
                    pool_size: KENO_POOL_SIZE,
                    draw_count: KENO_DRAW_COUNT,
                },
            ),
            GameProfile::new(
                GameKey::Limbo,
                rtp(9_500),
                OutcomeShape::BucketedContinuous {
                    resolution: LIMBO_RESOLUTION,
                },
            ),
            GameProfile::new(
                GameKey::Crash,
                rtp(9_600),
                OutcomeShape::BucketedContinuous {
                    resolution: CRASH_RESOLUTION,
                },
            ),
            GameProfile::new(
                GameKey::ProgressivePoker,
                rtp(9_600),
                OutcomeShape::FixedEnumeration {
                    hand_ranks: vec![
                        HandRank::new("Nothing", 0, 3_011),
                        HandRank::new("High Card", 0, 2_001),
                        HandRank::new("Low Pair", 0, 3_331),
                        HandRank::new("Jacks or Better", 36_959, 835),
                        HandRank::new("Two Pair", 55_438, 457),
                        HandRank::new("Three of a Kind", 73_917, 203),
                        HandRank::new("Straight", 110_876, 125),
                        HandRank::new("Flush or Better", 295_669, 37),
                    ],
                },
            ),
            GameProfile::new(
                GameKey::Blackjack,
                rtp(9_700),
                OutcomeShape::FixedEnumeration {
                    hand_ranks: vec![
                        HandRank::new("Win", 18_500, 42),
                        HandRank::new("Blackjack", 23_000, 5),
                        HandRank::new("Push", 10_000, 8),
                        HandRank::new("Lose", 0, 45),
                    ],
                },
            ),
            GameProfile::new(
                GameKey::Slots,
                rtp(9_400),
                OutcomeShape::FixedEnumeration {
                    hand_ranks: vec![
                        HandRank::new("Mythical", 1_759_000, 1),
                        HandRank::new("Legendary", 879_500, 1),
                        HandRank::new("Heart", 351_800, 2),
                        HandRank::new("Sol", 123_100, 5),
                        HandRank::new("Usdc", 52_800, 15),
                        HandRank::new("Jup", 26_400, 80),
                        HandRank::new("Bonk", 21_100, 120),
                        HandRank::new("Wojak", 0, 776),
                    ],
                },
            ),
            GameProfile::new(
                GameKey::Plinko,
                rtp(9_500),
                OutcomeShape::BinomialBuckets {
                    normal: multipliers(&PLINKO_NORMAL_BASE),
                    degen: multipliers(&PLINKO_DEGEN_BASE),
                },
            ),
            GameProfile::new(
                GameKey::Roulette,
                rtp(9_730),
                OutcomeShape::CoverageSet {
                    outcome_count: ROULETTE_POCKETS,
                },
            ),
        ];
        Self { profiles }
    }

    /// Profile for `key`. Always present by construction.
    pub fn get(&self, key: GameKey) -> &GameProfile {
        &self.profiles[key as usize]
    }

    pub fn profiles(&self) -> &[GameProfile] {
        &self.profiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameProfile> + '_ {
        self.profiles.iter()
    }

    /// A copy of this registry with some target RTPs replaced.
    pub fn with_rtp_overrides(&self, overrides: &BTreeMap<GameKey, Ratio>) -> Self {
        let mut profiles = self.profiles.clone();
        for profile in &mut profiles {
            if let Some(rtp) = overrides.get(&profile.key) {
                profile.target_rtp = *rtp;
            }
        }
        Self { profiles }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
