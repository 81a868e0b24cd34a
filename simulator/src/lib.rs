//! Operator tooling around the bet-array compiler.
//!
//! Loads a YAML config, builds the registry it describes, and provides the
//! audit grid and seeded Monte-Carlo runs used by the `edgeline` binary.

use edgeline_execution::casino::{
    audit_registry, compile, enumeration, outcome_weights, AuditCase, CompileError, RtpReport,
    ValidationError, Validator,
};
use edgeline_types::casino::{
    BetArray, CoinFace, Direction, GameKey, GameParams, Multiplier, OutcomeShape, Ratio,
    RatioError, Registry, RouletteBet, Volatility, DEFAULT_RTP_TOLERANCE,
};
use rand::{
    distributions::{Distribution, WeightedError, WeightedIndex},
    Rng, SeedableRng,
};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};
use thiserror::Error;
use tracing::{debug, Level};

/// Configuration for the `edgeline` binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Target RTP overrides keyed by game name.
    #[serde(default)]
    pub rtp_overrides: BTreeMap<GameKey, f64>,
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("tolerance must be within [0, 1] (got {value})")]
    InvalidTolerance { value: f64 },
    #[error("invalid rtp override for {game}")]
    InvalidRtp {
        game: GameKey,
        #[source]
        source: RatioError,
    },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: usize },
}

pub struct ValidatedConfig {
    pub log_level: Level,
    pub validator: Validator,
    pub registry: Registry,
    pub rounds: usize,
    pub seed: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tolerance() -> f64 {
    DEFAULT_RTP_TOLERANCE
}

fn default_rounds() -> usize {
    100_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tolerance: default_tolerance(),
            rtp_overrides: BTreeMap::new(),
            rounds: default_rounds(),
            seed: 0,
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(ConfigError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if self.rounds == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "rounds",
                value: self.rounds,
            });
        }

        let mut overrides = BTreeMap::new();
        for (game, rtp) in &self.rtp_overrides {
            let rtp = Ratio::from_f64(*rtp)
                .map_err(|source| ConfigError::InvalidRtp { game: *game, source })?;
            overrides.insert(*game, rtp);
        }
        let registry = Registry::standard().with_rtp_overrides(&overrides);

        Ok(ValidatedConfig {
            log_level,
            validator: Validator::with_tolerance(self.tolerance),
            registry,
            rounds: self.rounds,
            seed: self.seed,
        })
    }
}

/// Representative parameters for every game in `registry`.
pub fn audit_grid(registry: &Registry) -> Vec<(GameKey, GameParams)> {
    let mut cases = Vec::new();
    for profile in registry.iter() {
        let key = profile.key;
        match &profile.shape {
            OutcomeShape::FixedThreshold { outcome_count } => {
                let step = (*outcome_count / 20).max(1) as usize;
                for threshold in (1..*outcome_count).step_by(step) {
                    for direction in [Direction::Under, Direction::Over] {
                        cases.push((
                            key,
                            GameParams::Threshold {
                                threshold,
                                direction,
                            },
                        ));
                    }
                }
            }
            OutcomeShape::BinomialCoins { max_trials } => {
                for coin_count in 1..=*max_trials {
                    for at_least in 1..=coin_count {
                        for face in [CoinFace::Heads, CoinFace::Tails] {
                            cases.push((
                                key,
                                GameParams::Coins {
                                    coin_count,
                                    at_least,
                                    face,
                                },
                            ));
                        }
                    }
                }
            }
            OutcomeShape::SequentialReveal { grid_size } => {
                let mut mine_counts = vec![1, 3, 5, 10, grid_size.saturating_sub(1)];
                mine_counts.retain(|mines| *mines >= 1 && mines < grid_size);
                mine_counts.dedup();
                for mine_count in mine_counts {
                    for revealed_safe in 0..=grid_size - mine_count {
                        cases.push((
                            key,
                            GameParams::Reveal {
                                mine_count,
                                revealed_safe,
                            },
                        ));
                    }
                }
            }
            OutcomeShape::DiscretePaytable { max_selection, .. } => {
                for selection_count in 1..=*max_selection {
                    cases.push((key, GameParams::Selection { selection_count }));
                }
            }
            OutcomeShape::FixedEnumeration { .. } => {
                cases.push((key, GameParams::Enumeration));
            }
            OutcomeShape::BucketedContinuous { resolution } => {
                let max = *resolution as u64 * 100;
                for target in [
                    10_100, 12_500, 15_000, 20_000, 30_000, 50_000, 100_000, 250_000, 1_000_000,
                ] {
                    if target <= max {
                        cases.push((
                            key,
                            GameParams::TargetMultiplier {
                                target: Multiplier::from_bps(target),
                            },
                        ));
                    }
                }
            }
            OutcomeShape::CoverageSet { outcome_count } => {
                let mut wagers: Vec<BTreeSet<u32>> = RouletteBet::OUTSIDE
                    .iter()
                    .map(RouletteBet::pockets)
                    .collect();
                // Inside bets counted up from pocket 1.
                for covered in [1, 2, 3, 4, 6] {
                    wagers.push((1..=covered).collect());
                }
                wagers.push(BTreeSet::from([0]));
                for pockets in wagers {
                    if pockets.iter().all(|pocket| pocket < outcome_count) {
                        cases.push((key, GameParams::Coverage { pockets }));
                    }
                }
            }
            OutcomeShape::BinomialBuckets { .. } => {
                for volatility in [Volatility::Normal, Volatility::Degen] {
                    cases.push((key, GameParams::Buckets { volatility }));
                }
            }
        }
    }
    cases
}

/// Totals over an audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub cases: usize,
    pub within_tolerance: usize,
    pub drifted: usize,
    pub errors: usize,
}

impl AuditSummary {
    pub fn from_cases(cases: &[AuditCase]) -> Self {
        let mut summary = AuditSummary {
            cases: cases.len(),
            ..Default::default()
        };
        for case in cases {
            match &case.result {
                Ok(report) if report.within_tolerance => summary.within_tolerance += 1,
                Ok(_) => summary.drifted += 1,
                Err(_) => summary.errors += 1,
            }
        }
        summary
    }
}

/// Audit the full grid for `registry`, optionally restricted to one game.
pub fn run_audit(
    registry: &Registry,
    validator: &Validator,
    game: Option<GameKey>,
) -> (Vec<AuditCase>, AuditSummary) {
    let mut cases = audit_grid(registry);
    if let Some(game) = game {
        cases.retain(|(key, _)| *key == game);
    }
    let audited = audit_registry(registry, validator, &cases);
    let summary = AuditSummary::from_cases(&audited);
    (audited, summary)
}

/// What `edgeline compile` prints.
#[derive(Debug, Clone, Serialize)]
pub struct CompileOutput {
    pub game: GameKey,
    pub target_rtp: f64,
    pub realized_rtp: f64,
    pub weighted: bool,
    pub win_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranks: Option<Vec<enumeration::RankEntry>>,
    pub bet: BetArray,
}

pub fn compile_output(
    registry: &Registry,
    validator: &Validator,
    game: GameKey,
    params: &GameParams,
) -> Result<CompileOutput, ValidationError> {
    let profile = registry.get(game);
    let bet = compile(profile, params)?;
    let RtpReport {
        target,
        realized,
        win_rate,
        weighted,
        ..
    } = validator.audit_bet(registry, game, params, &bet)?;
    let ranks = match &profile.shape {
        OutcomeShape::FixedEnumeration { hand_ranks } => Some(enumeration::rank_table(hand_ranks)),
        _ => None,
    };
    Ok(CompileOutput {
        game,
        target_rtp: target,
        realized_rtp: realized,
        weighted,
        win_rate,
        ranks,
        bet,
    })
}

#[derive(Debug, Error)]
pub enum SimulateError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("outcome weights unusable: {0}")]
    Weights(#[from] WeightedError),
}

/// Result of a seeded Monte-Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub game: GameKey,
    pub rounds: usize,
    /// Total staked, in smallest units.
    pub wagered: u128,
    pub returned: u128,
    pub wins: usize,
    pub target_rtp: f64,
    pub empirical_rtp: f64,
}

/// Stake used per simulated round.
const SIMULATION_WAGER: u64 = 1_000_000;

/// Play `rounds` seeded rounds against the compiled bet array.
///
/// Indices are drawn with the game's intrinsic outcome weights when it has
/// them and uniformly otherwise.
pub fn simulate(
    registry: &Registry,
    game: GameKey,
    params: &GameParams,
    rounds: usize,
    seed: u64,
) -> Result<Simulation, SimulateError> {
    let profile = registry.get(game);
    let bet = compile(profile, params)?;
    let weights = outcome_weights(profile, params)
        .map(WeightedIndex::new)
        .transpose()?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let mut returned: u128 = 0;
    let mut wins = 0;
    for _ in 0..rounds {
        let index = match &weights {
            Some(weights) => weights.sample(&mut rng),
            None => rng.gen_range(0..bet.len()),
        };
        let payout = bet.payout(index, SIMULATION_WAGER).unwrap_or(0);
        if payout > 0 {
            wins += 1;
        }
        returned += payout as u128;
    }
    let wagered = rounds as u128 * SIMULATION_WAGER as u128;
    let empirical_rtp = if wagered == 0 {
        0.0
    } else {
        returned as f64 / wagered as f64
    };
    debug!(%game, rounds, empirical_rtp, "simulation complete");

    Ok(Simulation {
        game,
        rounds,
        wagered,
        returned,
        wins,
        target_rtp: profile.target_rtp.as_f64(),
        empirical_rtp,
    })
}
