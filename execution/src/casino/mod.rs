//! Bet-array compilation.
//!
//! One compiler per outcome family:
//! - Uniform threshold (dice, hilo, magic 8 ball)
//! - Binomial at-least-K (flip)
//! - Sequential reveal (mines)
//! - Discrete paytable (keno)
//! - Fixed enumeration (progressive poker, blackjack, slots)
//! - Bucketed near-continuous (limbo, crash)
//! - Coverage set (roulette)
//! - Binomial buckets (plinko)
//!
//! [`compile`] dispatches on the profile's [`OutcomeShape`] and refuses to
//! return an array whose length differs from the outcome cardinality the
//! settlement layer expects.

pub mod binomial;
pub mod bucketed;
pub mod buckets;
pub mod combinatorics;
pub mod coverage;
pub mod enumeration;
pub mod paytable;
pub mod sequential;
pub mod threshold;
pub mod validator;

pub use validator::{RtpReport, ValidationError, Validator};

use edgeline_types::casino::{BetArray, GameKey, GameParams, GameProfile, OutcomeShape, Registry};
use thiserror::Error;
use tracing::warn;

/// Error during bet-array compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Parameters belong to a different outcome family than the game.
    #[error("{game}: {params} parameters do not fit a {shape} game")]
    ShapeMismatch {
        game: GameKey,
        shape: &'static str,
        params: &'static str,
    },
    /// Compiled length differs from the settlement layer's outcome count.
    #[error("{game}: compiled {actual} outcomes, settlement expects {expected}")]
    LengthMismatch {
        game: GameKey,
        expected: usize,
        actual: usize,
    },
}

/// Compile the bet array for `profile` under `params`.
///
/// Out-of-range parameter values are not errors: they produce an all-zero
/// array of the correct length.
pub fn compile(profile: &GameProfile, params: &GameParams) -> Result<BetArray, CompileError> {
    let mismatch = || CompileError::ShapeMismatch {
        game: profile.key,
        shape: profile.shape.family(),
        params: params.family(),
    };
    let rtp = profile.target_rtp;
    let bet = match (&profile.shape, params) {
        (
            OutcomeShape::FixedThreshold { outcome_count },
            GameParams::Threshold {
                threshold,
                direction,
            },
        ) => threshold::compile(*outcome_count, *threshold, *direction, rtp),
        (
            OutcomeShape::BinomialCoins { max_trials },
            GameParams::Coins {
                coin_count,
                at_least,
                face,
            },
        ) => binomial::compile(*max_trials, *coin_count, *at_least, *face, rtp),
        (
            OutcomeShape::SequentialReveal { grid_size },
            GameParams::Reveal {
                mine_count,
                revealed_safe,
            },
        ) => sequential::compile(*grid_size, *mine_count, *revealed_safe, rtp),
        (
            OutcomeShape::DiscretePaytable { max_selection, .. },
            GameParams::Selection { selection_count },
        ) => paytable::compile(*max_selection, *selection_count, rtp),
        (OutcomeShape::FixedEnumeration { hand_ranks }, GameParams::Enumeration) => {
            enumeration::compile(hand_ranks)
        }
        (
            OutcomeShape::BucketedContinuous { resolution },
            GameParams::TargetMultiplier { target },
        ) => bucketed::compile(*resolution, *target, rtp),
        (OutcomeShape::CoverageSet { outcome_count }, GameParams::Coverage { pockets }) => {
            coverage::compile(*outcome_count, pockets, rtp)
        }
        (OutcomeShape::BinomialBuckets { .. }, GameParams::Buckets { volatility }) => {
            let base = profile.shape.bucket_table(*volatility).ok_or_else(mismatch)?;
            buckets::compile(base, rtp)
        }
        _ => return Err(mismatch()),
    };

    let expected = profile.shape.outcome_count(params).ok_or_else(mismatch)?;
    if bet.len() != expected {
        warn!(
            game = %profile.key,
            expected,
            actual = bet.len(),
            "bet array length mismatch"
        );
        debug_assert_eq!(bet.len(), expected, "bet array length mismatch");
        return Err(CompileError::LengthMismatch {
            game: profile.key,
            expected,
            actual: bet.len(),
        });
    }
    Ok(bet)
}

/// Resolve `key` in `registry` and compile.
pub fn compile_game(
    registry: &Registry,
    key: GameKey,
    params: &GameParams,
) -> Result<BetArray, CompileError> {
    compile(registry.get(key), params)
}

/// Intrinsic probability of each outcome index, where indices are not equiprobable.
///
/// Coins follow the binomial distribution over the number of heads. A reveal
/// lands on `revealed_safe` when every reveal survives and on index 0 otherwise.
/// Keno hit counts follow the hypergeometric distribution of the draw, and a
/// plinko bucket the binomial distribution over its rows. Returns `None` for
/// equiprobable shapes and for mismatched parameters.
pub fn outcome_weights(profile: &GameProfile, params: &GameParams) -> Option<Vec<f64>> {
    match (&profile.shape, params) {
        (OutcomeShape::BinomialCoins { .. }, GameParams::Coins { coin_count, .. }) => {
            Some(fair_binomial_weights(*coin_count as u64))
        }
        (OutcomeShape::BinomialBuckets { .. }, GameParams::Buckets { volatility }) => {
            let buckets = profile.shape.bucket_table(*volatility)?.len() as u64;
            Some(fair_binomial_weights(buckets.checked_sub(1)?))
        }
        (
            OutcomeShape::SequentialReveal { grid_size },
            GameParams::Reveal {
                mine_count,
                revealed_safe,
            },
        ) => {
            let mut weights = vec![0.0; *grid_size as usize + 1];
            let survive = combinatorics::prob_sequential_without_replacement(
                *grid_size as u32,
                *mine_count as u32,
                *revealed_safe as u32,
            );
            weights[0] = 1.0 - survive;
            if let Some(weight) = weights.get_mut(*revealed_safe as usize) {
                *weight += survive;
            }
            Some(weights)
        }
        (
            OutcomeShape::DiscretePaytable {
                pool_size,
                draw_count,
                ..
            },
            GameParams::Selection { selection_count },
        ) => Some(
            (0..=*selection_count as u32)
                .map(|hits| {
                    combinatorics::prob_hypergeometric(
                        *pool_size as u32,
                        *selection_count as u32,
                        *draw_count as u32,
                        hits,
                    )
                })
                .collect(),
        ),
        _ => None,
    }
}

fn fair_binomial_weights(n: u64) -> Vec<f64> {
    (0..=n)
        .map(|k| combinatorics::prob_exact_binomial(n, k as i64, 0.5))
        .collect()
}

/// One audited `(game, params)` case.
#[derive(Debug)]
pub struct AuditCase {
    pub game: GameKey,
    pub params: GameParams,
    pub result: Result<RtpReport, ValidationError>,
}

/// Audit every case against `registry`.
///
/// With the `parallel` feature the cases are spread over the rayon pool. The
/// output order matches `cases` either way.
pub fn audit_registry(
    registry: &Registry,
    validator: &Validator,
    cases: &[(GameKey, GameParams)],
) -> Vec<AuditCase> {
    let audit = |(game, params): &(GameKey, GameParams)| AuditCase {
        game: *game,
        params: params.clone(),
        result: validator.audit(registry, *game, params),
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        cases.par_iter().map(audit).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        cases.iter().map(audit).collect()
    }
}
