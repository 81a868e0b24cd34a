//! Realized RTP of a bet array and its comparison to the registry target.
//!
//! [`realized_rtp`] assumes every index is equally likely, which holds for
//! threshold, enumeration and bucketed arrays. Coins, reveals and keno hit
//! counts are not equiprobable; [`Validator::audit`] prices those with their
//! intrinsic weights instead.

use super::{compile, outcome_weights, CompileError};
use edgeline_types::casino::{
    BetArray, GameKey, GameParams, Registry, BPS_PER_WHOLE, DEFAULT_RTP_TOLERANCE,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("bet array has {actual} outcomes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("{weights} weights for {outcomes} outcomes")]
    WeightCount { weights: usize, outcomes: usize },
    #[error("weights must be finite, non-negative and not all zero")]
    InvalidWeights,
}

/// Expected payout per unit wager with every index equally likely.
///
/// Equal to `(nonzero / len) * (sum / nonzero)`; zero for an empty or all-zero array.
pub fn realized_rtp(bet: &BetArray) -> f64 {
    let winning = bet.winning_count();
    if winning == 0 {
        return 0.0;
    }
    let win_probability = winning as f64 / bet.len() as f64;
    let average_win = bet.total_bps() as f64 / winning as f64 / BPS_PER_WHOLE as f64;
    win_probability * average_win
}

/// Expected payout per unit wager under explicit outcome weights.
///
/// Weights are normalized, so they need not sum to one.
pub fn weighted_rtp(bet: &BetArray, weights: &[f64]) -> Result<f64, ValidationError> {
    if weights.len() != bet.len() {
        return Err(ValidationError::WeightCount {
            weights: weights.len(),
            outcomes: bet.len(),
        });
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ValidationError::InvalidWeights);
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(ValidationError::InvalidWeights);
    }
    let expected: f64 = bet
        .iter()
        .zip(weights)
        .map(|(multiplier, weight)| multiplier.as_f64() * weight)
        .sum();
    Ok(expected / total)
}

/// Share of indices that pay anything.
pub fn win_rate(bet: &BetArray) -> f64 {
    if bet.is_empty() {
        return 0.0;
    }
    bet.winning_count() as f64 / bet.len() as f64
}

pub fn check_cardinality(bet: &BetArray, expected: usize) -> Result<(), ValidationError> {
    if bet.len() != expected {
        warn!(expected, actual = bet.len(), "bet array cardinality guard failed");
        return Err(ValidationError::LengthMismatch {
            expected,
            actual: bet.len(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RtpReport {
    pub game: GameKey,
    pub target: f64,
    pub realized: f64,
    /// `realized - target`.
    pub deviation: f64,
    pub win_rate: f64,
    /// Whether `realized` used intrinsic outcome weights.
    pub weighted: bool,
    pub within_tolerance: bool,
}

impl fmt::Display for RtpReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} target={:.4} realized={:.4} deviation={:+.4} win_rate={:.4}{}{}",
            self.game.as_str(),
            self.target,
            self.realized,
            self.deviation,
            self.win_rate,
            if self.weighted { " weighted" } else { "" },
            if self.within_tolerance { "" } else { " DRIFT" },
        )
    }
}

/// Compares realized RTP to the registry target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validator {
    tolerance: f64,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_RTP_TOLERANCE,
        }
    }

    /// Absolute tolerance on `|realized - target|`.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether `bet` meets `key`'s target with every index equally likely.
    pub fn validate(&self, registry: &Registry, key: GameKey, bet: &BetArray) -> bool {
        self.report(registry, key, bet).within_tolerance
    }

    pub fn report(&self, registry: &Registry, key: GameKey, bet: &BetArray) -> RtpReport {
        self.build_report(registry, key, bet, realized_rtp(bet), false)
    }

    /// Compile `params`, check the length, and price the array with its intrinsic weights.
    pub fn audit(
        &self,
        registry: &Registry,
        key: GameKey,
        params: &GameParams,
    ) -> Result<RtpReport, ValidationError> {
        let bet = compile(registry.get(key), params)?;
        self.audit_bet(registry, key, params, &bet)
    }

    /// [`Validator::audit`] for an array already compiled from `params`.
    pub fn audit_bet(
        &self,
        registry: &Registry,
        key: GameKey,
        params: &GameParams,
        bet: &BetArray,
    ) -> Result<RtpReport, ValidationError> {
        let profile = registry.get(key);
        let expected = profile
            .shape
            .outcome_count(params)
            .ok_or(CompileError::ShapeMismatch {
                game: key,
                shape: profile.shape.family(),
                params: params.family(),
            })?;
        check_cardinality(bet, expected)?;

        match outcome_weights(profile, params) {
            Some(weights) => {
                let realized = weighted_rtp(bet, &weights)?;
                Ok(self.build_report(registry, key, bet, realized, true))
            }
            None => Ok(self.report(registry, key, bet)),
        }
    }

    fn build_report(
        &self,
        registry: &Registry,
        key: GameKey,
        bet: &BetArray,
        realized: f64,
        weighted: bool,
    ) -> RtpReport {
        let target = registry.get(key).target_rtp.as_f64();
        let deviation = realized - target;
        let within_tolerance = deviation.abs() <= self.tolerance;
        if !within_tolerance {
            warn!(
                game = %key,
                target,
                realized,
                tolerance = self.tolerance,
                "RTP drift beyond tolerance"
            );
        }
        RtpReport {
            game: key,
            target,
            realized,
            deviation,
            win_rate: win_rate(bet),
            weighted,
            within_tolerance,
        }
    }
}
