//! Bet-array compilers and RTP validation.
//!
//! Every compiler is a pure function of a [`GameProfile`](edgeline_types::casino::GameProfile)
//! and its parameters. Probabilities are carried as exact fractions and
//! rounded to basis points once, half to even.

pub mod casino;
pub mod fixed;

pub use casino::{compile, compile_game, CompileError, RtpReport, ValidationError, Validator};
