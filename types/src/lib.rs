//! Value types shared by the edgeline compilers and their callers.
//!
//! Everything in this crate is immutable once built: game profiles live for the
//! lifetime of the process and bet arrays are plain values.

pub mod casino;
