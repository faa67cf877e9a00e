#![doc = include_str!("../README.md")]

mod common;
pub mod propagation;
pub mod telemetry;

pub use common::*;
// Public re-export so downstream crates can access the tally via
// `emojivoto_core::tally`
pub use emojivoto_tally as tally;
