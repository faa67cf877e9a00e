//! gRPC service implementation for the vote tally.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`TallyService`).

pub mod handler;

use emojivoto_core::tally::{FaultInjector, Tally};
use std::sync::Arc;

/// The store behind the fault layer, type-erased so validation is a runtime
/// choice.
pub type SharedTally = Arc<dyn Tally>;

/// The production fault layer: thread-local RNG and Tokio's timer.
pub type FaultyTally = FaultInjector<SharedTally>;
