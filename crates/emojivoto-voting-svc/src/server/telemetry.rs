//! Vote tally metrics.
//!
//! With the `metrics` feature the handles below are registered on the shared
//! `emojivoto` meter. Without it every recording function compiles to a
//! no-op, so call sites stay unconditional.

#[cfg(feature = "metrics")]
use opentelemetry::metrics::{Counter, Histogram, Meter};
#[cfg(feature = "metrics")]
use std::sync::OnceLock;

pub use emojivoto_core::telemetry::{TelemetryProviders, init_telemetry};

// Metric handles - only compiled when metrics feature is enabled
#[cfg(feature = "metrics")]
static VOTES_CAST: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static INJECTED_FAILURES: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static REJECTED_VOTES: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static RESULTS_REQUESTS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static CALL_DURATION_MS: OnceLock<Histogram<f64>> = OnceLock::new();

/// Registers every handle on the global meter. Call after `init_telemetry`.
#[cfg(feature = "metrics")]
pub fn init_metric_handles() {
    register(emojivoto_core::telemetry::meter());
}

#[cfg(not(feature = "metrics"))]
pub fn init_metric_handles() {}

#[cfg(feature = "metrics")]
fn register(meter: Meter) {
    let _ = VOTES_CAST.set(
        meter
            .u64_counter("votes_cast")
            .with_description("Votes recorded in the tally")
            .build(),
    );

    let _ = INJECTED_FAILURES.set(
        meter
            .u64_counter("injected_failures")
            .with_description("Calls failed by the fault injection layer")
            .build(),
    );

    let _ = REJECTED_VOTES.set(
        meter
            .u64_counter("rejected_votes")
            .with_description("Votes rejected as invalid")
            .build(),
    );

    let _ = RESULTS_REQUESTS.set(
        meter
            .u64_counter("results_requests")
            .with_description("Results snapshots served")
            .build(),
    );

    let _ = CALL_DURATION_MS.set(
        meter
            .f64_histogram("call_duration")
            .with_unit("ms")
            .with_description("Handler duration including artificial delay")
            .build(),
    );
}

// Convenience functions that compile to no-ops when metrics are disabled
#[cfg(feature = "metrics")]
pub fn increment_votes_cast() {
    if let Some(counter) = VOTES_CAST.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_votes_cast() {}

#[cfg(feature = "metrics")]
pub fn increment_injected_failures() {
    if let Some(counter) = INJECTED_FAILURES.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_injected_failures() {}

#[cfg(feature = "metrics")]
pub fn increment_rejected_votes() {
    if let Some(counter) = REJECTED_VOTES.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_rejected_votes() {}

#[cfg(feature = "metrics")]
pub fn increment_results_requests() {
    if let Some(counter) = RESULTS_REQUESTS.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_results_requests() {}

#[cfg(feature = "metrics")]
pub fn record_call_duration(duration_ms: f64) {
    if let Some(histogram) = CALL_DURATION_MS.get() {
        histogram.record(duration_ms, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_call_duration(_duration_ms: f64) {}
