//! Fault injection around a [`Tally`](crate::Tally).
//!
//! [`FaultInjector`] simulates an unreliable backend so callers can exercise
//! timeouts, retries and circuit breaking. Every call first draws from an
//! injected [`RandSource`](crate::RandSource); below the configured failure
//! rate it fails before touching the store, otherwise it waits for the fixed
//! artificial delay and delegates.

mod config;
mod injector;

pub use config::*;
pub use injector::*;
