//! Synthetic traffic generator voting through the gateway.
//!
//! The bot has a sweet tooth: it votes for [`FAVORITE`] with probability
//! [`FAVORITE_PROBABILITY`] and otherwise picks uniformly from whatever the
//! gateway lists.

pub mod client;
pub mod config;
pub mod picker;
#[cfg(test)]
mod tests;

pub use client::*;
pub use config::BotConfig;
pub use picker::*;

use emojivoto_core::tally::RandSource;
use tokio::time::{Instant, sleep};

/// Counts of what a [`run`] loop did before it stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub votes: u64,
    pub errors: u64,
}

/// Votes until the configured TTL passes, or forever without one.
///
/// Every iteration waits `1s / request_rate`, fetches the shortcode list and
/// casts one vote. Failures are logged and counted, never returned.
pub async fn run<R: RandSource<f64>>(
    config: &BotConfig,
    client: &VoteClient,
    rand: &R,
) -> RunStats {
    let deadline = config.ttl.map(|ttl| Instant::now() + ttl);
    let interval = config.interval();
    let mut stats = RunStats::default();

    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            tracing::info!(
                "Time to live of {:?} reached after {} votes, completing",
                config.ttl.unwrap_or_default(),
                stats.votes
            );
            return stats;
        }

        sleep(interval).await;

        let shortcodes = match client.shortcodes().await {
            Ok(shortcodes) => shortcodes,
            Err(e) => {
                tracing::warn!("Failed to list shortcodes: {e}");
                stats.errors += 1;
                continue;
            }
        };

        let Some(choice) = pick_choice(rand, &shortcodes) else {
            tracing::warn!("Gateway listed no shortcodes");
            stats.errors += 1;
            continue;
        };

        tracing::info!("Voting for {choice}");
        match client.vote(choice).await {
            Ok(()) => stats.votes += 1,
            Err(e) => {
                tracing::warn!("Vote for {choice} failed: {e}");
                stats.errors += 1;
            }
        }
    }
}
