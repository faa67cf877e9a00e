use crate::{Result, ResultEntry, Tally, rank};
use parking_lot::Mutex;
use std::collections::HashMap;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A lock-based tally suitable for multi-threaded servers.
///
/// All counters live in one map behind a single [`Mutex`]. The lock is held
/// only for the increment or for copying the map, never across an await point
/// or the ranking sort.
///
/// ## Features
/// - ✅ No lost updates under concurrent increments
/// - ✅ `results` is a copy taken atomically under the lock
///
/// ## Recommended When
/// - A single process owns the tally
/// - The number of distinct choices is small relative to the vote rate
#[derive(Debug, Default)]
pub struct LockTally {
    counts: Mutex<HashMap<String, u64>>,
}

impl LockTally {
    /// Creates an empty tally.
    ///
    /// # Example
    /// ```
    /// use emojivoto_tally::{LockTally, Tally};
    ///
    /// let tally = LockTally::new();
    /// assert!(tally.results().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of votes recorded so far.
    pub fn total_votes(&self) -> u64 {
        self.counts.lock().values().sum()
    }

    /// Number of distinct choices that have received at least one vote.
    pub fn len(&self) -> usize {
        self.counts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.lock().is_empty()
    }
}

impl Tally for LockTally {
    /// Increments the counter for `choice`.
    ///
    /// # Example
    /// ```
    /// use emojivoto_tally::{LockTally, Tally};
    ///
    /// let tally = LockTally::new();
    /// tally.record_vote(":doughnut:").unwrap();
    /// tally.record_vote(":doughnut:").unwrap();
    /// assert_eq!(tally.results()[0].count, 2);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn record_vote(&self, choice: &str) -> Result<()> {
        let mut counts = self.counts.lock();
        match counts.get_mut(choice) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                counts.insert(choice.to_owned(), 1);
            }
        }
        Ok(())
    }

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn results(&self) -> Vec<ResultEntry> {
        let snapshot: Vec<(String, u64)> = {
            let counts = self.counts.lock();
            counts.iter().map(|(c, n)| (c.clone(), *n)).collect()
        };
        rank(snapshot)
    }
}
