use crate::Result;
use std::sync::Arc;

/// One row of a ranked results snapshot.
///
/// `share` is `count / total` across the whole snapshot, or `0.0` when no
/// votes have been recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultEntry {
    pub choice: String,
    pub count: u64,
    pub share: f64,
}

/// The capability set of a vote tally.
///
/// Implementations must be safe under concurrent `record_vote` for the same
/// or different choices without losing updates, and `results` must reflect a
/// state that existed at one real point in time.
pub trait Tally: Send + Sync {
    /// Increments the counter for `choice`, creating it at 1 if absent.
    fn record_vote(&self, choice: &str) -> Result<()>;

    /// Returns every known choice ordered by descending count, ties broken by
    /// ascending choice.
    ///
    /// The returned vector is a snapshot; later votes do not change it.
    fn results(&self) -> Vec<ResultEntry>;
}

impl<T: Tally + ?Sized> Tally for Arc<T> {
    fn record_vote(&self, choice: &str) -> Result<()> {
        (**self).record_vote(choice)
    }

    fn results(&self) -> Vec<ResultEntry> {
        (**self).results()
    }
}

/// Ranks raw `(choice, count)` pairs and attaches each entry's share.
///
/// Shared by every [`Tally`] implementation so ordering and share arithmetic
/// are identical regardless of how counters are stored.
pub fn rank(mut counts: Vec<(String, u64)>) -> Vec<ResultEntry> {
    counts.sort_unstable_by(|(a_choice, a_count), (b_choice, b_count)| {
        b_count.cmp(a_count).then_with(|| a_choice.cmp(b_choice))
    });

    let total: u64 = counts.iter().map(|(_, count)| count).sum();

    counts
        .into_iter()
        .map(|(choice, count)| ResultEntry {
            share: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
            choice,
            count,
        })
        .collect()
}
