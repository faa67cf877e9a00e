use crate::{Catalog, Result, ResultEntry, Tally, TallyError};

/// A [`Tally`] decorator that rejects votes for choices absent from a
/// [`Catalog`].
///
/// Rejection happens before the inner tally is touched, so an invalid vote
/// never creates a counter. Results pass through unchanged.
#[derive(Debug)]
pub struct ValidatingTally<T, C> {
    inner: T,
    catalog: C,
}

impl<T, C> ValidatingTally<T, C>
where
    T: Tally,
    C: Catalog,
{
    pub const fn new(inner: T, catalog: C) -> Self {
        Self { inner, catalog }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T, C> Tally for ValidatingTally<T, C>
where
    T: Tally,
    C: Catalog,
{
    fn record_vote(&self, choice: &str) -> Result<()> {
        if !self.catalog.contains(choice) {
            return Err(TallyError::InvalidChoice {
                choice: choice.to_owned(),
            });
        }
        self.inner.record_vote(choice)
    }

    fn results(&self) -> Vec<ResultEntry> {
        self.inner.results()
    }
}
