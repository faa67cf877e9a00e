use crate::{
    FaultConfig, RandSource, ResultEntry, Result, SleepProvider, Tally, TallyError, ThreadRandom,
    TokioSleep,
};
use core::marker::PhantomData;

/// A decorator that adds synthetic failures and latency to a [`Tally`].
///
/// The wrapped store keeps its own semantics: an injected failure is returned
/// before the operation runs, so a failed vote never partially increments a
/// counter. The delay is a per-call timer wait taken without holding any lock,
/// so concurrent calls are delayed independently.
///
/// The random source `R` and sleep provider `S` are injected so tests can
/// supply a seeded source and a paused clock.
///
/// # Example
/// ```
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// use emojivoto_tally::{FaultConfig, FaultInjector, LockTally, TallyError};
/// use core::time::Duration;
///
/// let always_fails = FaultInjector::new(LockTally::new(), FaultConfig::new(1.0, Duration::ZERO));
/// assert_eq!(always_fails.record_vote(":doughnut:").await, Err(TallyError::InjectedFailure));
/// assert!(always_fails.inner().is_empty());
/// # });
/// ```
#[derive(Debug)]
pub struct FaultInjector<T, R = ThreadRandom, S = TokioSleep> {
    inner: T,
    config: FaultConfig,
    rand: R,
    _sleep: PhantomData<fn() -> S>,
}

impl<T> FaultInjector<T>
where
    T: Tally,
{
    /// Wraps `inner` using the thread-local RNG and Tokio's timer.
    pub fn new(inner: T, config: FaultConfig) -> Self {
        Self::with_rand(inner, config, ThreadRandom)
    }
}

impl<T, R> FaultInjector<T, R>
where
    T: Tally,
    R: RandSource<f64>,
{
    /// Wraps `inner` using the given random source and Tokio's timer.
    pub fn with_rand(inner: T, config: FaultConfig, rand: R) -> Self {
        Self::with_components(inner, config, rand)
    }
}

impl<T, R, S> FaultInjector<T, R, S>
where
    T: Tally,
    R: RandSource<f64>,
    S: SleepProvider,
{
    /// Wraps `inner` with an explicit random source and sleep provider.
    pub fn with_components(inner: T, config: FaultConfig, rand: R) -> Self {
        Self {
            inner,
            config,
            rand,
            _sleep: PhantomData,
        }
    }

    pub fn config(&self) -> &FaultConfig {
        &self.config
    }

    /// The wrapped tally, bypassing fault injection.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Runs `op` against the wrapped tally under the fault policy.
    ///
    /// 1. Draw `r` uniformly from `[0, 1)`.
    /// 2. If `r < failure_rate`, return [`TallyError::InjectedFailure`]
    ///    without calling `op`.
    /// 3. Otherwise wait for the artificial delay, if any.
    /// 4. Call `op` and return its outcome unchanged.
    ///
    /// Nothing is awaited after `op` starts, so once the delay has elapsed the
    /// operation runs to completion even if the caller is about to give up.
    pub async fn invoke<F, O>(&self, op: F) -> Result<O>
    where
        F: FnOnce(&T) -> Result<O>,
    {
        if self.should_fail() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Injecting failure");
            return Err(TallyError::InjectedFailure);
        }

        let delay = self.config.artificial_delay();
        if !delay.is_zero() {
            S::sleep_for(delay).await;
        }

        op(&self.inner)
    }

    /// [`Tally::record_vote`] through the fault policy.
    pub async fn record_vote(&self, choice: &str) -> Result<()> {
        self.invoke(|tally| tally.record_vote(choice)).await
    }

    /// [`Tally::results`] through the fault policy.
    pub async fn results(&self) -> Result<Vec<ResultEntry>> {
        self.invoke(|tally| Ok(tally.results())).await
    }

    fn should_fail(&self) -> bool {
        self.rand.rand() < self.config.failure_rate()
    }
}
