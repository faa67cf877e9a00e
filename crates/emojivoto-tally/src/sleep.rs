use core::time::Duration;

/// A trait that abstracts over how to sleep for a given [`Duration`] in async
/// contexts.
///
/// The fault layer is generic over this so the artificial delay is a per-call
/// timer wait rather than a blocked thread.
pub trait SleepProvider {
    /// We require `Send` so that the future can be safely moved across threads
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
/// Under a paused Tokio clock the sleep auto-advances, which keeps delay tests
/// independent of wall time.
#[derive(Default, Clone, Copy, Debug)]
pub struct TokioSleep;

impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await
    }
}
