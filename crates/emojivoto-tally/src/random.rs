use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rng, rngs::StdRng};

/// A trait for random sources that return random values.
///
/// This abstraction allows you to plug in a real random source or a
/// deterministic one in tests. For `f64` the value is uniform in `[0, 1)`.
///
/// # Example
/// ```
/// use emojivoto_tally::RandSource;
///
/// struct FixedRand;
/// impl RandSource<f64> for FixedRand {
///     fn rand(&self) -> f64 {
///         0.25
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 0.25);
/// ```
pub trait RandSource<T> {
    /// Returns a random value.
    fn rand(&self) -> T;
}

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it accesses
/// the thread-local generator on each call, so it is `Send + Sync` and may be
/// shared across tasks.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<f64> for ThreadRandom {
    fn rand(&self) -> f64 {
        rng().random()
    }
}

/// A seeded `RandSource` producing the same sequence for the same seed.
///
/// The generator is shared behind a mutex so that a single sequence is drawn
/// even when the source is used from many tasks. Intended for reproducible
/// fault schedules.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandSource<f64> for SeededRandom {
    fn rand(&self) -> f64 {
        self.rng.lock().random()
    }
}

impl<T, R: RandSource<T> + ?Sized> RandSource<T> for &R {
    fn rand(&self) -> T {
        (**self).rand()
    }
}
