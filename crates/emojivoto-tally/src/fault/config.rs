use core::time::Duration;

/// Failure probability and artificial delay applied to every tally call.
///
/// Fixed for the lifetime of the injector. The failure rate is clamped into
/// `[0.0, 1.0]` on construction; `NaN` is treated as `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FaultConfig {
    failure_rate: f64,
    artificial_delay: Duration,
}

impl FaultConfig {
    /// Creates a config, clamping `failure_rate` into `[0.0, 1.0]`.
    ///
    /// # Example
    /// ```
    /// use core::time::Duration;
    /// use emojivoto_tally::FaultConfig;
    ///
    /// let config = FaultConfig::new(1.5, Duration::from_millis(10));
    /// assert_eq!(config.failure_rate(), 1.0);
    /// ```
    pub fn new(failure_rate: f64, artificial_delay: Duration) -> Self {
        Self {
            failure_rate: clamp_rate(failure_rate),
            artificial_delay,
        }
    }

    /// A config that never fails and never delays.
    pub const fn disabled() -> Self {
        Self {
            failure_rate: 0.0,
            artificial_delay: Duration::ZERO,
        }
    }

    pub const fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    pub const fn artificial_delay(&self) -> Duration {
        self.artificial_delay
    }

    /// Returns `true` if this config can neither fail nor delay a call.
    pub fn is_disabled(&self) -> bool {
        self.failure_rate == 0.0 && self.artificial_delay.is_zero()
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}
