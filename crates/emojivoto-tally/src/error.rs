/// A result type defaulting to [`TallyError`].
pub type Result<T, E = TallyError> = core::result::Result<T, E>;

/// All errors a tally operation can produce.
///
/// Neither variant mutates the store: an injected failure is raised before
/// the wrapped operation runs, and an invalid choice is rejected before the
/// counter is touched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum TallyError {
    /// A synthetic failure raised by [`FaultInjector`] at the configured
    /// probability.
    ///
    /// Callers are expected to apply their own retry or resilience policy.
    ///
    /// [`FaultInjector`]: crate::FaultInjector
    #[error("injected failure")]
    InjectedFailure,

    /// The vote referenced a choice absent from the catalog.
    ///
    /// Only raised by [`ValidatingTally`].
    ///
    /// [`ValidatingTally`]: crate::ValidatingTally
    #[error("invalid choice: {choice}")]
    InvalidChoice { choice: String },
}
