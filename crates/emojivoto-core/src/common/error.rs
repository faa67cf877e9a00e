//! Error types for the emojivoto services.
//!
//! This module defines the central `Error` enum shared by the gRPC servers.
//! It implements `From<Error>` for `tonic::Status` so handlers can return
//! domain errors with `?` and clients see the matching status code.
//!
//! ## Error Cases
//! - `Tally`: A tally operation failed. Injected failures map to
//!   `UNAVAILABLE` so callers treat them like any other transient backend
//!   fault; invalid choices map to `INVALID_ARGUMENT`.
//! - `TaskFailed`: A spawned request task panicked or was aborted.

use emojivoto_tally::TallyError;
use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the emojivoto services.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The tally or its fault layer rejected the call.
    #[error(transparent)]
    Tally(#[from] TallyError),

    /// The task running the request did not complete.
    #[error("Task error: {context}")]
    TaskFailed { context: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::Tally(TallyError::InjectedFailure) => {
                Status::unavailable("Injected failure, please retry")
            }
            Error::Tally(TallyError::InvalidChoice { choice }) => {
                Status::invalid_argument(format!("Unknown choice: {choice}"))
            }
            Error::Tally(e) => Status::internal(format!("Tally error: {e}")),
            Error::TaskFailed { context } => Status::internal(format!("Task error: {context}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn injected_failure_is_unavailable() {
        let status = Status::from(Error::from(TallyError::InjectedFailure));
        assert_eq!(status.code(), Code::Unavailable);
    }

    #[test]
    fn invalid_choice_is_invalid_argument() {
        let status = Status::from(Error::from(TallyError::InvalidChoice {
            choice: ":nope:".to_owned(),
        }));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains(":nope:"));
    }

    #[test]
    fn task_failure_is_internal() {
        let status = Status::from(Error::TaskFailed {
            context: "join error".to_owned(),
        });
        assert_eq!(status.code(), Code::Internal);
    }
}
