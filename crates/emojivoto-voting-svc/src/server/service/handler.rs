//! gRPC service implementation for the vote tally.
//!
//! This module defines [`TallyService`], the concrete implementation of the
//! [`VotingService`] gRPC service defined in the protobuf specification. It is
//! stateless dispatch: every call is forwarded to a shared [`FaultyTally`] and
//! the outcome is translated back into the wire contract.
//!
//! ## Responsibilities
//!
//! - Run each vote on its own task so an abandoned call does not cancel an
//!   increment that has already passed the fault check.
//! - Map [`Error`] onto `tonic::Status` and record metrics.
//! - Parent each request span on the caller's trace context.

use crate::server::{
    config::ServerConfig,
    service::{FaultyTally, SharedTally},
    telemetry::{
        increment_injected_failures, increment_rejected_votes, increment_results_requests,
        increment_votes_cast, record_call_duration,
    },
};
use emojivoto_core::{
    Error,
    propagation::set_parent_from_metadata,
    proto::{
        CastVoteRequest, CastVoteResponse, GetResultsRequest, GetResultsResponse, VotingResult,
        voting_service_server::VotingService,
    },
    tally::{EmojiCatalog, FaultInjector, LockTally, TallyError, ValidatingTally},
};
use std::sync::Arc;
use std::time::Instant;
use tonic::{Request, Response, Status};
use tracing::Instrument;

/// The vote tally gRPC service.
///
/// Implements the [`VotingService`] service defined in the protobuf schema.
/// Cloning is cheap; all clones share one tally.
#[derive(Clone)]
pub struct TallyService {
    tally: Arc<FaultyTally>,
}

impl TallyService {
    /// Creates a service over an already-built fault-injected tally.
    pub fn new(tally: FaultyTally) -> Self {
        Self {
            tally: Arc::new(tally),
        }
    }

    /// Builds the tally described by `config` and wraps it in a service.
    ///
    /// With `validate_choices` the store is wrapped in a [`ValidatingTally`]
    /// over the built-in emoji catalog; otherwise every shortcode is tallied.
    pub fn from_config(config: &ServerConfig) -> Self {
        let store: SharedTally = if config.validate_choices {
            Arc::new(ValidatingTally::new(LockTally::new(), EmojiCatalog::new()))
        } else {
            Arc::new(LockTally::new())
        };
        Self::new(FaultInjector::new(store, config.fault))
    }

    /// The fault-injected tally backing this service.
    pub fn tally(&self) -> &FaultyTally {
        &self.tally
    }

    async fn record_vote(&self, shortcode: String) -> Result<(), Error> {
        let tally = Arc::clone(&self.tally);
        tokio::spawn(async move { tally.record_vote(&shortcode).await })
            .await
            .map_err(|e| Error::TaskFailed {
                context: e.to_string(),
            })??;
        Ok(())
    }

    async fn handle_cast_vote(
        &self,
        shortcode: String,
    ) -> Result<Response<CastVoteResponse>, Status> {
        let start = Instant::now();
        let outcome = self.record_vote(shortcode).await;
        record_call_duration(start.elapsed().as_secs_f64() * 1_000.0);

        match outcome {
            Ok(()) => {
                increment_votes_cast();
                Ok(Response::new(CastVoteResponse {}))
            }
            Err(e) => {
                record_error(&e);
                tracing::debug!("Vote failed: {e}");
                Err(e.into())
            }
        }
    }

    async fn handle_get_results(&self) -> Result<Response<GetResultsResponse>, Status> {
        let start = Instant::now();
        let outcome = self.tally.results().await.map_err(Error::from);
        record_call_duration(start.elapsed().as_secs_f64() * 1_000.0);

        match outcome {
            Ok(entries) => {
                increment_results_requests();
                let results = entries.into_iter().map(VotingResult::from).collect();
                Ok(Response::new(GetResultsResponse { results }))
            }
            Err(e) => {
                record_error(&e);
                tracing::debug!("Results failed: {e}");
                Err(e.into())
            }
        }
    }
}

fn record_error(err: &Error) {
    match err {
        Error::Tally(TallyError::InjectedFailure) => increment_injected_failures(),
        Error::Tally(TallyError::InvalidChoice { .. }) => increment_rejected_votes(),
        _ => {}
    }
}

#[tonic::async_trait]
impl VotingService for TallyService {
    /// Records one vote for the requested shortcode.
    ///
    /// Fails with `UNAVAILABLE` when the fault layer injects a failure and,
    /// in validation mode, with `INVALID_ARGUMENT` for an unknown shortcode.
    /// The shortcode is otherwise an opaque key, the empty string included.
    async fn cast_vote(
        &self,
        req: Request<CastVoteRequest>,
    ) -> Result<Response<CastVoteResponse>, Status> {
        let span = tracing::info_span!("cast_vote", shortcode = %req.get_ref().shortcode);
        set_parent_from_metadata(&span, req.metadata());
        self.handle_cast_vote(req.into_inner().shortcode)
            .instrument(span)
            .await
    }

    /// Returns the ranked results snapshot.
    async fn get_results(
        &self,
        req: Request<GetResultsRequest>,
    ) -> Result<Response<GetResultsResponse>, Status> {
        let span = tracing::info_span!("get_results");
        set_parent_from_metadata(&span, req.metadata());
        self.handle_get_results().instrument(span).await
    }
}
