//! In-process backends for driving the gateway without network services.

use crate::gateway::Backend;
use emojivoto_core::{
    Error,
    proto::{Emoji, VotingResult},
    tally::{Catalog, EmojiCatalog, FaultConfig, FaultInjector, LockTally},
};
use std::sync::Arc;
use tonic::{Code, Status};

/// The built-in catalog plus a fault-injected tally in memory.
#[derive(Clone)]
pub(crate) struct InMemoryBackend {
    catalog: Arc<EmojiCatalog>,
    tally: Arc<FaultInjector<LockTally>>,
}

impl InMemoryBackend {
    pub(crate) fn new(fault: FaultConfig) -> Self {
        Self {
            catalog: Arc::new(EmojiCatalog::new()),
            tally: Arc::new(FaultInjector::new(LockTally::new(), fault)),
        }
    }

    pub(crate) fn store(&self) -> &LockTally {
        self.tally.inner()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(FaultConfig::disabled())
    }
}

impl Backend for InMemoryBackend {
    async fn list_emoji(&self) -> Result<Vec<Emoji>, Status> {
        Ok(self.catalog.list().iter().map(Emoji::from).collect())
    }

    async fn find_emoji(&self, shortcode: String) -> Result<Option<Emoji>, Status> {
        Ok(self.catalog.find(&shortcode).map(Emoji::from))
    }

    async fn cast_vote(&self, shortcode: String) -> Result<(), Status> {
        self.tally
            .record_vote(&shortcode)
            .await
            .map_err(|e| Status::from(Error::from(e)))
    }

    async fn results(&self) -> Result<Vec<VotingResult>, Status> {
        let entries = self
            .tally
            .results()
            .await
            .map_err(|e| Status::from(Error::from(e)))?;
        Ok(entries.into_iter().map(VotingResult::from).collect())
    }
}

/// A backend whose catalog works but whose voting calls fail with `code`.
#[derive(Clone)]
pub(crate) struct FailingVotes {
    catalog: InMemoryBackend,
    code: Code,
}

impl FailingVotes {
    pub(crate) fn new(code: Code) -> Self {
        Self {
            catalog: InMemoryBackend::default(),
            code,
        }
    }
}

impl Backend for FailingVotes {
    async fn list_emoji(&self) -> Result<Vec<Emoji>, Status> {
        self.catalog.list_emoji().await
    }

    async fn find_emoji(&self, shortcode: String) -> Result<Option<Emoji>, Status> {
        self.catalog.find_emoji(shortcode).await
    }

    async fn cast_vote(&self, _shortcode: String) -> Result<(), Status> {
        Err(Status::new(self.code, "voting backend failed"))
    }

    async fn results(&self) -> Result<Vec<VotingResult>, Status> {
        Err(Status::new(self.code, "voting backend failed"))
    }
}
