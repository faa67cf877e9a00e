//! gRPC service implementation for the emoji catalog.

use emojivoto_core::{
    propagation::set_parent_from_metadata,
    proto::{
        Emoji, FindByShortcodeRequest, FindByShortcodeResponse, ListAllEmojiRequest,
        ListAllEmojiResponse, emoji_service_server::EmojiService,
    },
    tally::{Catalog, EmojiCatalog},
};
use std::sync::Arc;
use tonic::{Request, Response, Status};

/// Serves a read-only [`Catalog`]. Cloning shares the catalog.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn Catalog>,
}

impl CatalogService {
    pub fn new(catalog: impl Catalog + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new(EmojiCatalog::new())
    }
}

#[tonic::async_trait]
impl EmojiService for CatalogService {
    async fn list_all(
        &self,
        req: Request<ListAllEmojiRequest>,
    ) -> Result<Response<ListAllEmojiResponse>, Status> {
        let span = tracing::info_span!("list_all");
        set_parent_from_metadata(&span, req.metadata());
        let list = span.in_scope(|| self.catalog.list().iter().map(Emoji::from).collect());
        Ok(Response::new(ListAllEmojiResponse { list }))
    }

    /// An unknown shortcode is not an error; `emoji` is left unset.
    async fn find_by_shortcode(
        &self,
        req: Request<FindByShortcodeRequest>,
    ) -> Result<Response<FindByShortcodeResponse>, Status> {
        let span = tracing::info_span!("find_by_shortcode", shortcode = %req.get_ref().shortcode);
        set_parent_from_metadata(&span, req.metadata());
        let emoji = span.in_scope(|| {
            let emoji = self.catalog.find(&req.get_ref().shortcode).map(Emoji::from);
            if emoji.is_none() {
                tracing::debug!("Shortcode not in catalog");
            }
            emoji
        });
        Ok(Response::new(FindByShortcodeResponse { emoji }))
    }
}
