use emojivoto_core::{
    propagation::TraceContextInterceptor,
    proto::{
        CastVoteRequest, Emoji, FindByShortcodeRequest, GetResultsRequest, ListAllEmojiRequest,
        VotingResult, emoji_service_client::EmojiServiceClient,
        voting_service_client::VotingServiceClient,
    },
};
use tonic::{
    Status,
    service::interceptor::InterceptedService,
    transport::{Channel, Endpoint},
};

type TracedChannel = InterceptedService<Channel, TraceContextInterceptor>;

/// The calls the gateway makes against its two backends.
///
/// Implemented over gRPC by [`GrpcBackend`]. Handlers are generic over this
/// so they can be driven by an in-process backend.
pub trait Backend: Clone + Send + Sync + 'static {
    /// Every emoji in catalog order.
    fn list_emoji(&self) -> impl Future<Output = Result<Vec<Emoji>, Status>> + Send;

    /// The catalog entry for `shortcode`, or `None` when unknown.
    fn find_emoji(
        &self,
        shortcode: String,
    ) -> impl Future<Output = Result<Option<Emoji>, Status>> + Send;

    fn cast_vote(&self, shortcode: String) -> impl Future<Output = Result<(), Status>> + Send;

    /// Ranked tally results.
    fn results(&self) -> impl Future<Output = Result<Vec<VotingResult>, Status>> + Send;
}

/// [`Backend`] over tonic channels to the emoji and voting services.
#[derive(Clone, Debug)]
pub struct GrpcBackend {
    emoji: EmojiServiceClient<TracedChannel>,
    voting: VotingServiceClient<TracedChannel>,
}

impl GrpcBackend {
    /// Builds clients for both services without dialling either.
    ///
    /// Connections are established on first use and re-established after a
    /// failure, so the gateway starts even when a backend is not up yet.
    /// Every call carries the current trace context.
    pub fn connect_lazy(
        emoji_uri: &str,
        voting_uri: &str,
    ) -> Result<Self, tonic::transport::Error> {
        let emoji = Endpoint::from_shared(emoji_uri.to_owned())?.connect_lazy();
        let voting = Endpoint::from_shared(voting_uri.to_owned())?.connect_lazy();
        Ok(Self {
            emoji: EmojiServiceClient::with_interceptor(emoji, TraceContextInterceptor),
            voting: VotingServiceClient::with_interceptor(voting, TraceContextInterceptor),
        })
    }
}

impl Backend for GrpcBackend {
    async fn list_emoji(&self) -> Result<Vec<Emoji>, Status> {
        let resp = self.emoji.clone().list_all(ListAllEmojiRequest {}).await?;
        Ok(resp.into_inner().list)
    }

    async fn find_emoji(&self, shortcode: String) -> Result<Option<Emoji>, Status> {
        let resp = self
            .emoji
            .clone()
            .find_by_shortcode(FindByShortcodeRequest { shortcode })
            .await?;
        Ok(resp.into_inner().emoji)
    }

    async fn cast_vote(&self, shortcode: String) -> Result<(), Status> {
        self.voting
            .clone()
            .cast_vote(CastVoteRequest { shortcode })
            .await?;
        Ok(())
    }

    async fn results(&self) -> Result<Vec<VotingResult>, Status> {
        let resp = self.voting.clone().get_results(GetResultsRequest {}).await?;
        Ok(resp.into_inner().results)
    }
}
