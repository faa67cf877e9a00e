use crate::gateway::{ApiError, Backend};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use emojivoto_core::proto;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of `/api/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedEmoji {
    pub shortcode: String,
    pub unicode: String,
}

impl From<proto::Emoji> for ListedEmoji {
    fn from(emoji: proto::Emoji) -> Self {
        Self {
            shortcode: emoji.shortcode,
            unicode: emoji.unicode,
        }
    }
}

/// One entry of `/api/leaderboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub shortcode: String,
    pub unicode: String,
    pub votes: u64,
    pub share: f64,
}

#[derive(Debug, Deserialize)]
pub struct VoteParams {
    pub choice: Option<String>,
}

/// Builds the gateway router over `backend`.
pub fn router<B: Backend>(backend: B) -> Router {
    Router::new()
        .route("/api/list", get(list::<B>))
        .route("/api/vote", get(vote::<B>))
        .route("/api/leaderboard", get(leaderboard::<B>))
        .route("/healthz", get(healthz))
        .with_state(backend)
}

async fn list<B: Backend>(State(backend): State<B>) -> Result<Json<Vec<ListedEmoji>>, ApiError> {
    let emoji = backend.list_emoji().await?;
    Ok(Json(emoji.into_iter().map(ListedEmoji::from).collect()))
}

#[tracing::instrument(skip_all, fields(choice = ?params.choice))]
async fn vote<B: Backend>(
    State(backend): State<B>,
    Query(params): Query<VoteParams>,
) -> Result<StatusCode, ApiError> {
    let choice = params
        .choice
        .filter(|c| !c.is_empty())
        .ok_or(ApiError::MissingChoice)?;

    if backend.find_emoji(choice.clone()).await?.is_none() {
        return Err(ApiError::UnknownChoice(choice));
    }

    backend.cast_vote(choice).await?;
    Ok(StatusCode::OK)
}

/// Tally results joined with the catalog. Shortcodes the catalog does not
/// know are left out.
async fn leaderboard<B: Backend>(
    State(backend): State<B>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let (emoji, results) = tokio::join!(backend.list_emoji(), backend.results());

    let unicode: HashMap<String, String> = emoji?
        .into_iter()
        .map(|e| (e.shortcode, e.unicode))
        .collect();

    let entries = results?
        .into_iter()
        .filter_map(|r| {
            let unicode = unicode.get(&r.shortcode)?.clone();
            Some(LeaderboardEntry {
                shortcode: r.shortcode,
                unicode,
                votes: r.votes,
                share: r.share,
            })
        })
        .collect();

    Ok(Json(entries))
}

async fn healthz() -> &'static str {
    "ok"
}
