use crate::bot::BotConfig;
use crate::gateway::ListedEmoji;
use emojivoto_core::propagation::inject_headers;
use reqwest::{
    Client, StatusCode, Url,
    header::{HOST, HeaderMap},
};

/// Errors from a single gateway round trip.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway answered {0}")]
    Status(StatusCode),
}

/// HTTP client for the two gateway routes the bot uses.
#[derive(Debug, Clone)]
pub struct VoteClient {
    http: Client,
    list_url: Url,
    vote_url: Url,
    host_override: Option<String>,
}

impl VoteClient {
    pub fn new(http: Client, config: &BotConfig) -> Self {
        let mut list_url = config.web_url.clone();
        list_url.set_path("/api/list");
        let mut vote_url = config.web_url.clone();
        vote_url.set_path("/api/vote");
        Self {
            http,
            list_url,
            vote_url,
            host_override: config.host_override.clone(),
        }
    }

    /// Shortcodes currently listed by the gateway.
    #[tracing::instrument(skip_all)]
    pub async fn shortcodes(&self) -> Result<Vec<String>, BotError> {
        let resp = self.get(self.list_url.clone()).await?;
        let emoji: Vec<ListedEmoji> = resp.json().await?;
        Ok(emoji.into_iter().map(|e| e.shortcode).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn vote(&self, shortcode: &str) -> Result<(), BotError> {
        let mut url = self.vote_url.clone();
        url.query_pairs_mut().append_pair("choice", shortcode);
        self.get(url).await?;
        Ok(())
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, BotError> {
        let mut headers = HeaderMap::new();
        inject_headers(&mut headers);
        let mut req = self.http.get(url).headers(headers);
        if let Some(host) = &self.host_override {
            req = req.header(HOST, host);
        }
        let resp = req.send().await?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(BotError::Status(resp.status()))
        }
    }
}
