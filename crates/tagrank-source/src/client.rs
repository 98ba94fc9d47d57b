//! HTTP client for the upstream tag feed and tag search endpoints.
//!
//! Requests are made once. Network failures and non-2xx statuses surface as
//! typed [`SourceError`]s for the caller to act on.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::source::TagSource;
use crate::types::{FeedResponse, RawPost, SearchResponse, TagFeed};

/// Client for the upstream tag endpoints.
///
/// Holds no login state. When a bearer token is configured it is attached to
/// every request as-is.
pub struct FeedClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl FeedClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        token: Option<&str>,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends below the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SourceError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(SourceError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            token: token.map(str::to_owned),
        })
    }

    /// Fetches the ranked posts for `tag`.
    ///
    /// A response without `ranked_items` yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`SourceError::NotFound`] on HTTP 404.
    /// - [`SourceError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`SourceError::Http`] on network or TLS failure.
    /// - [`SourceError::Deserialize`] if the body does not match the feed shape.
    pub async fn fetch_feed(&self, tag: &str) -> Result<Vec<RawPost>, SourceError> {
        let url = self.feed_url(tag)?;
        let feed: FeedResponse = self.request_json(url, &format!("feed for #{tag}")).await?;
        Ok(feed.ranked_items.unwrap_or_default())
    }

    /// Fetches the total number of posts under `tag`.
    ///
    /// Uses the first search result's `media_count`; returns `0` when there
    /// are no results or the count is absent.
    ///
    /// # Errors
    ///
    /// Same as [`FeedClient::fetch_feed`].
    pub async fn fetch_post_count(&self, tag: &str) -> Result<u64, SourceError> {
        let url = self.search_url(tag)?;
        let search: SearchResponse = self
            .request_json(url, &format!("tag search for #{tag}"))
            .await?;
        Ok(search
            .results
            .and_then(|results| results.into_iter().next())
            .and_then(|first| first.media_count)
            .unwrap_or(0))
    }

    /// `{base}feed/tag/{tag}/` with the tag percent-encoded as one path segment.
    fn feed_url(&self, tag: &str) -> Result<Url, SourceError> {
        let encoded = utf8_percent_encode(tag, NON_ALPHANUMERIC).to_string();
        self.join(&format!("feed/tag/{encoded}/"))
    }

    /// `{base}tags/search/?q={tag}`.
    fn search_url(&self, tag: &str) -> Result<Url, SourceError> {
        let mut url = self.join("tags/search/")?;
        url.query_pairs_mut().append_pair("q", tag);
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url, SourceError> {
        self.base_url
            .join(path)
            .map_err(|e| SourceError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and parses
    /// the body as `T`.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, SourceError> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

impl TagSource for FeedClient {
    async fn fetch_tag(&self, tag: &str) -> Result<TagFeed, SourceError> {
        tracing::info!(tag, "fetching tag");
        let posts = self.fetch_feed(tag).await?;
        let post_count = self.fetch_post_count(tag).await?;
        tracing::debug!(tag, post_count, sampled = posts.len(), "fetched tag");
        Ok(TagFeed {
            tag: tag.to_owned(),
            post_count,
            posts,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
