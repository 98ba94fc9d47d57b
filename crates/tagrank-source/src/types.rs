//! Upstream response types for the tag feed and tag search endpoints.
//!
//! ### Feed (`feed/tag/{tag}/`)
//! Posts live under `ranked_items`. The key may be absent or `null` for tags
//! with no ranked posts; both mean an empty sample. Every metric on a post is
//! optional: `view_count` only exists for video posts, and `like_count` is
//! hidden on some accounts.
//!
//! ### Post `id`
//! Usually a string like `"3141592653589793238_12345"`, occasionally a bare
//! number. Both are kept as a string.
//!
//! ### `caption`
//! Either `null` or an object whose `text` may itself be `null`.
//!
//! ### `taken_at`
//! Unix epoch seconds, UTC.
//!
//! ### Search (`tags/search/?q={tag}`)
//! `results` is a list of matching tags, best match first. Only the first
//! entry's `media_count` is used; an empty or missing list means the count is
//! unavailable and is reported as `0`.

use serde::{Deserialize, Deserializer};

/// A single post from the tag feed, as returned upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPost {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub caption: Option<Caption>,
    #[serde(default)]
    pub taken_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Caption {
    #[serde(default)]
    pub text: Option<String>,
}

/// Everything fetched for one tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagFeed {
    pub tag: String,
    /// Total posts under the tag; `0` when upstream did not report one.
    pub post_count: u64,
    pub posts: Vec<RawPost>,
}

impl TagFeed {
    /// A feed with no posts and an unknown (zero) post count.
    #[must_use]
    pub fn empty(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            post_count: 0,
            posts: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedResponse {
    #[serde(default)]
    pub ranked_items: Option<Vec<RawPost>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    #[serde(default)]
    pub media_count: Option<u64>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    }))
}
