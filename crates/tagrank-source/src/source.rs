use std::collections::HashMap;
use std::future::Future;

use crate::error::SourceError;
use crate::types::TagFeed;

/// Something that can fetch a tag's post count and recent posts.
///
/// The ranking run receives one of these explicitly; nothing in the metrics
/// engine holds session or client state.
pub trait TagSource {
    /// Fetch the feed for `tag`.
    fn fetch_tag(&self, tag: &str) -> impl Future<Output = Result<TagFeed, SourceError>> + Send;
}

/// In-memory [`TagSource`] serving pre-built feeds.
///
/// Tags without a registered feed resolve to [`TagFeed::empty`], the same
/// shape upstream produces for a tag it knows nothing about.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    feeds: HashMap<String, TagFeed>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_feed(mut self, feed: TagFeed) -> Self {
        self.insert(feed);
        self
    }

    pub fn insert(&mut self, feed: TagFeed) {
        self.feeds.insert(feed.tag.clone(), feed);
    }
}

impl TagSource for StaticSource {
    async fn fetch_tag(&self, tag: &str) -> Result<TagFeed, SourceError> {
        Ok(self
            .feeds
            .get(tag)
            .cloned()
            .unwrap_or_else(|| TagFeed::empty(tag)))
    }
}
