//! Conversion from upstream post records to metric samples.

use chrono::{DateTime, Utc};
use tagrank_metrics::PostSample;

use crate::types::{RawPost, TagFeed};

impl RawPost {
    /// `taken_at` as a UTC instant. Epochs outside chrono's range are treated
    /// as missing.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.taken_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    #[must_use]
    pub fn caption_text(&self) -> Option<&str> {
        self.caption.as_ref().and_then(|c| c.text.as_deref())
    }

    #[must_use]
    pub fn to_sample(&self) -> PostSample {
        PostSample {
            likes: self.like_count,
            views: self.view_count,
            comments: self.comment_count,
            created_at: self.created_at(),
        }
    }
}

impl TagFeed {
    /// Metric samples for every fetched post, in feed order.
    #[must_use]
    pub fn samples(&self) -> Vec<PostSample> {
        self.posts.iter().map(RawPost::to_sample).collect()
    }
}
