use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed post for a tag.
///
/// Every field is optional because the upstream feed omits them freely. A
/// missing field excludes the post from the statistics that need it; it is
/// never read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSample {
    pub likes: Option<u64>,
    pub views: Option<u64>,
    pub comments: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate statistics for one tag.
///
/// Averages and rates are `0` whenever their denominator would be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAggregate {
    pub tag: String,
    /// Total posts under the tag, as reported upstream. Independent of the
    /// sample.
    pub post_count: u64,
    /// Number of sampled posts that carry a like count.
    pub sample_size: usize,
    pub avg_likes: f64,
    /// Mean view count, floored.
    pub avg_views: u64,
    pub avg_comments: f64,
    pub likes_per_min: f64,
    pub views_per_min: f64,
    pub engagement_per_min: f64,
    pub like_engagement: f64,
    pub views_engagement: f64,
}

impl TagAggregate {
    /// An aggregate with every statistic at zero.
    #[must_use]
    pub fn empty(tag: impl Into<String>, post_count: u64) -> Self {
        Self {
            tag: tag.into(),
            post_count,
            sample_size: 0,
            avg_likes: 0.0,
            avg_views: 0,
            avg_comments: 0.0,
            likes_per_min: 0.0,
            views_per_min: 0.0,
            engagement_per_min: 0.0,
            like_engagement: 0.0,
            views_engagement: 0.0,
        }
    }
}

/// Insertion-ordered mapping from tag to its aggregate.
///
/// Inserting a tag that is already present replaces its aggregate in place,
/// so the tag keeps the position of its first insertion.
#[derive(Debug, Clone, Default)]
pub struct TagAggregates {
    entries: Vec<TagAggregate>,
    index: HashMap<String, usize>,
}

impl TagAggregates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `aggregate` under its tag, returning the aggregate it replaced.
    pub fn insert(&mut self, aggregate: TagAggregate) -> Option<TagAggregate> {
        if let Some(&pos) = self.index.get(&aggregate.tag) {
            return Some(std::mem::replace(&mut self.entries[pos], aggregate));
        }
        self.index.insert(aggregate.tag.clone(), self.entries.len());
        self.entries.push(aggregate);
        None
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&TagAggregate> {
        self.index.get(tag).map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TagAggregate> {
        self.entries.iter()
    }
}

impl FromIterator<TagAggregate> for TagAggregates {
    fn from_iter<I: IntoIterator<Item = TagAggregate>>(iter: I) -> Self {
        let mut set = Self::new();
        for aggregate in iter {
            set.insert(aggregate);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TagAggregates {
    type Item = &'a TagAggregate;
    type IntoIter = std::slice::Iter<'a, TagAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rate(tag: &str, engagement_per_min: f64) -> TagAggregate {
        TagAggregate {
            engagement_per_min,
            ..TagAggregate::empty(tag, 0)
        }
    }

    #[test]
    fn empty_aggregate_is_all_zero() {
        let agg = TagAggregate::empty("rust", 42);
        assert_eq!(agg.tag, "rust");
        assert_eq!(agg.post_count, 42);
        assert_eq!(agg.sample_size, 0);
        assert_eq!(agg.avg_views, 0);
        assert_eq!(agg.engagement_per_min, 0.0);
        assert_eq!(agg.views_engagement, 0.0);
    }

    #[test]
    fn insert_preserves_insertion_order() {
        let set: TagAggregates = ["c", "a", "b"]
            .into_iter()
            .map(|t| TagAggregate::empty(t, 0))
            .collect();
        let tags: Vec<&str> = set.iter().map(|a| a.tag.as_str()).collect();
        assert_eq!(tags, vec!["c", "a", "b"]);
    }

    #[test]
    fn reinsert_replaces_value_but_keeps_position() {
        let mut set = TagAggregates::new();
        assert!(set.insert(with_rate("a", 1.0)).is_none());
        assert!(set.insert(with_rate("b", 2.0)).is_none());
        let replaced = set.insert(with_rate("a", 3.0));

        assert_eq!(replaced.map(|a| a.engagement_per_min), Some(1.0));
        assert_eq!(set.len(), 2);
        let tags: Vec<&str> = set.iter().map(|a| a.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "b"]);
        assert_eq!(set.get("a").map(|a| a.engagement_per_min), Some(3.0));
    }

    #[test]
    fn get_missing_tag_is_none() {
        let set = TagAggregates::new();
        assert!(set.is_empty());
        assert!(set.get("nope").is_none());
    }
}
