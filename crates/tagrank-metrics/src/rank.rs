//! Tag ordering and report rendering.

use std::cmp::Ordering;

use crate::error::MetricsError;
use crate::types::{TagAggregate, TagAggregates};

/// First line of every rendered report.
pub const REPORT_HEADER: &str =
    "Hashtag,Engagement/min,user_amount,avg likes,avg views,avg comments";

/// Order tags worst-first: ascending by `engagement_per_min`, then ascending
/// by `post_count`.
///
/// The sort is stable, so tags with equal keys keep their insertion order.
/// Callers that want best-first must reverse the result.
#[must_use]
pub fn rank(aggregates: &TagAggregates) -> Vec<String> {
    let mut ordered: Vec<&TagAggregate> = aggregates.iter().collect();
    ordered.sort_by(|a, b| {
        a.engagement_per_min
            .partial_cmp(&b.engagement_per_min)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.post_count.cmp(&b.post_count))
    });
    ordered.into_iter().map(|a| a.tag.clone()).collect()
}

/// Look up the aggregate for every tag in `order`, keeping that order.
///
/// # Errors
///
/// Returns [`MetricsError::UnknownTag`] for the first tag with no aggregate.
pub fn resolve<'a, S: AsRef<str>>(
    order: &[S],
    aggregates: &'a TagAggregates,
) -> Result<Vec<&'a TagAggregate>, MetricsError> {
    order
        .iter()
        .map(|tag| {
            let tag = tag.as_ref();
            aggregates
                .get(tag)
                .ok_or_else(|| MetricsError::UnknownTag(tag.to_string()))
        })
        .collect()
}

/// Render the report: [`REPORT_HEADER`] followed by one row per tag.
///
/// Rows are `tag,engagement_per_min,post_count,avg_likes,avg_views,avg_comments`
/// Float columns always carry a fractional part (`1.0`, `10.25`); counts and
/// `avg_views` are plain integers. Tags are written as-is; a tag containing a
/// comma will shift the columns of its row.
///
/// # Errors
///
/// Returns [`MetricsError::UnknownTag`] if `order` names a tag missing from
/// `aggregates`.
pub fn render<S: AsRef<str>>(
    order: &[S],
    aggregates: &TagAggregates,
) -> Result<Vec<String>, MetricsError> {
    let rows = resolve(order, aggregates)?;
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(REPORT_HEADER.to_string());
    lines.extend(rows.into_iter().map(|a| {
        format!(
            "{},{:?},{},{:?},{},{:?}",
            a.tag, a.engagement_per_min, a.post_count, a.avg_likes, a.avg_views, a.avg_comments
        )
    }));
    Ok(lines)
}
