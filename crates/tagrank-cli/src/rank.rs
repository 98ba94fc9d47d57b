//! `rank` command handler.
//!
//! Unlike a collection run, any failure here aborts the whole ranking: the
//! report only makes sense over the complete tag list, so nothing is written
//! until every tag has been fetched and aggregated.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use tagrank_core::AppConfig;
use tagrank_metrics::{aggregate, rank, render, resolve, TagAggregate, TagAggregates};
use tagrank_source::{FeedClient, TagSource};
use tokio::time::Instant;

use crate::output::{write_json, write_report, ReportFormat};

/// Rank every tag in the hashtag list and write the report.
///
/// CLI arguments win over their config fallbacks. When `dry_run` is `true`
/// the parsed tags are printed and no request is made.
///
/// # Errors
///
/// Returns an error if no hashtag list is configured or it cannot be read,
/// the feed client cannot be built, any tag fails to fetch or aggregate, or
/// the report cannot be written.
pub(crate) async fn run_rank(
    config: &AppConfig,
    hashtags_path: Option<&Path>,
    out_path: Option<&Path>,
    format: ReportFormat,
    dry_run: bool,
) -> anyhow::Result<()> {
    let hashtags_path = hashtags_path
        .or(config.hashtags_path.as_deref())
        .ok_or_else(|| {
            anyhow::anyhow!("no hashtag list given; pass --hashtags-path or set TAGRANK_HASHTAGS_PATH")
        })?;
    let out_path = out_path.unwrap_or(&config.out_path);

    let tags = tagrank_core::load_hashtags(hashtags_path)?;
    let blank = tags.iter().filter(|t| t.is_empty()).count();
    if blank > 0 {
        tracing::warn!(blank, "hashtag list has blank lines; they are ranked as empty tags");
    }

    if dry_run {
        println!(
            "dry-run: would rank {} tags into {}: [{}]",
            tags.len(),
            out_path.display(),
            tags.join(", ")
        );
        return Ok(());
    }

    let client = FeedClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.api_token.as_deref(),
    )
    .context("failed to build feed client")?;

    let aggregates = collect_aggregates(
        &client,
        &tags,
        config.max_concurrent_tags,
        config.inter_request_delay_ms,
    )
    .await?;

    let order = rank(&aggregates);
    match format {
        ReportFormat::Csv => write_report(out_path, &render(&order, &aggregates)?)?,
        ReportFormat::Json => write_json(out_path, &resolve(&order, &aggregates)?)?,
    }

    tracing::info!(
        tags = order.len(),
        path = %out_path.display(),
        "wrote ranked report"
    );
    Ok(())
}

/// Fetch and aggregate every tag, at most `max_concurrent` at a time.
///
/// Results are gathered in input order, so the mapping (and therefore the
/// ranking) is the same as a one-at-a-time run. With a non-zero `delay_ms`,
/// the fetch for the tag at index `i` starts no earlier than `i * delay_ms`
/// after the run begins, whatever `max_concurrent` is. The first failure
/// stops the run.
///
/// # Errors
///
/// Returns the first fetch or aggregation error, with the tag as context.
pub(crate) async fn collect_aggregates<S: TagSource>(
    source: &S,
    tags: &[String],
    max_concurrent: usize,
    delay_ms: u64,
) -> anyhow::Result<TagAggregates> {
    let started = Instant::now();
    let results: Vec<TagAggregate> = futures::stream::iter(tags.iter().enumerate())
        .map(|(idx, tag)| async move {
            if idx > 0 && delay_ms > 0 {
                let wait = start_offset(idx, delay_ms).saturating_sub(started.elapsed());
                tokio::time::sleep(wait).await;
            }
            fetch_and_aggregate(source, tag).await
        })
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await?;

    Ok(results.into_iter().collect())
}

fn start_offset(idx: usize, delay_ms: u64) -> Duration {
    let idx = u64::try_from(idx).unwrap_or(u64::MAX);
    Duration::from_millis(delay_ms.saturating_mul(idx))
}

async fn fetch_and_aggregate<S: TagSource>(source: &S, tag: &str) -> anyhow::Result<TagAggregate> {
    let feed = source
        .fetch_tag(tag)
        .await
        .with_context(|| format!("failed to fetch #{tag}"))?;
    let samples = feed.samples();
    aggregate(tag, feed.post_count, &samples, Utc::now())
        .with_context(|| format!("failed to aggregate #{tag}"))
}
