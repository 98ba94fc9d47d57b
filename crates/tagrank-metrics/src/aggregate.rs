//! Per-tag aggregate statistics.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::MetricsError;
use crate::types::{PostSample, TagAggregate};

/// Compute the aggregate statistics for one tag.
///
/// `post_count` is the tag's population size; `samples` is the fetched
/// subset used to estimate engagement. `now` anchors post ages so the result
/// depends only on the arguments.
///
/// Populations per statistic:
///
/// | Statistic            | Numerator over samples with      | Denominator          |
/// |----------------------|----------------------------------|----------------------|
/// | `avg_likes`          | likes                            | `sample_size`        |
/// | `avg_views`          | views (result floored)           | samples with views   |
/// | `avg_comments`       | comments                         | `sample_size`        |
/// | `likes_per_min`      | likes and `created_at`           | `sample_size`        |
/// | `views_per_min`      | views and `created_at`           | samples with views   |
/// | `engagement_per_min` | likes and `created_at`           | `sample_size`        |
///
/// `sample_size` counts samples carrying likes. Each rate term divides by the
/// post's age in whole minutes (floored). A post dated in the future has a
/// negative age and contributes a negative term.
///
/// # Errors
///
/// Returns [`MetricsError::DivisionByZero`] if a post that feeds a per-minute
/// rate is less than one minute old.
pub fn aggregate(
    tag: &str,
    post_count: u64,
    samples: &[PostSample],
    now: DateTime<Utc>,
) -> Result<TagAggregate, MetricsError> {
    let sample_size = samples.iter().filter(|s| s.likes.is_some()).count();
    let viewed_count = samples.iter().filter(|s| s.views.is_some()).count();

    let avg_likes = mean_over(
        samples.iter().filter_map(|s| s.likes).map(to_f64).sum(),
        sample_size,
    );
    let avg_comments = mean_over(
        samples.iter().filter_map(|s| s.comments).map(to_f64).sum(),
        sample_size,
    );
    let avg_views = floored_mean(samples.iter().filter_map(|s| s.views), viewed_count);

    let mut likes_rate_sum = 0.0_f64;
    let mut views_rate_sum = 0.0_f64;
    let mut engagement_rate_sum = 0.0_f64;

    for sample in samples {
        let Some(created_at) = sample.created_at else {
            continue;
        };

        if let Some(likes) = sample.likes {
            let age = age_minutes(created_at, now)?;
            let likes = to_f64(likes);
            let weighted = match sample.views.map(|v| to_f64(v) / 10.0) {
                Some(view_proxy) if view_proxy > likes => view_proxy,
                _ => likes,
            };
            likes_rate_sum += likes / age;
            engagement_rate_sum += weighted / age;
        }

        if let Some(views) = sample.views {
            let age = age_minutes(created_at, now)?;
            views_rate_sum += to_f64(views) / age;
        }
    }

    let likes_per_min = mean_over(likes_rate_sum, sample_size);
    let views_per_min = mean_over(views_rate_sum, viewed_count);
    let engagement_per_min = mean_over(engagement_rate_sum, sample_size);

    let like_engagement = if avg_likes > 0.0 {
        to_f64(post_count) / avg_likes
    } else {
        0.0
    };
    let views_engagement = if avg_views > 0 {
        to_f64(post_count) / to_f64(avg_views)
    } else {
        0.0
    };

    tracing::debug!(
        tag,
        post_count,
        sample_size,
        engagement_per_min,
        "aggregated tag metrics"
    );

    Ok(TagAggregate {
        tag: tag.to_string(),
        post_count,
        sample_size,
        avg_likes,
        avg_views,
        avg_comments,
        likes_per_min,
        views_per_min,
        engagement_per_min,
        like_engagement,
        views_engagement,
    })
}

/// Whole minutes between `created_at` and `now`, rounded toward negative
/// infinity. Zero is rejected because it is always used as a divisor.
fn age_minutes(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<f64, MetricsError> {
    let age = now - created_at;
    let mut minutes = age.num_minutes();
    // `num_minutes` truncates toward zero; step down for partial negative minutes.
    if age < TimeDelta::minutes(minutes) {
        minutes -= 1;
    }
    if minutes == 0 {
        return Err(MetricsError::DivisionByZero { created_at });
    }
    #[allow(clippy::cast_precision_loss)]
    let minutes = minutes as f64;
    Ok(minutes)
}

fn mean_over(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = count as f64;
    sum / denom
}

fn floored_mean(values: impl Iterator<Item = u64>, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let sum: u128 = values.map(u128::from).sum();
    let mean = sum / count as u128;
    u64::try_from(mean).unwrap_or(u64::MAX)
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(n: u64) -> f64 {
    n as f64
}
