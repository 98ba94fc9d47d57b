use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    /// A post's age floors to zero minutes, so its per-minute rate has no
    /// defined value.
    #[error("division by zero: post created at {created_at} is less than a minute old")]
    DivisionByZero { created_at: DateTime<Utc> },

    #[error("tag '{0}' has no computed aggregate")]
    UnknownTag(String),
}
