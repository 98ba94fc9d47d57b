//! Engagement metrics engine for tagrank.
//!
//! Turns a tag's post count and a sample of its recent posts into a
//! [`TagAggregate`], then orders tags by engagement per minute and renders
//! the CSV-like report. Everything here is synchronous and free of I/O.

pub mod aggregate;
pub mod error;
pub mod rank;
pub mod types;

pub use aggregate::aggregate;
pub use error::MetricsError;
pub use rank::{rank, render, resolve, REPORT_HEADER};
pub use types::{PostSample, TagAggregate, TagAggregates};
