//! Upstream data source for tagrank.
//!
//! [`TagSource`] is the capability the ranking run is handed to obtain a
//! tag's post count and recent posts. [`FeedClient`] implements it over the
//! upstream HTTP API; [`StaticSource`] serves canned feeds from memory.

pub mod client;
pub mod error;
pub mod normalize;
pub mod source;
pub mod types;

pub use client::FeedClient;
pub use error::SourceError;
pub use source::{StaticSource, TagSource};
pub use types::{Caption, RawPost, TagFeed};
