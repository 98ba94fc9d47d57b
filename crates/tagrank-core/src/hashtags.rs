//! Hashtag list input.
//!
//! The list is plain text with one tag per line. Every `#` is removed and the
//! remainder is trimmed. Blank lines are kept as empty tags; callers decide
//! what to do with them.

use std::path::Path;

use crate::ConfigError;

/// Split a hashtag list into tags, one per line.
#[must_use]
pub fn parse_hashtags(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.replace('#', "").trim().to_string())
        .collect()
}

/// Read and parse the hashtag list at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::HashtagsFileIo`] if the file cannot be read.
pub fn load_hashtags(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HashtagsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(parse_hashtags(&content))
}
