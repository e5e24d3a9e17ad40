//! Locates embedded datasets inside raw page blocks.

use regex::Regex;

use crate::error::ScraperError;

/// Matches the location array literal assigned to `locationData`.
pub const LOCATION_DATA_PATTERN: &str = r"(?s)var locationData\s*=\s*(\[\{.*?\}\]);";

/// Matches the slot array literal assigned to `timeData`.
pub const TIME_DATA_PATTERN: &str = r"(?s)var timeData = (\[.*?\])";

/// Returns capture group 1 of the first block matching `pattern`.
///
/// Blocks are scanned in order and the scan stops at the first match. An
/// empty `blocks` slice means there was nothing to scan (typically a failed
/// fetch) and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`ScraperError::DataNotFound`] when `blocks` is non-empty but no
/// block matches `pattern` with a capture.
pub fn find_dataset(blocks: &[String], pattern: &Regex) -> Result<Option<String>, ScraperError> {
    if blocks.is_empty() {
        return Ok(None);
    }

    blocks
        .iter()
        .find_map(|block| {
            pattern
                .captures(block)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_owned())
        })
        .map(Some)
        .ok_or_else(|| {
            ScraperError::DataNotFound(format!(
                "none of {} blocks matched `{}`",
                blocks.len(),
                pattern.as_str()
            ))
        })
}
