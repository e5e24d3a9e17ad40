//! Discovery of every `LocationId` referenced by a page.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static LOCATION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""LocationId":\s*(\d+)"#).expect("valid regex"));

/// Returns the distinct location ids found anywhere in `html`, ascending.
#[must_use]
pub fn extract_location_ids(html: &str) -> Vec<i64> {
    LOCATION_ID_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1)?.as_str().parse::<i64>().ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
