//! Reads the appointment date shown on a single location's booking page.
//!
//! The page renders its date as a label such as
//! `Available appointments for March 15, 2024, 9:00 AM`; the second
//! `control-label date-time` label carries the date of the first open slot.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DATE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<label\b[^>]*\bclass\s*=\s*"[^"]*\bcontrol-label\s+date-time\b[^"]*"[^>]*>(.*?)</label>"#,
    )
    .expect("valid regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Finds the booking date on a location page.
///
/// Returns `None` when the page has fewer than two date labels or the
/// second label cannot be parsed.
#[must_use]
pub fn find_booking_date(html: &str) -> Option<NaiveDate> {
    let label = DATE_LABEL_RE.captures_iter(html).nth(1)?.get(1)?.as_str();
    let text = TAG_RE.replace_all(label, " ");
    parse_booking_label(&text)
}

/// Parses the `<Month> <day>, <year>` date that follows the first `"for "`.
#[must_use]
pub fn parse_booking_label(text: &str) -> Option<NaiveDate> {
    let (_, rest) = text.split_once("for ")?;
    let mut tokens = rest.split_whitespace();
    let month = tokens.next()?;
    let day = tokens.next()?.trim_end_matches(',');
    let year: String = tokens
        .next()?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    NaiveDate::parse_from_str(&format!("{month} {day} {year}"), "%B %d %Y").ok()
}
