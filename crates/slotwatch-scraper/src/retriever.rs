//! One full retrieval pass: fetch, scan, join, build.

use std::sync::LazyLock;

use regex::Regex;
use slotwatch_core::Location;

use crate::dataset::{get_matching_time, parse};
use crate::error::ScraperError;
use crate::factory::{create_location, NO_APPOINTMENTS};
use crate::scan::{find_dataset, LOCATION_DATA_PATTERN, TIME_DATA_PATTERN};
use crate::source::PageSource;

static LOCATION_DATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOCATION_DATA_PATTERN).expect("valid regex"));
static TIME_DATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_DATA_PATTERN).expect("valid regex"));

/// Produces every location that currently has an open appointment.
pub struct LocationRetriever<S> {
    source: S,
}

impl<S: PageSource> LocationRetriever<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches the page once and builds its locations.
    ///
    /// # Errors
    ///
    /// See [`locations_from_blocks`].
    pub async fn fetch_locations(&self) -> Result<Vec<Location>, ScraperError> {
        let blocks = self.source.fetch_blocks().await;
        locations_from_blocks(&blocks)
    }
}

/// Builds locations from already-fetched page blocks.
///
/// Locations without a time record, with no appointments, or failing
/// validation are skipped; the rest of the batch is still returned.
///
/// # Errors
///
/// - [`ScraperError::DataNotFound`] when either dataset is missing from the
///   page, the page is empty, or the joined data is empty or was discarded.
/// - [`ScraperError::MalformedData`] when a dataset is not valid JSON.
pub fn locations_from_blocks(blocks: &[String]) -> Result<Vec<Location>, ScraperError> {
    let location_data = find_dataset(blocks, &LOCATION_DATA_RE)?;
    let time_data = find_dataset(blocks, &TIME_DATA_RE)?;
    let (Some(location_data), Some(time_data)) = (location_data, time_data) else {
        return Err(ScraperError::DataNotFound(
            "page had no blocks to scan".to_string(),
        ));
    };

    let joined = parse(Some(&location_data), Some(&time_data))?
        .filter(|joined| !joined.locations.is_empty() && !joined.times.is_empty())
        .ok_or_else(|| {
            ScraperError::DataNotFound("no joinable location and time records".to_string())
        })?;

    let mut locations = Vec::new();
    for info in &joined.locations {
        let Some(time) = get_matching_time(info, &joined.times) else {
            continue;
        };

        if time.first_open_slot.as_deref() == Some(NO_APPOINTMENTS) {
            tracing::debug!(location_id = ?info.join_key(), "no appointments available");
            continue;
        }

        if let Some(location) = create_location(info, time) {
            locations.push(location);
        }
    }

    tracing::info!(
        total = joined.locations.len(),
        available = locations.len(),
        "retrieved locations"
    );
    Ok(locations)
}

#[cfg(test)]
#[path = "retriever_test.rs"]
mod tests;
