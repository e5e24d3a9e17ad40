//! Command handlers called from `main` once configuration is loaded.

use std::time::Duration;

use anyhow::Context;
use slotwatch_core::{filter_in_range, AppConfig};
use slotwatch_scraper::{
    extract_location_ids, find_booking_date, HttpPageSource, LocationRetriever,
};

use crate::notify::DefaultNotifier;
use crate::poll::{local_now, PollLoop, PollSettings};

fn build_page_source(config: &AppConfig) -> anyhow::Result<HttpPageSource> {
    HttpPageSource::new(
        &config.page_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build HTTP client")
}

/// Poll the booking page until an appointment opens within `days`.
///
/// # Errors
///
/// Returns an error only if the HTTP clients cannot be constructed; failed
/// checks are retried inside the loop.
pub(crate) async fn run_watch(
    config: &AppConfig,
    days: u32,
    interval_secs: u64,
    keep_watching: bool,
) -> anyhow::Result<()> {
    let source = build_page_source(config)?;
    let notifier =
        DefaultNotifier::from_config(config).context("failed to build webhook notifier")?;

    println!("Starting continuous search for appointments within the next {days} days...");
    tracing::info!(
        page_url = %config.page_url,
        days,
        interval_secs,
        keep_watching,
        "watch started"
    );

    let mut poll = PollLoop::new(
        LocationRetriever::new(source),
        notifier,
        PollSettings {
            days,
            interval: Duration::from_secs(interval_secs),
            notify_timeout_secs: config.notify_timeout_secs,
            keep_watching,
        },
    );
    let checks = poll.run().await;
    tracing::info!(checks, "watch finished");
    Ok(())
}

/// Run a single retrieval and print locations with appointments in range.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or parsed.
pub(crate) async fn run_check(config: &AppConfig, days: u32) -> anyhow::Result<()> {
    let retriever = LocationRetriever::new(build_page_source(config)?);
    let locations = retriever
        .fetch_locations()
        .await
        .with_context(|| format!("failed to retrieve locations from {}", config.page_url))?;
    let matches = filter_in_range(locations, days, local_now());

    if matches.is_empty() {
        println!("No appointments found within the next {days} days.");
        return Ok(());
    }

    for location in &matches {
        println!("{location}\n");
    }
    println!("{} locations with appointments in range", matches.len());
    Ok(())
}

/// Print every location id referenced by the booking page.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched.
pub(crate) async fn run_ids(config: &AppConfig) -> anyhow::Result<()> {
    let source = build_page_source(config)?;
    let html = source.fetch_html(source.page_url()).await?;
    let ids = extract_location_ids(&html);

    if ids.is_empty() {
        println!("No location ids found.");
        return Ok(());
    }
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

/// Print the booking date shown on one location's page.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or carries no date.
pub(crate) async fn run_date(config: &AppConfig, location_id: i64) -> anyhow::Result<()> {
    let source = build_page_source(config)?;
    let url = config.location_page_url(location_id);
    let html = source.fetch_html(&url).await?;
    let date = find_booking_date(&html)
        .ok_or_else(|| anyhow::anyhow!("no booking date found on {url}"))?;
    println!("{}", date.format("%m/%d/%Y"));
    Ok(())
}
