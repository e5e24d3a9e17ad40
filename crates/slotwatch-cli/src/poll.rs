//! The watch loop: retrieve, filter, notify, wait, repeat.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDateTime;
use slotwatch_core::{filter_in_range, Location};
use slotwatch_scraper::{LocationRetriever, PageSource, ScraperError};

use crate::notify::{Notification, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollState {
    Checking,
    Done,
}

#[derive(Debug, Clone)]
pub(crate) struct PollSettings {
    pub days: u32,
    pub interval: Duration,
    pub notify_timeout_secs: u32,
    /// Keep polling after the first burst, notifying only for new matches.
    pub keep_watching: bool,
}

pub(crate) fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub(crate) struct PollLoop<S, N> {
    retriever: LocationRetriever<S>,
    notifier: N,
    settings: PollSettings,
    clock: fn() -> NaiveDateTime,
    announced: HashSet<(String, Option<NaiveDateTime>)>,
}

impl<S: PageSource, N: Notifier> PollLoop<S, N> {
    pub(crate) fn new(retriever: LocationRetriever<S>, notifier: N, settings: PollSettings) -> Self {
        Self {
            retriever,
            notifier,
            settings,
            clock: local_now,
            announced: HashSet::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Runs checks until a burst of notifications is sent.
    ///
    /// Returns the number of checks performed. With `keep_watching` set this
    /// only returns when the process is stopped.
    pub(crate) async fn run(&mut self) -> u64 {
        let mut checks = 0u64;
        let mut state = PollState::Checking;
        while state == PollState::Checking {
            checks += 1;
            state = self.tick().await;
            if state == PollState::Checking {
                tokio::time::sleep(self.settings.interval).await;
            }
        }
        checks
    }

    /// Performs one check and returns the next state.
    ///
    /// Retrieval errors are transient: they are logged and the loop stays in
    /// [`PollState::Checking`]. A successful check forgets announced matches
    /// that are no longer listed, so a reopened slot is announced again.
    pub(crate) async fn tick(&mut self) -> PollState {
        let matches = match self.check_once().await {
            Ok(matches) => matches,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    retry_in_secs = self.settings.interval.as_secs(),
                    "check failed; retrying"
                );
                return PollState::Checking;
            }
        };

        let current: HashSet<_> = matches.iter().map(announce_key).collect();
        self.announced.retain(|key| current.contains(key));

        let fresh: Vec<Location> = matches
            .into_iter()
            .filter(|location| !self.announced.contains(&announce_key(location)))
            .collect();

        if fresh.is_empty() {
            tracing::info!(
                days = self.settings.days,
                retry_in_secs = self.settings.interval.as_secs(),
                "no appointments found"
            );
            return PollState::Checking;
        }

        self.announce(&fresh).await;

        if self.settings.keep_watching {
            self.announced.extend(fresh.iter().map(announce_key));
            PollState::Checking
        } else {
            PollState::Done
        }
    }

    /// One retrieval filtered to the configured window.
    pub(crate) async fn check_once(&self) -> Result<Vec<Location>, ScraperError> {
        let locations = self.retriever.fetch_locations().await?;
        Ok(filter_in_range(locations, self.settings.days, (self.clock)()))
    }

    async fn announce(&self, locations: &[Location]) {
        println!("\nAppointments found!\n");
        for location in locations {
            println!("{location}\n");
            let notification =
                Notification::for_location(location, self.settings.notify_timeout_secs);
            if let Err(err) = self.notifier.notify(&notification).await {
                tracing::warn!(
                    location = %location.name,
                    error = %err,
                    "failed to send notification"
                );
            }
        }
        tracing::info!(count = locations.len(), "appointments found");
    }
}

fn announce_key(location: &Location) -> (String, Option<NaiveDateTime>) {
    (location.name.clone(), location.next_appointment_date)
}

#[cfg(test)]
#[path = "poll_test.rs"]
mod tests;
