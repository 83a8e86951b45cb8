// src/pipeline/run.rs

//! Orchestration: the periodic update loop and one-shot message setup.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{Config, DataCentre, Lenient, TrackedListing};
use crate::pipeline::{ListingTracker, MessageUpdate, filter_listings};
use crate::services::{DigestComposer, ListingExtractor, scrape_listings};
use crate::sink::MessageSink;
use crate::utils::ListingSource;

/// Outcome of one refresh-and-dispatch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub updated: usize,
    /// Destination channel or message no longer exists
    pub skipped: usize,
    pub failed: usize,
}

/// Refresh once and push every pending update to the sink.
///
/// A failed refresh aborts the cycle. Failures for a single target are
/// logged and counted; the remaining targets still go out.
pub async fn run_cycle(tracker: &mut ListingTracker, sink: &dyn MessageSink) -> Result<CycleSummary> {
    tracker.refresh().await?;

    let mut summary = CycleSummary::default();
    for update in tracker.pending_updates() {
        match publish(sink, &update).await {
            Ok(true) => summary.updated += 1,
            Ok(false) => summary.skipped += 1,
            Err(e) => {
                log::error!("Failed to update '{}': {e}", update.name);
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "Cycle done: {} updated, {} skipped, {} failed",
        summary.updated,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

/// Replace the target's message. `Ok(false)` when there is nothing to replace.
async fn publish(sink: &dyn MessageSink, update: &MessageUpdate) -> Result<bool> {
    let Some(handle) = sink
        .fetch_existing(update.channel_id, update.message_id)
        .await?
    else {
        log::warn!(
            "Skipping '{}': message {} in channel {} not found",
            update.name,
            update.message_id,
            update.channel_id
        );
        return Ok(false);
    };

    sink.replace(&handle, &update.digest).await?;
    Ok(true)
}

/// Run cycles forever, sleeping `period` between them.
///
/// A failed cycle is retried on the next period.
pub async fn run_forever(mut tracker: ListingTracker, sink: &dyn MessageSink, period: Duration) {
    log::info!(
        "Tracking {} listings every {}s",
        tracker.targets().len(),
        period.as_secs()
    );
    loop {
        if let Err(e) = run_cycle(&mut tracker, sink).await {
            log::error!("Refresh failed: {e}");
        }
        tokio::time::sleep(period).await;
    }
}

/// A listing to start tracking.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub name: String,
    pub duty_name: String,
    pub data_centre: DataCentre,
    pub channel_id: u64,
}

/// Post a fresh digest for a new target and add it to `config`.
///
/// `config` is only modified once the message has been posted. Saving it is
/// left to the caller.
pub async fn setup_message(
    config: &mut Config,
    source: &dyn ListingSource,
    sink: &dyn MessageSink,
    new: NewListing,
) -> Result<TrackedListing> {
    let mut tracked = TrackedListing {
        name: new.name,
        duty_name: new.duty_name,
        data_centre: new.data_centre,
        channel_id: new.channel_id,
        message_id: 0,
    };
    tracked.validate()?;
    if config.listing(&tracked.name).is_some() {
        return Err(AppError::validation(format!(
            "a listing named '{}' already exists",
            tracked.name
        )));
    }

    let extractor = ListingExtractor::new()?;
    let listings = scrape_listings(source, &extractor).await?;
    let filtered = filter_listings(
        &listings,
        &tracked.duty_name,
        &Lenient::Known(tracked.data_centre),
    );
    let digest = DigestComposer::new(&config.display).compose(&filtered, &tracked.duty_name);

    tracked.message_id = sink.send_new(tracked.channel_id, &digest).await?;
    log::info!(
        "Now tracking '{}' in message {}",
        tracked.name,
        tracked.message_id
    );

    config.listings.push(tracked.clone());
    Ok(tracked)
}
