// src/pipeline/tracker.rs

//! Update scheduler state.
//!
//! [`ListingTracker`] owns the latest filtered listings per tracked target.
//! `refresh` replaces that snapshot wholesale; `pending_updates` renders one
//! digest per target from it.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Config, Digest, DisplayConfig, Lenient, Listing, TrackedListing};
use crate::pipeline::filter_listings;
use crate::services::{DigestComposer, ListingExtractor, scrape_listings};
use crate::utils::ListingSource;

/// A rendered digest and the message it belongs in.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageUpdate {
    pub name: String,
    pub channel_id: u64,
    pub message_id: u64,
    pub digest: Digest,
}

pub struct ListingTracker {
    source: Box<dyn ListingSource>,
    extractor: ListingExtractor,
    display: DisplayConfig,
    targets: Vec<TrackedListing>,
    latest: HashMap<String, Vec<Listing>>,
}

impl ListingTracker {
    pub fn new(source: Box<dyn ListingSource>, config: &Config) -> Result<Self> {
        Ok(Self {
            source,
            extractor: ListingExtractor::new()?,
            display: config.display.clone(),
            targets: config.listings.clone(),
            latest: HashMap::new(),
        })
    }

    pub fn targets(&self) -> &[TrackedListing] {
        &self.targets
    }

    /// Scrape once and re-filter for every target.
    ///
    /// On error the previous snapshot is left untouched.
    pub async fn refresh(&mut self) -> Result<()> {
        let listings = scrape_listings(self.source.as_ref(), &self.extractor).await?;
        log::info!("Scraped {} listings", listings.len());

        self.latest = self
            .targets
            .iter()
            .map(|target| {
                let region = Lenient::Known(target.data_centre);
                let filtered = filter_listings(&listings, &target.duty_name, &region);
                log::debug!("{}: {} matching listings", target.name, filtered.len());
                (target.name.clone(), filtered)
            })
            .collect();
        Ok(())
    }

    /// One update per target covered by the last refresh, in config order.
    pub fn pending_updates(&self) -> impl Iterator<Item = MessageUpdate> + '_ {
        let composer = DigestComposer::new(&self.display);
        self.targets.iter().filter_map(move |target| {
            let listings = self.latest.get(&target.name)?;
            Some(MessageUpdate {
                name: target.name.clone(),
                channel_id: target.channel_id,
                message_id: target.message_id,
                digest: composer.compose(listings, &target.duty_name),
            })
        })
    }
}
