//! Pipeline entry points for the listing watcher.
//!
//! - `filter_listings`: Narrow a scrape to one duty on one data centre
//! - `ListingTracker`: Latest filtered listings per tracked target
//! - `run_forever`: Refresh and update every message on a fixed period
//! - `setup_message`: Post the first message for a new target

pub mod filter;
pub mod run;
pub mod tracker;

pub use filter::filter_listings;
pub use run::{CycleSummary, NewListing, run_cycle, run_forever, setup_message};
pub use tracker::{ListingTracker, MessageUpdate};
