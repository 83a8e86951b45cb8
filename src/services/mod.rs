//! Service layer for the listing watcher.
//!
//! This module contains the business logic for:
//! - Listing extraction (`ListingExtractor`)
//! - Party roster rendering (`RosterRenderer`)
//! - Digest composition (`DigestComposer`)

mod digest;
mod listings;
mod roster;

pub use digest::{CAPTION_SIZE_LIMIT, DigestComposer, FIELDS_PER_LISTING, MAX_FIELDS, SIZE_LIMIT};
pub use listings::{ListingExtractor, scrape_listings};
pub use roster::RosterRenderer;

#[cfg(test)]
pub(crate) use listings::tests as fixtures;
