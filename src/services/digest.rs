// src/services/digest.rs

//! Digest composition service.
//!
//! Lays out a batch of listings as a single message body that fits within
//! Discord's embed limits.

use crate::models::{Digest, DisplayConfig, Listing};
use crate::services::RosterRenderer;

/// Discord allows 25 fields; each listing takes three.
pub const MAX_FIELDS: usize = 24;

/// Fields contributed by every listing.
pub const FIELDS_PER_LISTING: usize = 3;

/// Discord's total embed size limit.
pub const SIZE_LIMIT: usize = 6000;

/// Size limit checked again once the overflow caption is set.
pub const CAPTION_SIZE_LIMIT: usize = 5999;

/// Service for composing digests from filtered listings.
pub struct DigestComposer<'a> {
    display: &'a DisplayConfig,
    renderer: RosterRenderer<'a>,
}

impl<'a> DigestComposer<'a> {
    pub fn new(display: &'a DisplayConfig) -> Self {
        Self {
            display,
            renderer: RosterRenderer::new(&display.glyphs),
        }
    }

    /// Compose the digest for one tracked listing.
    ///
    /// Listings are ordered by their expiry text, descending. This compares
    /// the displayed strings, not durations: `"in 6 minutes"` sorts before
    /// `"in 59 minutes"`, which sorts before `"in 5 minutes"`.
    pub fn compose(&self, listings: &[Listing], title: &str) -> Digest {
        let mut digest = Digest::new(title, self.display.color);

        if listings.is_empty() {
            digest.description = Some(self.display.empty_message.clone());
            return digest;
        }

        let mut sorted: Vec<&Listing> = listings.iter().collect();
        sorted.sort_by(|a, b| b.expires.cmp(&a.expires));

        let mut shown = 0;
        for listing in sorted {
            if digest.fields.len() >= MAX_FIELDS {
                break;
            }

            self.push_listing(&mut digest, listing);
            if digest.size() > SIZE_LIMIT {
                digest.truncate_fields(FIELDS_PER_LISTING);
                break;
            }
            shown += 1;
        }

        let mut remaining = listings.len() - shown;
        if remaining == 0 {
            return digest;
        }

        digest.footer = Some(overflow_caption(remaining));
        while digest.size() > CAPTION_SIZE_LIMIT && shown > 0 {
            digest.truncate_fields(FIELDS_PER_LISTING);
            shown -= 1;
            remaining += 1;
            digest.footer = Some(overflow_caption(remaining));
        }

        digest
    }

    fn push_listing(&self, digest: &mut Digest, listing: &Listing) {
        let (tags, text) = listing.split_description();

        digest.push_field(&listing.creator, self.renderer.render(&listing.party), true);
        digest.push_field(tags, text, true);
        digest.push_field(
            format!("{} {}", self.display.updated_glyph, listing.updated),
            format!("{} {}", self.display.expires_glyph, listing.expires),
            true,
        );
    }
}

fn overflow_caption(remaining: usize) -> String {
    format!("And {remaining} more party finders that didn't fit")
}
