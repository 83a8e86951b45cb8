// src/models/mod.rs

//! Domain models for the party finder watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod digest;
mod known;
mod listing;
mod role;

// Re-export all public types
pub use config::{
    Config, DisplayConfig, GlyphConfig, HttpConfig, LoggingConfig, PairGlyphs,
    RoleCategoryGlyphs, SlotCategoryGlyphs, TrackedListing,
};
pub use digest::{BLANK_FIELD, Digest, DigestField};
pub use known::{KnownValue, Lenient};
pub use listing::{
    Category, DataCentre, DutyType, Listing, PartySlot, PfCategory, Region, SlotState,
    split_description,
};
pub use role::{Job, Role, RoleCategory, SlotCategory, role_category, slot_category};
