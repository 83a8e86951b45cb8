// src/models/listing.rs

//! A scraped party finder listing and its party composition.

use serde::Serialize;

use super::known::{Lenient, known_values};
use super::role::{Role, SlotCategory};

known_values! {
    /// Data centre a listing is advertised on.
    pub enum DataCentre {
        Crystal => "Crystal",
        Dynamis => "Dynamis",
        Light => "Light",
        Materia => "Materia",
        Gaia => "Gaia",
        Meteor => "Meteor",
        Chaos => "Chaos",
        Primal => "Primal",
        Elemental => "Elemental",
        Mana => "Mana",
        Aether => "Aether",
    }
}

known_values! {
    /// Party finder category tag.
    pub enum PfCategory {
        Raids => "Raids",
        DutyRoulette => "DutyRoulette",
        GatheringForays => "GatheringForays",
        Unset => "None",
        DeepDungeons => "DeepDungeons",
        Fates => "Fates",
        VAndCDungeonFinder => "V&C Dungeon Finder",
        Dungeons => "Dungeons",
        TreasureHunt => "TreasureHunt",
        TheHunt => "TheHunt",
        Pvp => "Pvp",
        HighEndDuty => "HighEndDuty",
        Trials => "Trials",
        AdventuringForays => "AdventuringForays",
        Guildhests => "Guildhests",
    }
}

/// Region a listing was scraped from; unknown data centres are kept verbatim.
pub type Region = Lenient<DataCentre>;

/// Category tag of a listing; unknown tags are kept verbatim.
pub type Category = Lenient<PfCategory>;

/// Whether a duty is open cross-world or limited to the local world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DutyType {
    Cross,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Filled,
    Open,
}

/// One seat in a listing's party.
///
/// A filled slot holds the occupant's job as its only role. An open slot
/// lists every job that may join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartySlot {
    pub state: SlotState,
    pub slot_category: SlotCategory,
    pub roles: Vec<Role>,
}

impl PartySlot {
    pub fn filled(slot_category: SlotCategory, role: impl Into<Role>) -> Self {
        Self {
            state: SlotState::Filled,
            slot_category,
            roles: vec![role.into()],
        }
    }

    pub fn open(slot_category: SlotCategory, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            state: SlotState::Open,
            slot_category,
            roles: roles.into_iter().collect(),
        }
    }
}

/// A single found-party advertisement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub duty_name: String,
    pub duty_type: DutyType,
    /// Bracketed tags followed by free text, e.g. `[Practice][Duty Completion] ...`
    pub description: String,
    pub party: Vec<PartySlot>,
    pub filled: u32,
    pub total: u32,
    pub item_level: u32,
    pub creator: String,
    pub world: String,
    /// Expiry as displayed on the page, e.g. `in 59 minutes`
    pub expires: String,
    /// Last update as displayed on the page, e.g. `a minute ago`
    pub updated: String,
    pub data_centre: Region,
    pub category: Category,
}

impl Listing {
    /// Split the description at its last `]` into the tag block and the text.
    pub fn split_description(&self) -> (&str, &str) {
        split_description(&self.description)
    }
}

/// Split a description at its last `]` into the tag block and the text.
///
/// Without any `]` the tag block is empty and the whole string is text.
pub fn split_description(description: &str) -> (&str, &str) {
    match description.rfind(']') {
        Some(pos) => (
            description[..=pos].trim(),
            description[pos + 1..].trim(),
        ),
        None => ("", description.trim()),
    }
}
