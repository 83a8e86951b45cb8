// src/models/role.rs

//! Jobs and their combat groupings.
//!
//! Classification is table-driven: [`JOB_TABLE`] is the only place that
//! knows which job belongs to which group, so a new job is a one-line
//! addition. Anything missing from the table (gatherers, crafters, tokens
//! the page invented after this crate was built) classifies as `Other`.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::known::{Lenient, known_values};

known_values! {
    /// A playable job code as shown on the listings page.
    pub enum Job {
        Gla => "GLA",
        Pgl => "PGL",
        Mrd => "MRD",
        Lnc => "LNC",
        Arc => "ARC",
        Cnj => "CNJ",
        Thm => "THM",
        Pld => "PLD",
        Mnk => "MNK",
        War => "WAR",
        Drg => "DRG",
        Brd => "BRD",
        Whm => "WHM",
        Blm => "BLM",
        Acn => "ACN",
        Smn => "SMN",
        Sch => "SCH",
        Rog => "ROG",
        Nin => "NIN",
        Mch => "MCH",
        Drk => "DRK",
        Ast => "AST",
        Sam => "SAM",
        Rdm => "RDM",
        Blu => "BLU",
        Gnb => "GNB",
        Dnc => "DNC",
        Rpr => "RPR",
        Sge => "SGE",
        Vpr => "VPR",
        Pct => "PCT",
        Btn => "BTN",
        Min => "MIN",
        Fsh => "FSH",
        Crp => "CRP",
        Bsm => "BSM",
        Arm => "ARM",
        Gsm => "GSM",
        Ltw => "LTW",
        Wvr => "WVR",
        Alc => "ALC",
        Cul => "CUL",
    }
}

/// A job token from a party slot; unknown tokens are kept verbatim.
pub type Role = Lenient<Job>;

/// Coarse grouping of jobs by combat function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Tank,
    RegenHealer,
    ShieldHealer,
    MeleeDps,
    RangedDps,
    MagicalDps,
    Other,
}

/// Three-way grouping used by party slots on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Dps,
    Healer,
    Tank,
    Other,
}

impl SlotCategory {
    /// Resolve a slot's category from its CSS classes.
    pub fn from_classes<'a>(classes: impl Iterator<Item = &'a str>) -> Self {
        let classes: Vec<&str> = classes.collect();
        if classes.contains(&"dps") {
            SlotCategory::Dps
        } else if classes.contains(&"healer") {
            SlotCategory::Healer
        } else if classes.contains(&"tank") {
            SlotCategory::Tank
        } else {
            SlotCategory::Other
        }
    }
}

/// Every combat job with its role and slot category.
const JOB_TABLE: &[(Job, RoleCategory, SlotCategory)] = &[
    (Job::Gla, RoleCategory::Tank, SlotCategory::Tank),
    (Job::Mrd, RoleCategory::Tank, SlotCategory::Tank),
    (Job::Pld, RoleCategory::Tank, SlotCategory::Tank),
    (Job::War, RoleCategory::Tank, SlotCategory::Tank),
    (Job::Drk, RoleCategory::Tank, SlotCategory::Tank),
    (Job::Gnb, RoleCategory::Tank, SlotCategory::Tank),
    (Job::Cnj, RoleCategory::RegenHealer, SlotCategory::Healer),
    (Job::Whm, RoleCategory::RegenHealer, SlotCategory::Healer),
    (Job::Ast, RoleCategory::RegenHealer, SlotCategory::Healer),
    (Job::Sch, RoleCategory::ShieldHealer, SlotCategory::Healer),
    (Job::Sge, RoleCategory::ShieldHealer, SlotCategory::Healer),
    (Job::Pgl, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Lnc, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Rog, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Mnk, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Drg, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Nin, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Sam, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Rpr, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Vpr, RoleCategory::MeleeDps, SlotCategory::Dps),
    (Job::Arc, RoleCategory::RangedDps, SlotCategory::Dps),
    (Job::Brd, RoleCategory::RangedDps, SlotCategory::Dps),
    (Job::Mch, RoleCategory::RangedDps, SlotCategory::Dps),
    (Job::Dnc, RoleCategory::RangedDps, SlotCategory::Dps),
    (Job::Thm, RoleCategory::MagicalDps, SlotCategory::Dps),
    (Job::Acn, RoleCategory::MagicalDps, SlotCategory::Dps),
    (Job::Blm, RoleCategory::MagicalDps, SlotCategory::Dps),
    (Job::Smn, RoleCategory::MagicalDps, SlotCategory::Dps),
    (Job::Rdm, RoleCategory::MagicalDps, SlotCategory::Dps),
    (Job::Pct, RoleCategory::MagicalDps, SlotCategory::Dps),
    (Job::Blu, RoleCategory::MagicalDps, SlotCategory::Dps),
];

static JOB_LOOKUP: LazyLock<HashMap<Job, (RoleCategory, SlotCategory)>> = LazyLock::new(|| {
    JOB_TABLE
        .iter()
        .map(|&(job, role, slot)| (job, (role, slot)))
        .collect()
});

fn classify(role: &Role) -> Option<(RoleCategory, SlotCategory)> {
    role.known().and_then(|job| JOB_LOOKUP.get(&job).copied())
}

/// Role category of a job token. Unlisted and unknown roles are `Other`.
pub fn role_category(role: &Role) -> RoleCategory {
    classify(role).map_or(RoleCategory::Other, |(category, _)| category)
}

/// Slot category of a job token. Unlisted and unknown roles are `Other`.
pub fn slot_category(role: &Role) -> SlotCategory {
    classify(role).map_or(SlotCategory::Other, |(_, category)| category)
}
