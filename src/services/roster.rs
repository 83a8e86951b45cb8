// src/services/roster.rs

//! Roster rendering service.
//!
//! Draws a party as one glyph per slot. Filled slots show the occupant's
//! job; open slots collapse their list of eligible jobs into the most
//! specific glyph that still covers all of them.

use std::collections::BTreeSet;

use crate::models::{
    GlyphConfig, PartySlot, Role, RoleCategory, SlotCategory, SlotState, role_category,
    slot_category,
};

/// One tier of open-slot resolution. `None` means "inconclusive, try the next tier".
type Resolver = for<'g> fn(&'g GlyphConfig, &[Role]) -> Option<&'g str>;

/// Open-slot tiers, most specific first.
const OPEN_SLOT_RESOLVERS: &[Resolver] = &[
    resolve_no_roles,
    resolve_single_role,
    resolve_role_category,
    resolve_slot_categories,
];

/// Renders party compositions with a fixed glyph table.
pub struct RosterRenderer<'a> {
    glyphs: &'a GlyphConfig,
}

impl<'a> RosterRenderer<'a> {
    pub fn new(glyphs: &'a GlyphConfig) -> Self {
        Self { glyphs }
    }

    /// Render a party, one glyph per slot separated by single spaces.
    pub fn render(&self, party: &[PartySlot]) -> String {
        party
            .iter()
            .map(|slot| self.slot_glyph(slot))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn slot_glyph(&self, slot: &PartySlot) -> &'a str {
        match slot.state {
            SlotState::Filled => self.filled_glyph(slot),
            SlotState::Open => self.open_glyph(&slot.roles),
        }
    }

    fn filled_glyph(&self, slot: &PartySlot) -> &'a str {
        let glyphs = self.glyphs;
        let Some(role) = slot.roles.first() else {
            log::warn!("No roles for a filled slot? Will use slot category instead.");
            return glyphs
                .slot_category(slot.slot_category)
                .unwrap_or(glyphs.other.as_str());
        };
        if slot.roles.len() > 1 {
            log::warn!("More than one role for a filled slot? Will use first role.");
        }
        glyphs.role(role).unwrap_or(glyphs.other.as_str())
    }

    fn open_glyph(&self, roles: &[Role]) -> &'a str {
        let glyphs = self.glyphs;
        if let Some(glyph) = OPEN_SLOT_RESOLVERS
            .iter()
            .find_map(|resolve| resolve(glyphs, roles))
        {
            return glyph;
        }

        let tokens: Vec<&str> = roles.iter().map(Role::as_str).collect();
        log::warn!("Could not classify open slot with roles {tokens:?}");
        glyphs.other.as_str()
    }
}

fn resolve_no_roles<'g>(glyphs: &'g GlyphConfig, roles: &[Role]) -> Option<&'g str> {
    roles.is_empty().then_some(glyphs.other.as_str())
}

fn resolve_single_role<'g>(glyphs: &'g GlyphConfig, roles: &[Role]) -> Option<&'g str> {
    match roles {
        [role] => glyphs.role(role),
        _ => None,
    }
}

fn resolve_role_category<'g>(glyphs: &'g GlyphConfig, roles: &[Role]) -> Option<&'g str> {
    let categories: BTreeSet<RoleCategory> = roles.iter().map(role_category).collect();

    if categories.contains(&RoleCategory::Other) {
        return Some(glyphs.other.as_str());
    }
    let categories: Vec<RoleCategory> = categories.into_iter().collect();
    match categories.as_slice() {
        [category] => glyphs.role_category(*category),
        _ => None,
    }
}

fn resolve_slot_categories<'g>(glyphs: &'g GlyphConfig, roles: &[Role]) -> Option<&'g str> {
    let categories: BTreeSet<SlotCategory> = roles.iter().map(slot_category).collect();

    if categories.contains(&SlotCategory::Other) {
        return Some(glyphs.other.as_str());
    }
    let categories: Vec<SlotCategory> = categories.into_iter().collect();
    match categories.as_slice() {
        [category] => glyphs.slot_category(*category),
        [a, b] => glyphs.pair(*a, *b),
        [_, _, _] => Some(glyphs.any.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn glyphs() -> GlyphConfig {
        let mut glyphs = GlyphConfig::default();
        glyphs.roles.clear();
        glyphs.roles.insert("WHM".to_string(), "<:whm:1>".to_string());
        glyphs.roles.insert("SAM".to_string(), "<:sam:2>".to_string());
        glyphs.other = "OTHER".to_string();
        glyphs.any = "ANY".to_string();
        glyphs.role_categories.tank = "RC_TANK".to_string();
        glyphs.role_categories.regen_healer = "RC_REGEN".to_string();
        glyphs.role_categories.shield_healer = "RC_SHIELD".to_string();
        glyphs.role_categories.melee_dps = "RC_MELEE".to_string();
        glyphs.slot_categories.dps = "SC_DPS".to_string();
        glyphs.slot_categories.healer = "SC_HEALER".to_string();
        glyphs.slot_categories.tank = "SC_TANK".to_string();
        glyphs.pairs.dps_healer = "P_DH".to_string();
        glyphs.pairs.dps_tank = "P_DT".to_string();
        glyphs.pairs.healer_tank = "P_HT".to_string();
        glyphs
    }

    fn open(jobs: &[Job]) -> PartySlot {
        PartySlot::open(SlotCategory::Other, jobs.iter().map(|j| Role::Known(*j)))
    }

    #[test]
    fn test_filled_slot_uses_role_glyph() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        assert_eq!(
            renderer.slot_glyph(&PartySlot::filled(SlotCategory::Healer, Job::Whm)),
            "<:whm:1>"
        );
    }

    #[test]
    fn test_filled_slot_without_glyph_is_other() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        assert_eq!(
            renderer.slot_glyph(&PartySlot::filled(SlotCategory::Tank, Job::Pld)),
            "OTHER"
        );
    }

    #[test]
    fn test_filled_slot_without_roles_uses_slot_category() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        let mut slot = PartySlot::filled(SlotCategory::Tank, Job::Pld);
        slot.roles.clear();
        assert_eq!(renderer.slot_glyph(&slot), "SC_TANK");

        slot.slot_category = SlotCategory::Other;
        assert_eq!(renderer.slot_glyph(&slot), "OTHER");
    }

    #[test]
    fn test_filled_slot_with_many_roles_uses_first() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        let mut slot = PartySlot::filled(SlotCategory::Dps, Job::Sam);
        slot.roles.push(Role::Known(Job::Whm));
        assert_eq!(renderer.slot_glyph(&slot), "<:sam:2>");
    }

    #[test]
    fn test_open_slot_without_roles_is_other() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        assert_eq!(renderer.slot_glyph(&open(&[])), "OTHER");
    }

    #[test]
    fn test_open_single_role_override() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        assert_eq!(renderer.slot_glyph(&open(&[Job::Sam])), "<:sam:2>");
    }

    #[test]
    fn test_open_single_role_without_override_uses_role_category() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        assert_eq!(renderer.slot_glyph(&open(&[Job::Nin])), "RC_MELEE");
    }

    #[test]
    fn test_open_single_role_category() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        let tanks = open(&[Job::Pld, Job::War, Job::Drk, Job::Gnb]);
        assert_eq!(renderer.slot_glyph(&tanks), "RC_TANK");
        assert_eq!(
            renderer.slot_glyph(&open(&[Job::Sch, Job::Sge])),
            "RC_SHIELD"
        );
    }

    #[test]
    fn test_open_healers_collapse_to_slot_category() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        let healers = open(&[Job::Whm, Job::Sch, Job::Ast, Job::Sge]);
        assert_eq!(renderer.slot_glyph(&healers), "SC_HEALER");
    }

    #[test]
    fn test_open_pair_is_order_independent() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        assert_eq!(renderer.slot_glyph(&open(&[Job::Pld, Job::Nin])), "P_DT");
        assert_eq!(renderer.slot_glyph(&open(&[Job::Nin, Job::Pld])), "P_DT");
        assert_eq!(
            renderer.slot_glyph(&open(&[Job::Whm, Job::Drk, Job::Sge])),
            "P_HT"
        );
        assert_eq!(renderer.slot_glyph(&open(&[Job::Brd, Job::Sch])), "P_DH");
    }

    #[test]
    fn test_open_all_categories_is_any() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        let anyone = open(&[Job::Pld, Job::Whm, Job::Blm, Job::Mch]);
        assert_eq!(renderer.slot_glyph(&anyone), "ANY");
    }

    #[test]
    fn test_open_with_unknown_role_is_other() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        let slot = PartySlot::open(
            SlotCategory::Dps,
            [Role::Known(Job::Nin), Role::Raw("XYZ".to_string())],
        );
        assert_eq!(renderer.slot_glyph(&slot), "OTHER");

        let mixed = open(&[Job::Pld, Job::Crp]);
        assert_eq!(renderer.slot_glyph(&mixed), "OTHER");
    }

    #[test]
    fn test_render_joins_in_slot_order() {
        let glyphs = glyphs();
        let renderer = RosterRenderer::new(&glyphs);
        let party = vec![
            PartySlot::filled(SlotCategory::Dps, Job::Sam),
            PartySlot::filled(SlotCategory::Healer, Job::Whm),
            open(&[Job::Pld, Job::War]),
            open(&[]),
        ];
        assert_eq!(renderer.render(&party), "<:sam:2> <:whm:1> RC_TANK OTHER");
        assert_eq!(renderer.render(&[]), "");
    }
}
