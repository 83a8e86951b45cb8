// src/services/listings.rs

//! Listing extraction service.
//!
//! Turns the listings page into [`Listing`] values. Unknown tokens and
//! missing text are tolerated and logged; malformed numbers are not.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{
    Category, DutyType, Listing, PartySlot, Region, Role, SlotCategory, SlotState,
};
use crate::utils::ListingSource;

/// Compiled selectors for the listings page markup.
struct ListingSelectors {
    listing: Selector,
    duty: Selector,
    description: Selector,
    slot: Selector,
    total: Selector,
    item_level: Selector,
    creator: Selector,
    world: Selector,
    expires: Selector,
    updated: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            listing: parse_selector("div.listing")?,
            duty: parse_selector("div.duty")?,
            description: parse_selector("div.description")?,
            slot: parse_selector("div.party div.slot")?,
            total: parse_selector("div.total")?,
            item_level: parse_selector("div.value")?,
            creator: parse_selector("div.item.creator span.text")?,
            world: parse_selector("div.item.world span.text")?,
            expires: parse_selector("div.item.expires span.text")?,
            updated: parse_selector("div.item.updated")?,
        })
    }
}

/// Service for extracting listings from the listings page.
pub struct ListingExtractor {
    selectors: ListingSelectors,
}

impl ListingExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: ListingSelectors::new()?,
        })
    }

    /// Extract every listing on the page, in page order.
    pub fn extract(&self, html: &str) -> Result<Vec<Listing>> {
        let document = Html::parse_document(html);

        log::debug!("Parsing listings...");
        let listings = document
            .select(&self.selectors.listing)
            .enumerate()
            .map(|(index, element)| self.parse_listing(index, &element))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Parsed {} listings", listings.len());
        Ok(listings)
    }

    fn parse_listing(&self, index: usize, element: &ElementRef) -> Result<Listing> {
        let sel = &self.selectors;
        let attrs = element.value();

        let data_centre = Region::parse(attrs.attr("data-centre").unwrap_or_default());
        if !data_centre.is_known() {
            log::error!("Unexpected Data Centre: {data_centre}");
        }

        let category = Category::parse(attrs.attr("data-pf-category").unwrap_or_default());
        if !category.is_known() {
            log::error!("Unexpected PF Category: {category}");
        }

        let (duty_name, duty_type) = match element.select(&sel.duty).next() {
            Some(duty) => {
                let duty_type = if duty.value().classes().any(|c| c == "cross") {
                    DutyType::Cross
                } else {
                    DutyType::Local
                };
                (text_of(&duty), duty_type)
            }
            None => {
                log::warn!("Listing #{index} has no duty element");
                (String::new(), DutyType::Local)
            }
        };

        let context = format!("listing #{index} ({duty_name})");

        let counts = self.required_text(element, &sel.total, &context, "party total")?;
        let (filled, total) = parse_counts(&counts, &context)?;

        let item_level = self.required_text(element, &sel.item_level, &context, "item level")?;
        let item_level = parse_number(&item_level, &context, "item level")?;

        let party = element
            .select(&sel.slot)
            .map(|slot| parse_slot(&slot))
            .collect();

        Ok(Listing {
            description: self.optional_text(element, &sel.description, &context, "description"),
            party,
            filled,
            total,
            item_level,
            creator: self.optional_text(element, &sel.creator, &context, "creator"),
            world: self.optional_text(element, &sel.world, &context, "world"),
            expires: self.optional_text(element, &sel.expires, &context, "expires"),
            updated: self.optional_text(element, &sel.updated, &context, "updated"),
            duty_name,
            duty_type,
            data_centre,
            category,
        })
    }

    /// Text of the first match; an empty string (and a warning) if absent.
    fn optional_text(
        &self,
        element: &ElementRef,
        selector: &Selector,
        context: &str,
        field: &str,
    ) -> String {
        match element.select(selector).next() {
            Some(found) => text_of(&found),
            None => {
                log::warn!("No {field} found for {context}");
                String::new()
            }
        }
    }

    /// Text of the first match; numeric fields cannot be substituted.
    fn required_text(
        &self,
        element: &ElementRef,
        selector: &Selector,
        context: &str,
        field: &str,
    ) -> Result<String> {
        element
            .select(selector)
            .next()
            .map(|found| text_of(&found))
            .ok_or_else(|| AppError::extract(context, format!("missing {field}")))
    }
}

fn parse_slot(slot: &ElementRef) -> PartySlot {
    let attrs = slot.value();

    let state = if attrs.classes().any(|c| c == "filled") {
        SlotState::Filled
    } else {
        SlotState::Open
    };
    let slot_category = SlotCategory::from_classes(attrs.classes());

    let roles = attrs
        .attr("title")
        .unwrap_or_default()
        .split_whitespace()
        .map(|token| {
            let role = Role::parse(token);
            if !role.is_known() {
                log::error!("Unexpected role found: {token}");
            }
            role
        })
        .collect();

    PartySlot {
        state,
        slot_category,
        roles,
    }
}

/// Parse a `filled/total` pair such as `3/8`.
fn parse_counts(text: &str, context: &str) -> Result<(u32, u32)> {
    let (filled, total) = text
        .split_once('/')
        .ok_or_else(|| AppError::extract(context, format!("malformed party total '{text}'")))?;
    Ok((
        parse_number(filled, context, "filled count")?,
        parse_number(total, context, "total count")?,
    ))
}

fn parse_number(text: &str, context: &str, field: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|e| AppError::extract(context, format!("invalid {field} '{text}': {e}")))
}

/// Concatenated text nodes, each trimmed.
///
/// Nodes are intentionally joined without a separator: `run, <b>be nice</b>`
/// reads `run,be nice`.
fn text_of(element: &ElementRef) -> String {
    element.text().map(str::trim).collect()
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Fetch the listings page and extract every listing on it.
pub async fn scrape_listings(
    source: &dyn ListingSource,
    extractor: &ListingExtractor,
) -> Result<Vec<Listing>> {
    let html = source.fetch().await?;
    extractor.extract(&html)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{DataCentre, Job, Lenient, PfCategory};

    /// One listing as it appears on the page.
    pub(crate) fn listing_html(duty: &str, centre: &str, expires: &str) -> String {
        format!(
            r#"
<div class="listing" data-centre="{centre}" data-pf-category="HighEndDuty">
  <div class="left">
    <div class="duty cross">{duty}</div>
    <div class="description"><span class="text">[Practice][Loot] Chill run, <b>be nice</b></span></div>
    <div class="party">
      <div class="slot filled tank" title="PLD"></div>
      <div class="slot healer" title="WHM AST"></div>
      <div class="slot dps" title="NIN SAM QQQ"></div>
      <div class="total">1/8</div>
    </div>
  </div>
  <div class="middle">
    <div class="stat"><div class="name">Min IL</div><div class="value"> 710 </div></div>
  </div>
  <div class="right meta">
    <div class="item creator"><span class="text">Some One</span></div>
    <div class="item world"><span class="text">Gilgamesh</span></div>
    <div class="item expires"><span class="icon">x</span><span class="text">{expires}</span></div>
    <div class="item updated"><span class="text">a minute ago</span></div>
  </div>
</div>"#
        )
    }

    pub(crate) fn page(listings: &[String]) -> String {
        format!(
            "<html><body><div id=\"listings\">{}</div></body></html>",
            listings.concat()
        )
    }

    #[test]
    fn test_extract_listing_fields() {
        let html = page(&[listing_html("The Omega Protocol (Ultimate)", "Crystal", "in 59 minutes")]);
        let listings = ListingExtractor::new().unwrap().extract(&html).unwrap();

        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.duty_name, "The Omega Protocol (Ultimate)");
        assert_eq!(listing.duty_type, DutyType::Cross);
        assert_eq!(listing.description, "[Practice][Loot] Chill run,be nice");
        assert_eq!((listing.filled, listing.total), (1, 8));
        assert_eq!(listing.item_level, 710);
        assert_eq!(listing.creator, "Some One");
        assert_eq!(listing.world, "Gilgamesh");
        assert_eq!(listing.expires, "in 59 minutes");
        assert_eq!(listing.updated, "a minute ago");
        assert_eq!(listing.data_centre, Lenient::Known(DataCentre::Crystal));
        assert_eq!(listing.category, Lenient::Known(PfCategory::HighEndDuty));
    }

    #[test]
    fn test_extract_party_slots_in_order() {
        let html = page(&[listing_html("Duty", "Crystal", "in 5 minutes")]);
        let listings = ListingExtractor::new().unwrap().extract(&html).unwrap();
        let party = &listings[0].party;

        assert_eq!(party.len(), 3);
        assert_eq!(party[0], PartySlot::filled(SlotCategory::Tank, Job::Pld));
        assert_eq!(party[1].state, SlotState::Open);
        assert_eq!(party[1].slot_category, SlotCategory::Healer);
        assert_eq!(
            party[1].roles,
            vec![Role::Known(Job::Whm), Role::Known(Job::Ast)]
        );
        // Unknown job tokens are kept, not dropped.
        assert_eq!(party[2].roles[2], Role::Raw("QQQ".to_string()));
    }

    #[test]
    fn test_extract_preserves_page_order() {
        let html = page(&[
            listing_html("First", "Crystal", "a"),
            listing_html("Second", "Aether", "b"),
            listing_html("Third", "Crystal", "c"),
        ]);
        let listings = ListingExtractor::new().unwrap().extract(&html).unwrap();
        let names: Vec<&str> = listings.iter().map(|l| l.duty_name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_unknown_data_centre_is_kept() {
        let html = page(&[listing_html("Duty", "Shadow", "a")]);
        let listings = ListingExtractor::new().unwrap().extract(&html).unwrap();
        assert_eq!(listings[0].data_centre, Lenient::Raw("Shadow".to_string()));
    }

    #[test]
    fn test_local_duty_and_missing_fields() {
        let html = page(&[r#"
<div class="listing" data-centre="Light" data-pf-category="Something New">
  <div class="duty local">Local Duty</div>
  <div class="party"><div class="slot filled dps"></div><div class="total">0/4</div></div>
  <div class="value">0</div>
</div>"#
            .to_string()]);
        let listings = ListingExtractor::new().unwrap().extract(&html).unwrap();
        let listing = &listings[0];

        assert_eq!(listing.duty_type, DutyType::Local);
        assert_eq!(listing.creator, "");
        assert_eq!(listing.description, "");
        assert_eq!(listing.category, Lenient::Raw("Something New".to_string()));
        assert!(listing.party[0].roles.is_empty());
    }

    // Malformed numbers abort the whole page rather than being substituted.
    #[test]
    fn test_malformed_count_is_fatal() {
        let html = page(&[listing_html("Duty", "Crystal", "a").replace("1/8", "one/8")]);
        let result = ListingExtractor::new().unwrap().extract(&html);
        assert!(matches!(result, Err(AppError::Extract { .. })));
    }

    #[test]
    fn test_malformed_item_level_is_fatal() {
        let html = page(&[listing_html("Duty", "Crystal", "a").replace(" 710 ", "high")]);
        let result = ListingExtractor::new().unwrap().extract(&html);
        assert!(matches!(result, Err(AppError::Extract { .. })));
    }

    #[test]
    fn test_empty_page_has_no_listings() {
        let listings = ListingExtractor::new().unwrap().extract("<html></html>").unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }
}
