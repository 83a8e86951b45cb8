// src/pipeline/filter.rs

//! Listing filter.

use crate::models::{Listing, Region};

/// Keep listings for one duty on one data centre, preserving order.
///
/// Both comparisons are exact. An unknown data centre only matches the same
/// raw token.
pub fn filter_listings(listings: &[Listing], duty_name: &str, data_centre: &Region) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| l.duty_name == duty_name && &l.data_centre == data_centre)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataCentre, Lenient};
    use crate::services::ListingExtractor;
    use crate::services::fixtures::{listing_html, page};

    fn batch() -> Vec<Listing> {
        let html = page(&[
            listing_html("Raid", "Crystal", "1"),
            listing_html("Raid", "Aether", "2"),
            listing_html("Trial", "Crystal", "3"),
            listing_html("Raid", "Crystal", "4"),
            listing_html("raid", "Crystal", "5"),
            listing_html("Raid", "Shadow", "6"),
        ]);
        ListingExtractor::new().unwrap().extract(&html).unwrap()
    }

    #[test]
    fn test_filter_by_duty_and_data_centre() {
        let crystal = Lenient::Known(DataCentre::Crystal);
        let kept = filter_listings(&batch(), "Raid", &crystal);

        let expires: Vec<&str> = kept.iter().map(|l| l.expires.as_str()).collect();
        assert_eq!(expires, ["1", "4"]);
    }

    #[test]
    fn test_filter_matches_raw_data_centre() {
        let shadow = Lenient::Raw("Shadow".to_string());
        let kept = filter_listings(&batch(), "Raid", &shadow);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].expires, "6");
    }

    #[test]
    fn test_filter_no_match() {
        let light = Lenient::Known(DataCentre::Light);
        assert!(filter_listings(&batch(), "Raid", &light).is_empty());
        assert!(filter_listings(&[], "Raid", &light).is_empty());
    }
}
