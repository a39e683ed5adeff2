//! Hotel offers.

use chrono::Days;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use crate::reference::ReferenceData;

use super::{Offer, PLACEHOLDER, SearchOutcome, SearchQuery, SynthError, Unavailable, pick, round_to, sort_by_price};

const CANCELLATION: [&str; 3] = ["Free cancellation", "Non-refundable", "Flexible"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelOffer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stars: u8,
    pub location: String,
    pub price_per_night_inr: f64,
    pub total_price_inr: f64,
    pub nights: u32,
    pub checkin: String,
    pub checkout: String,
    pub rating: f64,
    pub reviews_count: u32,
    pub amenities: Vec<String>,
    pub cancellation: String,
    pub breakfast_included: bool,
    pub distance_to_center: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Offer for HotelOffer {
    fn price_inr(&self) -> f64 {
        self.price_per_night_inr
    }

    fn provider(&self) -> &str {
        &self.name
    }

    fn placeholder(u: &Unavailable) -> Self {
        Self {
            name: "No Hotels".to_string(),
            kind: PLACEHOLDER.to_string(),
            stars: 0,
            location: u.destination.clone(),
            price_per_night_inr: 0.0,
            total_price_inr: 0.0,
            nights: 0,
            checkin: u.date.to_string(),
            checkout: PLACEHOLDER.to_string(),
            rating: 0.0,
            reviews_count: 0,
            amenities: Vec::new(),
            cancellation: PLACEHOLDER.to_string(),
            breakfast_included: false,
            distance_to_center: PLACEHOLDER.to_string(),
            note: Some(u.note.clone()),
        }
    }
}

/// Generate hotel offers at the destination.
///
/// There is no route step: the nightly rate comes straight from the tier's
/// range, nudged up for stars above the band's floor, and the total is the
/// nightly rate times the assumed stay.
pub fn generate_hotels(
    query: &SearchQuery,
    reference: &ReferenceData,
    rng: &mut StdRng,
) -> Result<SearchOutcome<HotelOffer>, SynthError> {
    let catalog = &reference.catalog;
    let band = catalog.hotel_bands.get(query.tier);
    let chains = catalog.hotel_chains_for(query.tier);
    let context = format!("{} tier", query.tier);
    let place = reference.locations.display_name(&query.destination);

    let checkin = query.departure_date;
    let checkout = query
        .return_date
        .filter(|r| *r > checkin)
        .or_else(|| checkin.checked_add_days(Days::new(u64::from(query.stay_nights))))
        .unwrap_or(checkin);

    let count = rng.random_range(4..=7);
    let mut offers = Vec::with_capacity(count);

    for _ in 0..count {
        let chain = *pick(rng, &chains, "hotel chains", &context)?;
        let (low, high) = band.nightly_inr;
        let star_bonus = 1.0 + 0.1 * f64::from(chain.stars.saturating_sub(*band.stars.start()));
        let nightly = round_to(rng.random_range(low..=high) * star_bonus, 2);

        let mut amenities = catalog.hotel_amenities.clone();
        amenities.shuffle(rng);
        amenities.truncate(rng.random_range(4..=10));

        let cancellation = CANCELLATION.choose(rng).copied().unwrap_or(PLACEHOLDER);

        offers.push(HotelOffer {
            name: format!("{} {}", chain.name, place),
            kind: chain.kind.clone(),
            stars: chain.stars,
            location: format!("Downtown {place}"),
            price_per_night_inr: nightly,
            total_price_inr: round_to(nightly * f64::from(query.stay_nights), 2),
            nights: query.stay_nights,
            checkin: checkin.to_string(),
            checkout: checkout.to_string(),
            rating: round_to(rng.random_range(3.5..=5.0), 1),
            reviews_count: rng.random_range(120..=5000),
            amenities,
            cancellation: cancellation.to_string(),
            breakfast_included: rng.random_bool(0.5),
            distance_to_center: format!("{} km", round_to(rng.random_range(0.2..=5.0), 1)),
            note: None,
        });
    }

    sort_by_price(&mut offers);
    Ok(SearchOutcome::Offers(offers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, LocationKey};
    use chrono::NaiveDate;
    use rand::SeedableRng;

    fn query(destination: &str, tier: BudgetTier) -> SearchQuery {
        SearchQuery {
            origin: LocationKey::new("chennai"),
            destination: LocationKey::new(destination),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 6, 20),
            tier,
            stay_nights: 3,
        }
    }

    fn hotels(q: &SearchQuery, seed: u64) -> Vec<HotelOffer> {
        let reference = ReferenceData::builtin();
        let mut rng = StdRng::seed_from_u64(seed);
        match generate_hotels(q, &reference, &mut rng).unwrap() {
            SearchOutcome::Offers(o) => o,
            SearchOutcome::Unavailable(_) => panic!("hotels are always available"),
        }
    }

    #[test]
    fn offers_are_bounded_sorted_and_in_band() {
        for tier in BudgetTier::ALL {
            let reference = ReferenceData::builtin();
            let band = reference.catalog.hotel_bands.get(tier).clone();
            for seed in 0..30 {
                let offers = hotels(&query("goa", tier), seed);
                assert!((4..=7).contains(&offers.len()));
                assert!(offers
                    .windows(2)
                    .all(|w| w[0].price_per_night_inr <= w[1].price_per_night_inr));
                for h in &offers {
                    assert!(band.stars.contains(&h.stars));
                    assert!(h.price_per_night_inr >= band.nightly_inr.0);
                    assert!(h.price_per_night_inr <= band.nightly_inr.1 * 1.11);
                }
            }
        }
    }

    #[test]
    fn total_uses_assumed_stay_not_dates() {
        let offers = hotels(&query("goa", BudgetTier::Moderate), 4);
        for h in offers {
            assert_eq!(h.nights, 3);
            assert!((h.total_price_inr - h.price_per_night_inr * 3.0).abs() < 0.02);
            assert_eq!(h.checkin, "2025-06-15");
            assert_eq!(h.checkout, "2025-06-20");
        }
    }

    #[test]
    fn checkout_defaults_to_stay_length() {
        let mut q = query("goa", BudgetTier::Budget);
        q.return_date = None;
        let offers = hotels(&q, 1);
        assert!(offers.iter().all(|h| h.checkout == "2025-06-18"));
    }

    #[test]
    fn names_use_display_name() {
        let offers = hotels(&query("bangalore", BudgetTier::Luxury), 2);
        assert!(offers.iter().all(|h| h.name.ends_with(" Bengaluru")));
        assert!(offers.iter().all(|h| h.location == "Downtown Bengaluru"));
    }

    #[test]
    fn amenities_are_distinct() {
        for h in hotels(&query("paris", BudgetTier::Moderate), 9) {
            assert!((4..=10).contains(&h.amenities.len()));
            let mut sorted = h.amenities.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), h.amenities.len());
        }
    }

    #[test]
    fn empty_chain_pool_is_an_error() {
        let mut reference = ReferenceData::builtin();
        reference.catalog.hotel_chains.retain(|c| c.stars != 5 && c.stars != 4);
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_hotels(&query("goa", BudgetTier::Luxury), &reference, &mut rng).unwrap_err();
        assert!(err.to_string().contains("hotel chains"));
    }
}
