//! Synthetic travel-option generators.
//!
//! Each generator takes a [`SearchQuery`], the shared reference tables and
//! an explicit random source, and returns either a price-sorted list of
//! offers or an [`Unavailable`] marker when an endpoint has no terminal
//! for the mode. At the wire boundary an unavailable outcome becomes a
//! single flat placeholder record carrying the advisory.

mod flight;
mod hotel;
mod itinerary;
mod road;
mod train;

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Serialize, Serializer};

use crate::domain::{BudgetTier, ClockTime, LocationKey, TransportMode, TravelDuration};
use crate::reference::ReferenceData;

pub use flight::{FlightOffer, generate_flights};
pub use hotel::{HotelOffer, generate_hotels};
pub use itinerary::{Dining, ItineraryDay, ItineraryRequest, TimeSlot, build_itinerary};
pub use road::{RoadKind, RoadOffer, generate_road};
pub use train::{TrainOffer, generate_trains};

/// Placeholder used for codes and times in unavailable records.
pub const PLACEHOLDER: &str = "—";

/// Error from a synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthError {
    /// Nothing eligible to draw from.
    #[error("no eligible {pool} for {context}")]
    EmptyPool { pool: &'static str, context: String },
}

impl SynthError {
    pub(crate) fn empty_pool(pool: &'static str, context: impl Into<String>) -> Self {
        SynthError::EmptyPool {
            pool,
            context: context.into(),
        }
    }
}

/// Validated inputs shared by all option synthesizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origin: LocationKey,
    pub destination: LocationKey,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub tier: BudgetTier,
    /// Nights assumed for hotel totals, independent of the dates.
    pub stay_nights: u32,
}

/// Why a mode produced no offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    pub mode: TransportMode,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub note: String,
}

/// An offer record that can stand in for an unavailable outcome.
pub trait Offer: Serialize {
    /// Price used for sorting and cheapest-offer selection.
    fn price_inr(&self) -> f64;

    /// Operator, carrier or property name.
    fn provider(&self) -> &str;

    /// The flat placeholder record for an unavailable outcome.
    fn placeholder(unavailable: &Unavailable) -> Self
    where
        Self: Sized;
}

/// Offers for one mode, or the reason there are none.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    Offers(Vec<T>),
    Unavailable(Unavailable),
}

impl<T> Default for SearchOutcome<T> {
    fn default() -> Self {
        SearchOutcome::Offers(Vec::new())
    }
}

impl<T> SearchOutcome<T> {
    /// Real offers; empty when unavailable.
    pub fn offers(&self) -> &[T] {
        match self {
            SearchOutcome::Offers(offers) => offers,
            SearchOutcome::Unavailable(_) => &[],
        }
    }

    /// Number of real offers.
    pub fn len(&self) -> usize {
        self.offers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers().is_empty()
    }

    pub fn unavailable(&self) -> Option<&Unavailable> {
        match self {
            SearchOutcome::Offers(_) => None,
            SearchOutcome::Unavailable(u) => Some(u),
        }
    }
}

impl<T: Offer> SearchOutcome<T> {
    /// The cheapest real offer.
    pub fn cheapest(&self) -> Option<&T> {
        self.offers()
            .iter()
            .min_by(|a, b| a.price_inr().total_cmp(&b.price_inr()))
    }
}

impl<T: Offer> Serialize for SearchOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchOutcome::Offers(offers) => offers.serialize(serializer),
            SearchOutcome::Unavailable(u) => [T::placeholder(u)].serialize(serializer),
        }
    }
}

/// Check both endpoints for a missing terminal, origin first.
pub(crate) fn unavailable_for(
    reference: &ReferenceData,
    query: &SearchQuery,
    mode: TransportMode,
) -> Option<Unavailable> {
    let locations = &reference.locations;
    let unserved = locations
        .unserved(&query.origin, mode)
        .or_else(|| locations.unserved(&query.destination, mode))?;

    Some(Unavailable {
        mode,
        origin: locations.display_name(&query.origin),
        destination: locations.display_name(&query.destination),
        date: query.departure_date,
        note: unserved.advisory(),
    })
}

/// Pick one element, or fail with an empty-pool error.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
    pool: &'static str,
    context: &str,
) -> Result<&'a T, SynthError> {
    items
        .choose(rng)
        .ok_or_else(|| SynthError::empty_pool(pool, context))
}

/// Sort ascending by price.
pub(crate) fn sort_by_price<T: Offer>(offers: &mut [T]) {
    offers.sort_by(|a, b| a.price_inr().total_cmp(&b.price_inr()));
}

/// Round to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A departure drawn from an hour range and a set of minute marks, with the
/// arrival after `duration` rounded to a five-minute mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Schedule {
    pub departs: ClockTime,
    pub arrives: ClockTime,
    pub day_offset: u32,
}

impl Schedule {
    pub(crate) fn draw<R: Rng + ?Sized>(
        rng: &mut R,
        hours: &[u32],
        minute_marks: &[u32],
        duration: TravelDuration,
    ) -> Self {
        let hour = hours.choose(rng).copied().unwrap_or(0);
        let minute = minute_marks.choose(rng).copied().unwrap_or(0);
        let departs = ClockTime::new(hour, minute).unwrap_or_default();
        Self::from_departure(departs, duration)
    }

    pub(crate) fn from_departure(departs: ClockTime, duration: TravelDuration) -> Self {
        let (raw, days) = departs.add_minutes(duration.minutes());
        let (arrives, extra) = raw.round_to(5);
        Self {
            departs,
            arrives,
            day_offset: days + extra,
        }
    }
}

/// Every hour in a range, for [`Schedule::draw`].
pub(crate) fn hours(range: RangeInclusive<u32>) -> Vec<u32> {
    range.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Toy {
        name: String,
        price_inr: f64,
        note: Option<String>,
    }

    impl Offer for Toy {
        fn price_inr(&self) -> f64 {
            self.price_inr
        }

        fn provider(&self) -> &str {
            &self.name
        }

        fn placeholder(u: &Unavailable) -> Self {
            Toy {
                name: PLACEHOLDER.to_string(),
                price_inr: 0.0,
                note: Some(u.note.clone()),
            }
        }
    }

    fn toy(name: &str, price: f64) -> Toy {
        Toy {
            name: name.to_string(),
            price_inr: price,
            note: None,
        }
    }

    fn unavailable() -> Unavailable {
        Unavailable {
            mode: TransportMode::Air,
            origin: "Coimbatore".to_string(),
            destination: "Ooty".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            note: "Ooty has no airport.".to_string(),
        }
    }

    #[test]
    fn offers_serialize_as_flat_array() {
        let outcome = SearchOutcome::Offers(vec![toy("a", 1.0), toy("b", 2.0)]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["name"], "a");
    }

    #[test]
    fn unavailable_serializes_as_single_placeholder() {
        let outcome: SearchOutcome<Toy> = SearchOutcome::Unavailable(unavailable());
        let json = serde_json::to_value(&outcome).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["price_inr"], 0.0);
        assert_eq!(arr[0]["name"], PLACEHOLDER);
        assert_eq!(arr[0]["note"], "Ooty has no airport.");
    }

    #[test]
    fn unavailable_has_no_real_offers() {
        let outcome: SearchOutcome<Toy> = SearchOutcome::Unavailable(unavailable());
        assert!(outcome.is_empty());
        assert!(outcome.cheapest().is_none());
        assert!(outcome.unavailable().is_some());
    }

    #[test]
    fn cheapest_and_sort() {
        let mut offers = vec![toy("b", 20.0), toy("a", 10.0), toy("c", 15.0)];
        sort_by_price(&mut offers);
        assert_eq!(offers[0].name, "a");
        assert_eq!(offers[2].name, "b");

        let outcome = SearchOutcome::Offers(offers);
        assert_eq!(outcome.cheapest().unwrap().name, "a");
    }

    #[test]
    fn schedule_rounds_and_rolls_over() {
        let departs = ClockTime::parse_hhmm("22:45").unwrap();
        let s = Schedule::from_departure(departs, TravelDuration::from_minutes(133));
        // 22:45 + 2h13m = 00:58 -> 01:00 next day
        assert_eq!(s.arrives.to_string(), "01:00");
        assert_eq!(s.day_offset, 1);
    }

    #[test]
    fn schedule_draw_uses_marks() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let s = Schedule::draw(&mut rng, &hours(5..=22), &[0, 15, 30, 45], TravelDuration::from_minutes(90));
            assert!((5..=22).contains(&s.departs.hour()));
            assert_eq!(s.departs.minute() % 15, 0);
            assert_eq!(s.arrives.minute() % 5, 0);
        }
    }

    #[test]
    fn pick_from_empty_pool_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty: [u32; 0] = [];
        let err = pick(&mut rng, &empty, "airlines", "luxury tier").unwrap_err();
        assert_eq!(err.to_string(), "no eligible airlines for luxury tier");
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1234.5678, 2), 1234.57);
        assert_eq!(round_to(1234.5, 0), 1235.0);
    }
}
