//! Flight offers.

use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

use crate::domain::{TransportMode, TravelDuration};
use crate::reference::ReferenceData;

use super::{
    Offer, PLACEHOLDER, Schedule, SearchOutcome, SearchQuery, SynthError, Unavailable, hours,
    pick, round_to, sort_by_price, unavailable_for,
};

/// Base fare per kilometer before the cabin multiplier.
const RATE_PER_KM: f64 = 4.5;
/// Fare discount for connecting itineraries.
const CONNECTION_DISCOUNT: f64 = 0.85;
const MIN_FARE_INR: f64 = 2500.0;
/// Taxi, climb and descent on top of cruise time.
const GROUND_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightOffer {
    pub airline: String,
    pub airline_code: String,
    pub airline_rating: f64,
    pub flight_number: String,
    pub origin: String,
    pub origin_airport: String,
    pub destination: String,
    pub destination_airport: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub arrival_day_offset: u32,
    pub duration: String,
    pub duration_minutes: u32,
    pub distance_km: u32,
    pub stops: u32,
    pub stop_type: String,
    #[serde(rename = "class")]
    pub cabin: String,
    pub price_inr: f64,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Offer for FlightOffer {
    fn price_inr(&self) -> f64 {
        self.price_inr
    }

    fn provider(&self) -> &str {
        &self.airline
    }

    fn placeholder(u: &Unavailable) -> Self {
        Self {
            airline: "No Airport".to_string(),
            airline_code: PLACEHOLDER.to_string(),
            airline_rating: 0.0,
            flight_number: PLACEHOLDER.to_string(),
            origin: PLACEHOLDER.to_string(),
            origin_airport: u.origin.clone(),
            destination: PLACEHOLDER.to_string(),
            destination_airport: u.destination.clone(),
            departure_time: PLACEHOLDER.to_string(),
            arrival_time: PLACEHOLDER.to_string(),
            arrival_day_offset: 0,
            duration: PLACEHOLDER.to_string(),
            duration_minutes: 0,
            distance_km: 0,
            stops: 0,
            stop_type: PLACEHOLDER.to_string(),
            cabin: PLACEHOLDER.to_string(),
            price_inr: 0.0,
            date: u.date.to_string(),
            note: Some(u.note.clone()),
        }
    }
}

/// Number of stops, weighted 40/45/15 for 0/1/2.
fn draw_stops(rng: &mut StdRng) -> u32 {
    match rng.random_range(0..100) {
        0..40 => 0,
        40..85 => 1,
        _ => 2,
    }
}

fn stop_label(stops: u32) -> String {
    match stops {
        0 => "Non-stop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    }
}

/// Generate flight offers.
pub fn generate_flights(
    query: &SearchQuery,
    reference: &ReferenceData,
    rng: &mut StdRng,
) -> Result<SearchOutcome<FlightOffer>, SynthError> {
    if let Some(unavailable) = unavailable_for(reference, query, TransportMode::Air) {
        debug!(note = %unavailable.note, "No airport at an endpoint");
        return Ok(SearchOutcome::Unavailable(unavailable));
    }

    let origin = reference.locations.resolve(&query.origin, TransportMode::Air);
    let destination = reference
        .locations
        .resolve(&query.destination, TransportMode::Air);
    let distance = reference
        .distances
        .distance(&query.origin, &query.destination, TransportMode::Air, rng);

    let cabin = reference.catalog.cabins.get(query.tier);
    let airlines = reference.catalog.airlines_for(query.tier);
    let context = format!("{} tier", query.tier);
    let departure_hours = hours(5..=22);

    let count = rng.random_range(3..=6);
    let mut offers = Vec::with_capacity(count);

    for _ in 0..count {
        let airline = *pick(rng, &airlines, "airlines", &context)?;
        let stops = draw_stops(rng);
        let speed = *pick(rng, &cabin.speeds_kmh, "cruise speeds", &context)?;

        let mut duration =
            TravelDuration::at_speed(distance, speed).plus_minutes(GROUND_MINUTES);
        for _ in 0..stops {
            duration = duration.plus_minutes(rng.random_range(60..=180));
        }

        let jitter = rng.random_range(0.9..=1.1);
        let mut price = f64::from(distance) * RATE_PER_KM * cabin.multiplier * jitter;
        if stops > 0 {
            price *= CONNECTION_DISCOUNT;
        }
        let price = round_to(price.max(MIN_FARE_INR), 2);

        let schedule = Schedule::draw(rng, &departure_hours, &[0, 15, 30, 45], duration);
        let flight_number = format!("{}{}", airline.code, rng.random_range(100..=999));

        offers.push(FlightOffer {
            airline: airline.name.clone(),
            airline_code: airline.code.clone(),
            airline_rating: airline.rating,
            flight_number,
            origin: origin.terminal.code.clone(),
            origin_airport: origin.terminal.name.clone(),
            destination: destination.terminal.code.clone(),
            destination_airport: destination.terminal.name.clone(),
            departure_time: schedule.departs.to_string(),
            arrival_time: schedule.arrives.to_string(),
            arrival_day_offset: schedule.day_offset,
            duration: duration.to_string(),
            duration_minutes: duration.minutes(),
            distance_km: distance,
            stops,
            stop_type: stop_label(stops),
            cabin: cabin.label.clone(),
            price_inr: price,
            date: query.departure_date.to_string(),
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
    use crate::reference::builtin_catalog;
    use chrono::NaiveDate;
    use rand::SeedableRng;

    fn query(origin: &str, destination: &str, tier: BudgetTier) -> SearchQuery {
        SearchQuery {
            origin: LocationKey::new(origin),
            destination: LocationKey::new(destination),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            return_date: None,
            tier,
            stay_nights: 3,
        }
    }

    fn offers(outcome: SearchOutcome<FlightOffer>) -> Vec<FlightOffer> {
        match outcome {
            SearchOutcome::Offers(o) => o,
            SearchOutcome::Unavailable(u) => panic!("unexpected unavailable: {}", u.note),
        }
    }

    #[test]
    fn offers_are_bounded_and_sorted() {
        let reference = ReferenceData::builtin();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let flights = offers(
                generate_flights(&query("delhi", "mumbai", BudgetTier::Moderate), &reference, &mut rng)
                    .unwrap(),
            );
            assert!((3..=6).contains(&flights.len()));
            assert!(flights.windows(2).all(|w| w[0].price_inr <= w[1].price_inr));
            assert!(flights.iter().all(|f| f.distance_km == 1150));
            assert!(flights.iter().all(|f| f.price_inr >= MIN_FARE_INR));
        }
    }

    #[test]
    fn cabin_follows_tier() {
        let reference = ReferenceData::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        for (tier, label) in [
            (BudgetTier::Budget, "Economy"),
            (BudgetTier::Moderate, "Premium Economy"),
            (BudgetTier::Luxury, "Business"),
        ] {
            let flights =
                offers(generate_flights(&query("delhi", "goa", tier), &reference, &mut rng).unwrap());
            assert!(flights.iter().all(|f| f.cabin == label));
        }
    }

    #[test]
    fn luxury_never_flies_low_cost() {
        let reference = ReferenceData::builtin();
        let low_cost: Vec<String> = builtin_catalog()
            .airlines
            .into_iter()
            .filter(|a| a.low_cost)
            .map(|a| a.name)
            .collect();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let flights = offers(
                generate_flights(&query("london", "paris", BudgetTier::Luxury), &reference, &mut rng)
                    .unwrap(),
            );
            assert!(flights.iter().all(|f| !low_cost.contains(&f.airline)));
        }
    }

    #[test]
    fn stops_add_layover_time() {
        let reference = ReferenceData::builtin();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let flights = offers(
                generate_flights(&query("london", "tokyo", BudgetTier::Budget), &reference, &mut rng)
                    .unwrap(),
            );
            for f in flights {
                assert!(f.stops <= 2);
                // cruise at most 9560 km / 700 km/h plus ground time
                let direct_max = 9560 * 60 / 700 + GROUND_MINUTES;
                assert!(f.duration_minutes <= direct_max + 180 * f.stops);
                assert!(f.duration_minutes >= 9560 * 60 / 780 + GROUND_MINUTES + 60 * f.stops);
            }
        }
    }

    #[test]
    fn unserved_destination_yields_placeholder() {
        let reference = ReferenceData::builtin();
        let mut rng = StdRng::seed_from_u64(0);
        let outcome =
            generate_flights(&query("coimbatore", "ooty", BudgetTier::Moderate), &reference, &mut rng)
                .unwrap();

        let json = serde_json::to_value(&outcome).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["airline"], "No Airport");
        assert_eq!(arr[0]["price_inr"], 0.0);
        assert_eq!(arr[0]["airline_code"], PLACEHOLDER);
        assert!(arr[0]["note"].as_str().unwrap().contains("Coimbatore (CJB)"));
    }

    #[test]
    fn unknown_cities_still_get_flights() {
        let reference = ReferenceData::builtin();
        let mut rng = StdRng::seed_from_u64(2);
        let flights = offers(
            generate_flights(&query("hampi", "badami", BudgetTier::Budget), &reference, &mut rng)
                .unwrap(),
        );
        assert!(flights.iter().all(|f| f.origin == "HAM" && f.destination == "BAD"));
        assert!(flights.iter().all(|f| (500..=2500).contains(&f.distance_km)));
    }

    #[test]
    fn empty_airline_pool_is_an_error() {
        let mut reference = ReferenceData::builtin();
        reference.catalog.airlines.clear();
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_flights(&query("delhi", "mumbai", BudgetTier::Budget), &reference, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SynthError::EmptyPool { pool: "airlines", .. }));
    }

    #[test]
    fn stop_labels() {
        assert_eq!(stop_label(0), "Non-stop");
        assert_eq!(stop_label(1), "1 stop");
        assert_eq!(stop_label(2), "2 stops");
    }
}
