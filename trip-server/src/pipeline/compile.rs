//! Final compile step: counts, cheapest offers and the plan summary.

use serde::Serialize;

use crate::synth::{Offer, SearchOutcome};

use super::state::{PlannerState, RunStatus, StageName};

/// The cheapest real offer for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheapestOffer {
    pub provider: String,
    pub price_inr: f64,
}

impl CheapestOffer {
    fn of<T: Offer>(outcome: &SearchOutcome<T>) -> Option<Self> {
        outcome.cheapest().map(|o| Self {
            provider: o.provider().to_string(),
            price_inr: o.price_inr(),
        })
    }
}

/// Cheapest real offer per mode. Unavailable markers never count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cheapest {
    pub flight: Option<CheapestOffer>,
    pub hotel: Option<CheapestOffer>,
    pub train: Option<CheapestOffer>,
    pub road: Option<CheapestOffer>,
}

impl Cheapest {
    pub fn of(state: &PlannerState) -> Self {
        Self {
            flight: CheapestOffer::of(&state.flights),
            hotel: CheapestOffer::of(&state.hotels),
            train: CheapestOffer::of(&state.trains),
            road: CheapestOffer::of(&state.road_options),
        }
    }
}

/// Format a rupee amount without trailing zeros for whole values.
fn rupees(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("₹{amount:.0}")
    } else {
        format!("₹{amount:.2}")
    }
}

/// Build the pipe-delimited plan summary.
pub fn summarize(state: &PlannerState) -> String {
    let mut parts = Vec::new();

    if let Some(p) = &state.params {
        parts.push(format!(
            "Travel Plan: {} → {}",
            p.origin_name, p.destination_name
        ));
        let ret = p
            .return_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "TBD".to_string());
        parts.push(format!("Dates: {} to {}", p.departure_date, ret));
        parts.push(format!("Budget: {}", p.tier.title()));
        parts.push(format!("Travelers: {}", p.travelers));
    }

    parts.push(format!(
        "Found {} flights, {} hotels, {} trains, {} road options",
        state.flights.len(),
        state.hotels.len(),
        state.trains.len(),
        state.road_options.len()
    ));
    parts.push(format!("Generated {}-day itinerary", state.itinerary.len()));

    if let Some(f) = state.flights.cheapest() {
        parts.push(format!("Best flight: {} at {}", f.airline, rupees(f.price_inr)));
    }
    if let Some(h) = state.hotels.cheapest() {
        parts.push(format!(
            "Top hotel: {} at {}/night",
            h.name,
            rupees(h.price_per_night_inr)
        ));
    }
    if let Some(t) = state.trains.cheapest() {
        parts.push(format!("Best train: {} at {}", t.train_name, rupees(t.fare_inr)));
    }
    if let Some(r) = state.road_options.cheapest() {
        parts.push(format!(
            "Best road: {} ({}) at {}",
            r.operator,
            r.mode.as_str(),
            rupees(r.fare_inr)
        ));
    }

    match state.errors().len() {
        0 => {}
        1 => parts.push("1 stage reported an error".to_string()),
        n => parts.push(format!("{n} stages reported errors")),
    }

    parts.join(" | ")
}

/// Finish a run: write the summary and mark it complete.
pub(crate) fn compile_results(state: &mut PlannerState) {
    state.summary = summarize(state);
    state.complete_step(StageName::CompileResults);
    state.set_status(RunStatus::Complete);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, LocationKey, TransportMode};
    use crate::pipeline::input::TripParams;
    use crate::synth::{HotelOffer, Unavailable};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn params() -> TripParams {
        TripParams {
            origin: LocationKey::new("coimbatore"),
            destination: LocationKey::new("ooty"),
            origin_name: "Coimbatore".into(),
            destination_name: "Ooty (Udhagamandalam)".into(),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            return_date: None,
            tier: BudgetTier::Moderate,
            travelers: 2,
            interests: vec![],
            special_requests: String::new(),
            num_days: 3,
        }
    }

    fn hotel(name: &str, price: f64) -> HotelOffer {
        HotelOffer {
            name: name.into(),
            kind: "Business Hotel".into(),
            stars: 4,
            location: "Downtown Ooty".into(),
            price_per_night_inr: price,
            total_price_inr: price * 3.0,
            nights: 3,
            checkin: "2025-06-15".into(),
            checkout: "2025-06-18".into(),
            rating: 4.2,
            reviews_count: 100,
            amenities: vec![],
            cancellation: "Flexible".into(),
            breakfast_included: true,
            distance_to_center: "1.2 km".into(),
            note: None,
        }
    }

    #[test]
    fn summary_lists_trip_and_counts() {
        let mut state = PlannerState::new();
        state.params = Some(Arc::new(params()));
        state.hotels = SearchOutcome::Offers(vec![hotel("Radisson Ooty", 9000.5), hotel("Novotel Ooty", 12000.0)]);
        state.flights = SearchOutcome::Unavailable(Unavailable {
            mode: TransportMode::Air,
            origin: "Coimbatore".into(),
            destination: "Ooty".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            note: "Ooty has no airport.".into(),
        });

        let s = summarize(&state);
        let parts: Vec<&str> = s.split(" | ").collect();
        assert_eq!(parts[0], "Travel Plan: Coimbatore → Ooty (Udhagamandalam)");
        assert_eq!(parts[1], "Dates: 2025-06-15 to TBD");
        assert_eq!(parts[2], "Budget: Moderate");
        assert_eq!(parts[3], "Travelers: 2");
        assert_eq!(parts[4], "Found 0 flights, 2 hotels, 0 trains, 0 road options");
        assert_eq!(parts[5], "Generated 0-day itinerary");
        assert_eq!(parts[6], "Top hotel: Radisson Ooty at ₹9000.50/night");
        assert!(!s.contains("Best flight"));
    }

    #[test]
    fn cheapest_skips_unavailable() {
        let mut state = PlannerState::new();
        state.hotels = SearchOutcome::Offers(vec![hotel("B", 20.0), hotel("A", 10.0)]);
        let c = Cheapest::of(&state);
        assert_eq!(c.hotel.unwrap().provider, "A");
        assert!(c.flight.is_none());
    }

    #[test]
    fn errors_are_counted() {
        let mut state = PlannerState::new();
        state.record_error("Flight search error: x");
        state.record_error("Road search error: y");
        assert!(summarize(&state).ends_with("2 stages reported errors"));
    }

    #[test]
    fn compile_marks_complete() {
        let mut state = PlannerState::new();
        compile_results(&mut state);
        assert_eq!(state.status(), RunStatus::Complete);
        assert_eq!(state.steps_completed(), &[StageName::CompileResults]);
        assert!(!state.summary.is_empty());
    }

    #[test]
    fn rupee_formatting() {
        assert_eq!(rupees(250.0), "₹250");
        assert_eq!(rupees(1234.5), "₹1234.50");
    }
}
