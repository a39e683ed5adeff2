//! Road offers: intercity buses and door-to-door cars.

use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Location, TransportMode, TravelDuration};
use crate::reference::{BusOperator, BusType, CabProvider, ReferenceData};

use super::{
    Offer, PLACEHOLDER, Schedule, SearchOutcome, SearchQuery, SynthError, Unavailable, pick,
    round_to, sort_by_price, unavailable_for,
};

const BUS_FARE_PER_KM: f64 = 0.80;
const BUS_MIN_FARE_INR: f64 = 80.0;
const CAB_FARE_PER_KM: f64 = 10.0;
const SELF_DRIVE_FARE_PER_KM: f64 = 5.0;
/// Share of buses run by state transport corporations.
const GOVERNMENT_SHARE: f64 = 0.35;

const BUS_SPEEDS: [u32; 5] = [40, 45, 50, 55, 60];
const CAR_SPEEDS: [u32; 4] = [50, 60, 70, 80];
const BUS_HOURS: [u32; 11] = [6, 7, 8, 9, 10, 14, 15, 20, 21, 22, 23];
const BUS_MINUTE_MARKS: [u32; 4] = [0, 15, 30, 45];

/// What kind of road option this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoadKind {
    Bus,
    Cab,
    #[serde(rename = "Self-Drive")]
    SelfDrive,
    /// Placeholder for an unavailable route.
    Info,
}

impl RoadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RoadKind::Bus => "Bus",
            RoadKind::Cab => "Cab",
            RoadKind::SelfDrive => "Self-Drive",
            RoadKind::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadOffer {
    pub mode: RoadKind,
    pub operator: String,
    pub operator_type: String,
    pub vehicle_type: String,
    pub origin: String,
    pub origin_state: String,
    pub destination: String,
    pub destination_state: String,
    pub departure_time: String,
    pub duration: String,
    pub duration_minutes: u32,
    pub distance_km: u32,
    pub fare_inr: f64,
    pub seats_available: u32,
    pub amenities: Vec<String>,
    pub rating: f64,
    pub boarding_point: String,
    pub dropping_point: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Offer for RoadOffer {
    fn price_inr(&self) -> f64 {
        self.fare_inr
    }

    fn provider(&self) -> &str {
        &self.operator
    }

    fn placeholder(u: &Unavailable) -> Self {
        Self {
            mode: RoadKind::Info,
            operator: "No Road Route".to_string(),
            operator_type: PLACEHOLDER.to_string(),
            vehicle_type: PLACEHOLDER.to_string(),
            origin: u.origin.clone(),
            origin_state: PLACEHOLDER.to_string(),
            destination: u.destination.clone(),
            destination_state: PLACEHOLDER.to_string(),
            departure_time: PLACEHOLDER.to_string(),
            duration: PLACEHOLDER.to_string(),
            duration_minutes: 0,
            distance_km: 0,
            fare_inr: 0.0,
            seats_available: 0,
            amenities: Vec::new(),
            rating: 0.0,
            boarding_point: PLACEHOLDER.to_string(),
            dropping_point: PLACEHOLDER.to_string(),
            date: u.date.to_string(),
            note: Some(u.note.clone()),
        }
    }
}

/// Both ends of the route, resolved once.
struct Endpoints {
    origin: Location,
    destination: Location,
    distance: u32,
}

impl Endpoints {
    fn offer(&self, query: &SearchQuery, mode: RoadKind) -> RoadOffer {
        RoadOffer {
            mode,
            operator: String::new(),
            operator_type: String::new(),
            vehicle_type: String::new(),
            origin: self.origin.terminal.name.clone(),
            origin_state: self.origin.terminal.region.clone(),
            destination: self.destination.terminal.name.clone(),
            destination_state: self.destination.terminal.region.clone(),
            departure_time: String::new(),
            duration: String::new(),
            duration_minutes: 0,
            distance_km: self.distance,
            fare_inr: 0.0,
            seats_available: 0,
            amenities: Vec::new(),
            rating: 0.0,
            boarding_point: String::new(),
            dropping_point: String::new(),
            date: query.departure_date.to_string(),
            note: None,
        }
    }
}

/// Generate bus and car offers.
pub fn generate_road(
    query: &SearchQuery,
    reference: &ReferenceData,
    rng: &mut StdRng,
) -> Result<SearchOutcome<RoadOffer>, SynthError> {
    if let Some(unavailable) = unavailable_for(reference, query, TransportMode::Road) {
        debug!(note = %unavailable.note, "No road link at an endpoint");
        return Ok(SearchOutcome::Unavailable(unavailable));
    }

    let ends = Endpoints {
        origin: reference.locations.resolve(&query.origin, TransportMode::Road),
        destination: reference
            .locations
            .resolve(&query.destination, TransportMode::Road),
        distance: reference
            .distances
            .distance(&query.origin, &query.destination, TransportMode::Road, rng),
    };

    let mut offers = Vec::new();

    let buses = rng.random_range(3..=5);
    for _ in 0..buses {
        offers.push(bus(query, reference, &ends, rng)?);
    }

    let cars = rng.random_range(2..=3);
    for _ in 0..cars {
        offers.push(car(query, reference, &ends, rng)?);
    }

    sort_by_price(&mut offers);
    Ok(SearchOutcome::Offers(offers))
}

fn bus(
    query: &SearchQuery,
    reference: &ReferenceData,
    ends: &Endpoints,
    rng: &mut StdRng,
) -> Result<RoadOffer, SynthError> {
    let catalog = &reference.catalog;
    let government = rng.random_bool(GOVERNMENT_SHARE);
    let operators = catalog.bus_operators(government);
    let operator = *pick(rng, &operators, "bus operators", operator_type(government))?;
    let bus_type = pick(
        rng,
        catalog.bus_types.get(query.tier),
        "bus types",
        &format!("{} tier", query.tier),
    )?;

    let fare = (f64::from(ends.distance) * BUS_FARE_PER_KM * bus_type.multiplier
        + rng.random_range(-30.0..=80.0))
    .round()
    .max(BUS_MIN_FARE_INR);

    let speed = *pick(rng, &BUS_SPEEDS, "speeds", "bus")?;
    let duration = TravelDuration::at_speed(ends.distance, speed);
    let schedule = Schedule::draw(rng, &BUS_HOURS, &BUS_MINUTE_MARKS, duration);

    Ok(RoadOffer {
        operator: operator.name.clone(),
        operator_type: operator_type(government).to_string(),
        vehicle_type: bus_type.label.clone(),
        departure_time: schedule.departs.to_string(),
        duration: duration.to_string(),
        duration_minutes: duration.minutes(),
        fare_inr: fare,
        seats_available: rng.random_range(1..=35),
        amenities: bus_amenities(bus_type, operator),
        rating: round_to(rng.random_range(3.5..=4.8), 1),
        boarding_point: format!("{} Bus Stand", ends.origin.terminal.name),
        dropping_point: format!("{} Bus Stand", ends.destination.terminal.name),
        ..ends.offer(query, RoadKind::Bus)
    })
}

fn car(
    query: &SearchQuery,
    reference: &ReferenceData,
    ends: &Endpoints,
    rng: &mut StdRng,
) -> Result<RoadOffer, SynthError> {
    let catalog = &reference.catalog;
    let context = format!("{} tier", query.tier);
    let provider = pick(rng, &catalog.cab_providers, "cab providers", &context)?;

    let (kind, vehicles, rate, extra) = if provider.self_drive {
        (
            RoadKind::SelfDrive,
            catalog.self_drive_vehicles.get(query.tier),
            SELF_DRIVE_FARE_PER_KM,
            500.0..=1500.0,
        )
    } else {
        (
            RoadKind::Cab,
            catalog.cab_vehicles.get(query.tier),
            CAB_FARE_PER_KM,
            200.0..=800.0,
        )
    };
    let vehicle = pick(rng, vehicles, "vehicles", &context)?;

    let fare = (f64::from(ends.distance) * rate * vehicle.multiplier + rng.random_range(extra))
        .round();

    let speed = *pick(rng, &CAR_SPEEDS, "speeds", "car")?;
    let duration = TravelDuration::at_speed(ends.distance, speed);

    Ok(RoadOffer {
        operator: provider.name.clone(),
        operator_type: kind.as_str().to_string(),
        vehicle_type: vehicle.label.clone(),
        departure_time: "Flexible".to_string(),
        duration: format!("{duration} (approx)"),
        duration_minutes: duration.minutes(),
        fare_inr: fare,
        seats_available: vehicle.seats,
        amenities: car_amenities(provider),
        rating: round_to(rng.random_range(4.0..=4.9), 1),
        boarding_point: "Door pickup".to_string(),
        dropping_point: "Door drop-off".to_string(),
        ..ends.offer(query, kind)
    })
}

fn operator_type(government: bool) -> &'static str {
    if government { "Government" } else { "Private" }
}

fn bus_amenities(bus_type: &BusType, operator: &BusOperator) -> Vec<String> {
    let label = bus_type.label.as_str();
    let mut amenities = vec!["Charging Point"];
    if label.contains("AC") && !label.contains("Non-AC") {
        amenities.push("Air Conditioning");
    }
    if label.contains("Sleeper") {
        amenities.extend(["Blanket", "Pillow"]);
    }
    if ["Volvo", "Mercedes", "Scania"].iter().any(|m| label.contains(m)) {
        amenities.extend(["WiFi", "Water Bottle", "Entertainment"]);
    }
    if !operator.government {
        amenities.push("Live Tracking");
    }
    amenities.into_iter().map(String::from).collect()
}

fn car_amenities(provider: &CabProvider) -> Vec<String> {
    let amenities: &[&str] = if provider.self_drive {
        &["AC", "GPS Navigation", "Fuel Included", "Insurance"]
    } else {
        &["AC", "Door-to-Door", "Luggage Space", "Driver", "Live Tracking"]
    };
    amenities.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, LocationKey};
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

    fn run(q: &SearchQuery, seed: u64) -> SearchOutcome<RoadOffer> {
        let reference = ReferenceData::builtin();
        let mut rng = StdRng::seed_from_u64(seed);
        generate_road(q, &reference, &mut rng).unwrap()
    }

    #[test]
    fn buses_and_cars_are_bounded_and_sorted() {
        for seed in 0..50 {
            let outcome = run(&query("coimbatore", "chennai", BudgetTier::Moderate), seed);
            let offers = outcome.offers();
            let buses = offers.iter().filter(|o| o.mode == RoadKind::Bus).count();
            let cars = offers.len() - buses;
            assert!((3..=5).contains(&buses));
            assert!((2..=3).contains(&cars));
            assert!(offers.windows(2).all(|w| w[0].fare_inr <= w[1].fare_inr));
            assert!(offers.iter().all(|o| o.distance_km == 505));
        }
    }

    #[test]
    fn bus_fields() {
        let outcome = run(&query("coimbatore", "ooty", BudgetTier::Budget), 3);
        for b in outcome.offers().iter().filter(|o| o.mode == RoadKind::Bus) {
            assert!(b.fare_inr >= BUS_MIN_FARE_INR);
            assert!((1..=35).contains(&b.seats_available));
            assert_eq!(b.boarding_point, "Coimbatore Bus Stand");
            assert_eq!(b.dropping_point, "Ooty (Udhagamandalam) Bus Stand");
            assert_eq!(b.origin_state, "Tamil Nadu");
            assert!(b.amenities.contains(&"Charging Point".to_string()));
            assert!(b.departure_time.len() == 5);
        }
    }

    #[test]
    fn car_fields() {
        for seed in 0..20 {
            let outcome = run(&query("coimbatore", "ooty", BudgetTier::Luxury), seed);
            for c in outcome.offers().iter().filter(|o| o.mode != RoadKind::Bus) {
                assert_eq!(c.departure_time, "Flexible");
                assert!(c.duration.ends_with("(approx)"));
                assert_eq!(c.boarding_point, "Door pickup");
                assert_eq!(c.seats_available, 6);
                let self_drive = c.mode == RoadKind::SelfDrive;
                assert_eq!(self_drive, c.operator == "Zoomcar");
                assert_eq!(self_drive, c.amenities.contains(&"Insurance".to_string()));
            }
        }
    }

    #[test]
    fn bus_amenities_follow_type_and_operator() {
        let catalog = crate::reference::builtin_catalog();
        let volvo = &catalog.bus_types.luxury[0];
        let non_ac = &catalog.bus_types.budget[0];
        let govt = &catalog.bus_operators(true)[0];
        let private = &catalog.bus_operators(false)[0];

        let a = bus_amenities(volvo, private);
        assert!(a.contains(&"WiFi".to_string()));
        assert!(a.contains(&"Air Conditioning".to_string()));
        assert!(a.contains(&"Live Tracking".to_string()));

        let b = bus_amenities(non_ac, govt);
        assert_eq!(b, vec!["Charging Point".to_string()]);
    }

    #[test]
    fn island_yields_placeholder() {
        let outcome = run(&query("chennai", "port blair", BudgetTier::Moderate), 0);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["mode"], "Info");
        assert_eq!(json[0]["operator"], "No Road Route");
        assert_eq!(json[0]["fare_inr"], 0.0);
        assert!(json[0]["note"].as_str().unwrap().contains("Andaman"));
    }

    #[test]
    fn kind_labels_match_wire_names() {
        for kind in [RoadKind::Bus, RoadKind::Cab, RoadKind::SelfDrive, RoadKind::Info] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }

    #[test]
    fn unknown_route_uses_road_fallback_range() {
        let outcome = run(&query("hampi", "badami", BudgetTier::Budget), 7);
        assert!(outcome.offers().iter().all(|o| (150..=600).contains(&o.distance_km)));
        assert!(outcome.offers().iter().all(|o| o.origin_state == "Unknown"));
    }
}
