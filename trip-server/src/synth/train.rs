//! Train offers.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::debug;

use crate::domain::{LocationKey, Terminal, TransportMode, TravelDuration};
use crate::reference::{Eligibility, HeritageService, ReferenceData, ServiceTemplate, SpeedClass};

use super::{
    Offer, PLACEHOLDER, Schedule, SearchOutcome, SearchQuery, SynthError, Unavailable, hours,
    pick, sort_by_price, unavailable_for,
};

const FARE_PER_KM: f64 = 0.55;
const PREMIUM_FARE_FACTOR: f64 = 1.4;
const MIN_FARE_INR: f64 = 150.0;
/// Draws allowed per offer when avoiding duplicate service names.
const DUPLICATE_ATTEMPTS: usize = 15;

const PREMIUM_SPEEDS: [u32; 4] = [80, 90, 110, 130];
const STANDARD_SPEEDS: [u32; 4] = [50, 55, 60, 70];
const MINUTE_MARKS: [u32; 8] = [0, 10, 15, 25, 30, 40, 45, 55];
const AVAILABILITY: [&str; 5] = ["Available", "RAC", "Waitlist", "Available", "Available"];
const RUNS_ON: [&str; 4] = ["Daily", "Mon/Wed/Fri", "Tue/Thu/Sat", "Daily except Sun"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainOffer {
    pub train_name: String,
    pub train_number: String,
    pub train_type: String,
    pub origin_station: String,
    pub origin_code: String,
    pub destination_station: String,
    pub destination_code: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub arrival_day_offset: u32,
    pub duration: String,
    pub duration_minutes: u32,
    pub distance_km: u32,
    #[serde(rename = "class")]
    pub class_name: String,
    pub class_code: String,
    pub fare_inr: f64,
    pub availability: String,
    pub pantry: bool,
    pub runs_on: String,
    pub date: String,
    pub zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Offer for TrainOffer {
    fn price_inr(&self) -> f64 {
        self.fare_inr
    }

    fn provider(&self) -> &str {
        &self.train_name
    }

    fn placeholder(u: &Unavailable) -> Self {
        Self {
            train_name: "No Direct Trains".to_string(),
            train_number: PLACEHOLDER.to_string(),
            train_type: "Info".to_string(),
            origin_station: u.origin.clone(),
            origin_code: PLACEHOLDER.to_string(),
            destination_station: u.destination.clone(),
            destination_code: PLACEHOLDER.to_string(),
            departure_time: PLACEHOLDER.to_string(),
            arrival_time: PLACEHOLDER.to_string(),
            arrival_day_offset: 0,
            duration: PLACEHOLDER.to_string(),
            duration_minutes: 0,
            distance_km: 0,
            class_name: PLACEHOLDER.to_string(),
            class_code: PLACEHOLDER.to_string(),
            fare_inr: 0.0,
            availability: "N/A".to_string(),
            pantry: false,
            runs_on: PLACEHOLDER.to_string(),
            date: u.date.to_string(),
            zone: PLACEHOLDER.to_string(),
            note: Some(u.note.clone()),
        }
    }
}

/// Generate train offers.
///
/// The heritage corridor short-circuits everything else, including the
/// no-mainline check for the hill end.
pub fn generate_trains(
    query: &SearchQuery,
    reference: &ReferenceData,
    rng: &mut StdRng,
) -> Result<SearchOutcome<TrainOffer>, SynthError> {
    let pool = match reference.routes.eligible(&query.origin, &query.destination) {
        Eligibility::Heritage(service) => {
            debug!(service = %service.name, "Heritage corridor");
            return Ok(SearchOutcome::Offers(vec![heritage_offer(
                service, query, reference,
            )]));
        }
        Eligibility::Pool(pool) => pool,
    };

    if let Some(unavailable) = unavailable_for(reference, query, TransportMode::Rail) {
        debug!(note = %unavailable.note, "No mainline station at an endpoint");
        return Ok(SearchOutcome::Unavailable(unavailable));
    }

    let origin = reference.locations.resolve(&query.origin, TransportMode::Rail);
    let destination = reference
        .locations
        .resolve(&query.destination, TransportMode::Rail);
    let distance = reference
        .distances
        .distance(&query.origin, &query.destination, TransportMode::Rail, rng);

    let classes = reference.catalog.train_classes.get(query.tier);
    let corridor = format!("{} - {}", query.origin, query.destination);
    let tier_context = format!("{} tier", query.tier);
    let departure_hours = hours(4..=23);

    let count = rng.random_range(3..=5);
    let mut used = HashSet::new();
    let mut offers = Vec::with_capacity(count);

    for _ in 0..count {
        let template = draw_template(rng, &pool, &used, &corridor)?;
        used.insert(template.name.clone());

        let class = pick(rng, classes, "train classes", &tier_context)?;

        let mut base = f64::from(distance) * FARE_PER_KM * class.multiplier;
        if template.is_premium() {
            base *= PREMIUM_FARE_FACTOR;
        }
        let fare = (base + rng.random_range(-50.0..=200.0)).round().max(MIN_FARE_INR);

        let speeds: &[u32] = match template.speed {
            SpeedClass::Premium => &PREMIUM_SPEEDS,
            SpeedClass::Standard => &STANDARD_SPEEDS,
        };
        let speed = *pick(rng, speeds, "speeds", &corridor)?;
        let duration = TravelDuration::at_speed(distance, speed);
        let schedule = Schedule::draw(rng, &departure_hours, &MINUTE_MARKS, duration);

        let availability = AVAILABILITY.choose(rng).copied().unwrap_or("Available");
        let runs_on = RUNS_ON.choose(rng).copied().unwrap_or("Daily");
        let train_number = rng.random_range(10000..=99999).to_string();

        offers.push(TrainOffer {
            train_name: template.name.clone(),
            train_number,
            train_type: template.kind.clone(),
            origin_station: origin.terminal.name.clone(),
            origin_code: origin.terminal.code.clone(),
            destination_station: destination.terminal.name.clone(),
            destination_code: destination.terminal.code.clone(),
            departure_time: schedule.departs.to_string(),
            arrival_time: schedule.arrives.to_string(),
            arrival_day_offset: schedule.day_offset,
            duration: duration.to_string(),
            duration_minutes: duration.minutes(),
            distance_km: distance,
            class_name: class.name.clone(),
            class_code: class.code.clone(),
            fare_inr: fare,
            availability: availability.to_string(),
            pantry: template.pantry,
            runs_on: runs_on.to_string(),
            date: query.departure_date.to_string(),
            zone: origin.terminal.region.clone(),
            note: None,
        });
    }

    sort_by_price(&mut offers);
    Ok(SearchOutcome::Offers(offers))
}

/// Draw a template, retrying a bounded number of times to avoid names
/// already used. The last draw is kept if every attempt collides.
fn draw_template<'a>(
    rng: &mut StdRng,
    pool: &[&'a ServiceTemplate],
    used: &HashSet<String>,
    corridor: &str,
) -> Result<&'a ServiceTemplate, SynthError> {
    let mut template = *pick(rng, pool, "train services", corridor)?;
    for _ in 1..DUPLICATE_ATTEMPTS {
        if !used.contains(&template.name) {
            break;
        }
        template = *pick(rng, pool, "train services", corridor)?;
    }
    Ok(template)
}

fn heritage_offer(
    service: &HeritageService,
    query: &SearchQuery,
    reference: &ReferenceData,
) -> TrainOffer {
    let resolve = |key: &LocationKey| reference.locations.resolve(key, TransportMode::Rail).terminal;
    let hill = service.hill_terminal.clone();

    let (run, from, to): (_, Terminal, Terminal) = if query.origin == service.hill {
        (&service.down, hill, resolve(&query.destination))
    } else {
        (&service.up, resolve(&query.origin), hill)
    };

    let duration = TravelDuration::from_minutes(run.departs.minutes_until(run.arrives));

    TrainOffer {
        train_name: service.name.clone(),
        train_number: run.number.clone(),
        train_type: service.kind.clone(),
        origin_station: from.name,
        origin_code: from.code,
        destination_station: to.name,
        destination_code: to.code,
        departure_time: run.departs.to_string(),
        arrival_time: run.arrives.to_string(),
        arrival_day_offset: 0,
        duration: duration.to_string(),
        duration_minutes: duration.minutes(),
        distance_km: service.distance_km,
        class_name: service.class_label.clone(),
        class_code: service.class_code.clone(),
        fare_inr: f64::from(service.fare_inr),
        availability: "Available".to_string(),
        pantry: false,
        runs_on: "Daily".to_string(),
        date: query.departure_date.to_string(),
        zone: service.zone.clone(),
        note: Some(service.note.clone()),
    }
}
