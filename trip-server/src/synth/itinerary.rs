//! Day-by-day itineraries.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::domain::{BudgetTier, LocationKey};
use crate::reference::ReferenceData;

use super::{SynthError, pick};

const MORNING: &str = "09:00 - 12:00";
const AFTERNOON: &str = "13:00 - 17:00";
const EVENING: &str = "18:00 - 21:00";

/// What to build an itinerary for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryRequest {
    pub destination: LocationKey,
    /// Requested days; clamped to `1..=max_days`.
    pub num_days: u32,
    pub interests: Vec<String>,
    pub tier: BudgetTier,
    pub max_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub activity: String,
    pub time: String,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dining {
    pub lunch: String,
    pub dinner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    pub morning: TimeSlot,
    pub afternoon: TimeSlot,
    pub evening: TimeSlot,
    pub dining: Dining,
}

/// Build an itinerary.
///
/// The destination's pool is shuffled once and dealt out three per day.
/// Days left short are padded from default-pool attractions the trip has
/// not used, then from fixed fallbacks, so no attraction appears twice.
pub fn build_itinerary(
    request: &ItineraryRequest,
    reference: &ReferenceData,
    rng: &mut StdRng,
) -> Result<Vec<ItineraryDay>, SynthError> {
    let attractions = &reference.attractions;
    let days = request.num_days.clamp(1, request.max_days.max(1));
    let context = request.destination.to_string();

    let mut pool = attractions.pool_for(&request.destination).to_vec();
    pool.shuffle(rng);

    let mut spare: Vec<String> = attractions
        .default_pool()
        .iter()
        .filter(|a| !pool.contains(a))
        .cloned()
        .collect();
    spare.shuffle(rng);
    let mut spare = spare.into_iter();

    let dining = attractions.dining_for(request.tier);
    let tier_context = format!("{} tier", request.tier);
    let mut chunks = pool.chunks(3);
    let mut itinerary = Vec::with_capacity(days as usize);

    for day in 1..=days {
        let mut picks = chunks.next().map(<[String]>::to_vec).unwrap_or_default();
        while picks.len() < 3 {
            match spare.next() {
                Some(a) => picks.push(a),
                None => break,
            }
        }
        let mut picks = picks.into_iter();

        let theme = pick(rng, attractions.themes(), "themes", &context)?;
        let lunch = pick(rng, &dining, "dining styles", &tier_context)?;
        let dinner = pick(rng, &dining, "dining styles", &tier_context)?;

        let focus = (!request.interests.is_empty()).then(|| {
            let i = (day as usize - 1) % request.interests.len();
            request.interests[i].clone()
        });

        let morning = match picks.next() {
            Some(a) => TimeSlot {
                tip: format!("Arrive early to avoid crowds at {a}"),
                activity: a,
                time: MORNING.to_string(),
            },
            None => slot("Free morning", MORNING, "Start slow with a leisurely breakfast"),
        };
        let afternoon = slot(
            &picks
                .next()
                .unwrap_or_else(|| "Explore the neighborhood".to_string()),
            AFTERNOON,
            "Take a break at a local cafe between visits",
        );
        let evening = slot(
            &picks.next().unwrap_or_else(|| "Sunset walk".to_string()),
            EVENING,
            "Perfect time for photos with golden hour lighting",
        );

        itinerary.push(ItineraryDay {
            day,
            theme: format!("Day {day}: {theme}"),
            focus,
            morning,
            afternoon,
            evening,
            dining: Dining {
                lunch: lunch.label.clone(),
                dinner: dinner.label.clone(),
            },
        });
    }

    Ok(itinerary)
}

fn slot(activity: &str, time: &str, tip: &str) -> TimeSlot {
    TimeSlot {
        activity: activity.to_string(),
        time: time.to_string(),
        tip: tip.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{AttractionsBuilder, DiningKind};
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn request(destination: &str, days: u32, tier: BudgetTier) -> ItineraryRequest {
        ItineraryRequest {
            destination: LocationKey::new(destination),
            num_days: days,
            interests: vec!["culture".into(), "food".into()],
            tier,
            max_days: 7,
        }
    }

    fn build(req: &ItineraryRequest, seed: u64) -> Vec<ItineraryDay> {
        let reference = ReferenceData::builtin();
        let mut rng = StdRng::seed_from_u64(seed);
        build_itinerary(req, &reference, &mut rng).unwrap()
    }

    fn activities(days: &[ItineraryDay]) -> Vec<&str> {
        days.iter()
            .flat_map(|d| [&d.morning, &d.afternoon, &d.evening])
            .map(|s| s.activity.as_str())
            .collect()
    }

    #[test]
    fn days_are_clamped() {
        assert_eq!(build(&request("paris", 0, BudgetTier::Moderate), 0).len(), 1);
        assert_eq!(build(&request("paris", 3, BudgetTier::Moderate), 0).len(), 3);
        assert_eq!(build(&request("paris", 30, BudgetTier::Moderate), 0).len(), 7);
    }

    #[test]
    fn slots_have_fixed_times() {
        for d in build(&request("paris", 3, BudgetTier::Moderate), 1) {
            assert_eq!(d.morning.time, "09:00 - 12:00");
            assert_eq!(d.afternoon.time, "13:00 - 17:00");
            assert_eq!(d.evening.time, "18:00 - 21:00");
            assert!(d.theme.starts_with(&format!("Day {}: ", d.day)));
        }
    }

    #[test]
    fn attractions_never_repeat() {
        for seed in 0..20 {
            let days = build(&request("ooty", 7, BudgetTier::Moderate), seed);
            let acts: Vec<_> = activities(&days)
                .into_iter()
                .filter(|a| !["Free morning", "Explore the neighborhood", "Sunset walk"].contains(a))
                .collect();
            let unique: HashSet<_> = acts.iter().collect();
            assert_eq!(unique.len(), acts.len());
        }
    }

    #[test]
    fn short_pool_pads_then_falls_back() {
        let days = build(&request("atlantis", 7, BudgetTier::Moderate), 2);
        let acts = activities(&days);
        // default pool has 8 entries, so the last 13 slots are fallbacks
        assert_eq!(acts.iter().filter(|a| **a == "Sunset walk").count(), 5);
        assert_eq!(days[6].morning.activity, "Free morning");
        assert_eq!(days[6].afternoon.activity, "Explore the neighborhood");
    }

    #[test]
    fn dining_respects_tier() {
        for seed in 0..30 {
            for d in build(&request("goa", 5, BudgetTier::Budget), seed) {
                assert_ne!(d.dining.lunch, "Fine Dining");
                assert_ne!(d.dining.dinner, "Fine Dining");
            }
            for d in build(&request("goa", 5, BudgetTier::Luxury), seed) {
                assert!(!d.dining.lunch.contains("Street"));
                assert!(!d.dining.dinner.contains("Street"));
            }
        }
    }

    #[test]
    fn focus_rotates_through_interests() {
        let days = build(&request("tokyo", 4, BudgetTier::Moderate), 0);
        let focus: Vec<_> = days.iter().map(|d| d.focus.as_deref()).collect();
        assert_eq!(focus, vec![Some("culture"), Some("food"), Some("culture"), Some("food")]);

        let mut req = request("tokyo", 2, BudgetTier::Moderate);
        req.interests.clear();
        assert!(build(&req, 0).iter().all(|d| d.focus.is_none()));
    }

    #[test]
    fn focus_is_omitted_from_json_when_absent() {
        let mut req = request("tokyo", 1, BudgetTier::Moderate);
        req.interests.clear();
        let json = serde_json::to_value(build(&req, 0)).unwrap();
        assert!(json[0].get("focus").is_none());
        assert!(json[0]["dining"]["lunch"].is_string());
    }

    #[test]
    fn empty_dining_pool_is_an_error() {
        let mut reference = ReferenceData::builtin();
        reference.attractions = AttractionsBuilder::new()
            .themes(&["Discovery"])
            .dining("Fine Dining", DiningKind::FineDining)
            .build();
        let mut rng = StdRng::seed_from_u64(0);
        let err = build_itinerary(&request("paris", 2, BudgetTier::Budget), &reference, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SynthError::EmptyPool { pool: "dining styles", .. }));
    }
}
