//! Input validation and normalization.

use chrono::NaiveDate;

use crate::domain::{BudgetTier, LocationKey};
use crate::reference::LocationRegistry;
use crate::synth::{ItineraryRequest, SearchQuery};

use super::config::PipelineConfig;
use super::request::TripRequest;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a request cannot be planned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Destination is required")]
    MissingDestination,

    #[error("Departure date is required")]
    MissingDepartureDate,

    #[error("Departure date must be YYYY-MM-DD, got {value:?}")]
    InvalidDepartureDate { value: String },
}

/// Validated, normalized trip parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripParams {
    pub origin: LocationKey,
    pub destination: LocationKey,
    /// Human-readable names for summaries.
    pub origin_name: String,
    pub destination_name: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub tier: BudgetTier,
    pub travelers: u32,
    pub interests: Vec<String>,
    pub special_requests: String,
    /// Trip length in days, at least one.
    pub num_days: u32,
}

impl TripParams {
    pub fn search_query(&self, stay_nights: u32) -> SearchQuery {
        SearchQuery {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date,
            return_date: self.return_date,
            tier: self.tier,
            stay_nights,
        }
    }

    pub fn itinerary_request(&self, max_days: u32) -> ItineraryRequest {
        ItineraryRequest {
            destination: self.destination.clone(),
            num_days: self.num_days,
            interests: self.interests.clone(),
            tier: self.tier,
            max_days,
        }
    }
}

/// Blank strings count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Validate a request and normalize it into [`TripParams`].
///
/// Every problem is reported, not just the first. A malformed return date
/// is treated as absent; only the departure date is required.
pub fn collect_input(
    request: &TripRequest,
    locations: &LocationRegistry,
    config: &PipelineConfig,
) -> Result<TripParams, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let destination = present(&request.destination).map(|d| locations.normalize(d));
    if destination.is_none() {
        errors.push(ValidationError::MissingDestination);
    }

    let departure_date = match present(&request.departure_date) {
        None => {
            errors.push(ValidationError::MissingDepartureDate);
            None
        }
        Some(raw) => {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                errors.push(ValidationError::InvalidDepartureDate {
                    value: raw.to_string(),
                });
            }
            parsed
        }
    };

    let (Some(destination), Some(departure_date)) = (destination, departure_date) else {
        return Err(errors);
    };

    let origin = locations.normalize(present(&request.origin).unwrap_or(config.default_origin.as_str()));
    let return_date = present(&request.return_date).and_then(parse_date);

    let num_days = match return_date {
        Some(ret) => {
            let days = (ret - departure_date).num_days().max(1);
            u32::try_from(days).unwrap_or(u32::MAX)
        }
        None => config.fallback_days.max(1),
    };

    let tier = present(&request.budget)
        .map(BudgetTier::parse_lenient)
        .unwrap_or_default();

    let travelers = u32::try_from(request.travelers.unwrap_or(1).max(1)).unwrap_or(u32::MAX);

    let interests = match &request.interests {
        Some(interests) => interests.tags(),
        None => config.default_interests.clone(),
    };

    Ok(TripParams {
        origin_name: locations.display_name(&origin),
        destination_name: locations.display_name(&destination),
        origin,
        destination,
        departure_date,
        return_date,
        tier,
        travelers,
        interests,
        special_requests: present(&request.special_requests)
            .unwrap_or_default()
            .to_string(),
        num_days,
    })
}
