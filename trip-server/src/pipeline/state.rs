//! Planner state threaded through a pipeline run.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::synth::{FlightOffer, HotelOffer, ItineraryDay, RoadOffer, SearchOutcome, TrainOffer};

use super::input::TripParams;

/// Identity of a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    CollectInput,
    SearchFlights,
    SearchHotels,
    SearchTrains,
    SearchRoad,
    BuildItinerary,
    CompileResults,
}

impl StageName {
    /// The worker stages, in declaration order.
    pub const WORKERS: [StageName; 5] = [
        StageName::SearchFlights,
        StageName::SearchHotels,
        StageName::SearchTrains,
        StageName::SearchRoad,
        StageName::BuildItinerary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CollectInput => "collect_input",
            Self::SearchFlights => "search_flights",
            Self::SearchHotels => "search_hotels",
            Self::SearchTrains => "search_trains",
            Self::SearchRoad => "search_road",
            Self::BuildItinerary => "build_itinerary",
            Self::CompileResults => "compile_results",
        }
    }

    /// Prefix used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::CollectInput => "Input",
            Self::SearchFlights => "Flight search",
            Self::SearchHotels => "Hotel search",
            Self::SearchTrains => "Train search",
            Self::SearchRoad => "Road search",
            Self::BuildItinerary => "Itinerary build",
            Self::CompileResults => "Compile",
        }
    }

    /// Display name of the worker behind this stage.
    pub fn role(self) -> &'static str {
        match self {
            Self::CollectInput => "Input Validator",
            Self::SearchFlights => "Flight Search Specialist",
            Self::SearchHotels => "Hotel & Accommodation Concierge",
            Self::SearchTrains => "Indian Railways Specialist",
            Self::SearchRoad => "Road Travel Specialist",
            Self::BuildItinerary => "Itinerary Architect",
            Self::CompileResults => "Results Compiler",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CollectInput => "Validates and normalizes trip parameters.",
            Self::SearchFlights => {
                "Finds flight options by comparing airlines, prices and travel times."
            }
            Self::SearchHotels => {
                "Finds hotels and accommodation by location, amenities and ratings."
            }
            Self::SearchTrains => {
                "Finds train options on Indian Railways, including premium and heritage services."
            }
            Self::SearchRoad => "Finds intercity buses, outstation cabs and self-drive rentals.",
            Self::BuildItinerary => {
                "Builds day-by-day itineraries with attractions, dining and local tips."
            }
            Self::CompileResults => "Summarizes every stage into one plan.",
        }
    }

    /// Stable index used to derive per-stage random seeds.
    pub fn index(self) -> u64 {
        self as u64
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Planning,
    Searching,
    Complete,
    Error,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Complete | RunStatus::Error)
    }
}

/// Everything a run accumulates.
///
/// Steps and errors are append-only, and a terminal status is final.
#[derive(Debug, Clone, Default)]
pub struct PlannerState {
    pub params: Option<Arc<TripParams>>,
    pub flights: SearchOutcome<FlightOffer>,
    pub hotels: SearchOutcome<HotelOffer>,
    pub trains: SearchOutcome<TrainOffer>,
    pub road_options: SearchOutcome<RoadOffer>,
    pub itinerary: Vec<ItineraryDay>,
    pub summary: String,
    steps_completed: Vec<StageName>,
    errors: Vec<String>,
    current_step: Option<StageName>,
    status: RunStatus,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a step finished, successfully or not.
    pub fn complete_step(&mut self, stage: StageName) {
        self.steps_completed.push(stage);
        self.current_step = Some(stage);
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Move to `status` unless the run has already finished.
    pub fn set_status(&mut self, status: RunStatus) {
        if !self.status.is_terminal() {
            self.status = status;
        }
    }

    pub fn steps_completed(&self) -> &[StageName] {
        &self.steps_completed
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn current_step(&self) -> Option<StageName> {
        self.current_step
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_status_is_final() {
        let mut s = PlannerState::new();
        assert_eq!(s.status(), RunStatus::Planning);

        s.set_status(RunStatus::Searching);
        s.set_status(RunStatus::Complete);
        s.set_status(RunStatus::Searching);
        s.set_status(RunStatus::Error);
        assert_eq!(s.status(), RunStatus::Complete);
    }

    #[test]
    fn steps_are_recorded_in_order() {
        let mut s = PlannerState::new();
        s.complete_step(StageName::CollectInput);
        s.complete_step(StageName::SearchTrains);
        assert_eq!(
            s.steps_completed(),
            &[StageName::CollectInput, StageName::SearchTrains]
        );
        assert_eq!(s.current_step(), Some(StageName::SearchTrains));
    }

    #[test]
    fn stage_names_serialize_snake_case() {
        for stage in StageName::WORKERS {
            let json = serde_json::to_value(stage).unwrap();
            assert_eq!(json, stage.as_str());
        }
        assert_eq!(
            serde_json::to_value(StageName::CollectInput).unwrap(),
            "collect_input"
        );
    }

    #[test]
    fn seed_indices_are_distinct() {
        let mut idx: Vec<u64> = StageName::WORKERS.iter().map(|s| s.index()).collect();
        idx.sort();
        idx.dedup();
        assert_eq!(idx.len(), StageName::WORKERS.len());
    }
}
