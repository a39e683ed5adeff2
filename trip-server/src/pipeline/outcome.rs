//! The record returned to callers.

use serde::Serialize;

use crate::synth::{FlightOffer, HotelOffer, ItineraryDay, RoadOffer, SearchOutcome, TrainOffer};

use super::compile::Cheapest;
use super::state::{PlannerState, RunStatus, StageName};

#[derive(Debug, Clone, Serialize)]
pub struct PlanData {
    pub flights: SearchOutcome<FlightOffer>,
    pub hotels: SearchOutcome<HotelOffer>,
    pub trains: SearchOutcome<TrainOffer>,
    pub road_options: SearchOutcome<RoadOffer>,
    pub itinerary: Vec<ItineraryDay>,
    pub summary: String,
    pub cheapest: Cheapest,
    pub errors: Vec<String>,
    pub steps_completed: Vec<StageName>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanSuccess {
    pub success: bool,
    pub data: PlanData,
    pub status: RunStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanFailure {
    pub success: bool,
    pub error: String,
    pub status: RunStatus,
    pub steps_completed: Vec<StageName>,
}

/// Success or failure, serialized without a tag.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PlanResponse {
    Success(PlanSuccess),
    Failure(PlanFailure),
}

impl PlanResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, PlanResponse::Success(_))
    }
}

impl From<PlannerState> for PlanResponse {
    fn from(state: PlannerState) -> Self {
        let steps_completed = state.steps_completed().to_vec();

        if state.status() == RunStatus::Error {
            return PlanResponse::Failure(PlanFailure {
                success: false,
                error: state.errors().join("; "),
                status: RunStatus::Error,
                steps_completed,
            });
        }

        let cheapest = Cheapest::of(&state);
        let errors = state.errors().to_vec();
        let status = state.status();
        PlanResponse::Success(PlanSuccess {
            success: true,
            data: PlanData {
                flights: state.flights,
                hotels: state.hotels,
                trains: state.trains,
                road_options: state.road_options,
                itinerary: state.itinerary,
                summary: state.summary,
                cheapest,
                errors,
                steps_completed,
            },
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_shape() {
        let mut state = PlannerState::new();
        state.complete_step(StageName::CollectInput);
        state.record_error("Destination is required");
        state.set_status(RunStatus::Error);

        let resp = PlanResponse::from(state);
        assert!(!resp.is_success());
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "success": false,
                "error": "Destination is required",
                "status": "error",
                "steps_completed": ["collect_input"],
            })
        );
    }

    #[test]
    fn success_shape() {
        let mut state = PlannerState::new();
        state.complete_step(StageName::CollectInput);
        state.complete_step(StageName::CompileResults);
        state.set_status(RunStatus::Complete);
        state.summary = "ok".into();

        let json = serde_json::to_value(PlanResponse::from(state)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "complete");
        assert_eq!(json["data"]["flights"], json!([]));
        assert_eq!(json["data"]["road_options"], json!([]));
        assert_eq!(json["data"]["summary"], "ok");
        assert_eq!(json["data"]["cheapest"]["flight"], json!(null));
        assert_eq!(
            json["data"]["steps_completed"],
            json!(["collect_input", "compile_results"])
        );
    }
}
