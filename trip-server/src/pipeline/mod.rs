//! Trip-planning pipeline.
//!
//! Validates a request, fans out to the option synthesizers and the
//! itinerary builder, and compiles their outputs into one plan. Worker
//! failures are recorded, never fatal; only input validation can end a run
//! early.

mod compile;
mod config;
mod graph;
mod input;
mod orchestrator;
mod outcome;
mod request;
mod stage;
mod state;


pub use compile::{Cheapest, CheapestOffer, summarize};
pub use config::PipelineConfig;
pub use graph::{GraphError, StageGraph};
pub use input::{TripParams, ValidationError, collect_input};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, stage_rng};
pub use outcome::{PlanData, PlanFailure, PlanResponse, PlanSuccess};
pub use request::{Interests, TripRequest};
pub use stage::{
    FlightStage, HotelStage, ItineraryStage, RoadStage, Stage, StageContext, StageError,
    StageOutput, TrainStage, builtin_stages,
};
pub use state::{PlannerState, RunStatus, StageName};
