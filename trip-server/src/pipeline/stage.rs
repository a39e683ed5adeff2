//! Worker stages and their outputs.

use std::any::Any;
use std::sync::Arc;

use rand::rngs::StdRng;

use crate::reference::ReferenceData;
use crate::synth::{
    FlightOffer, HotelOffer, ItineraryDay, RoadOffer, SearchOutcome, SynthError, TrainOffer,
    build_itinerary, generate_flights, generate_hotels, generate_road, generate_trains,
};

use super::config::PipelineConfig;
use super::input::TripParams;
use super::state::{PlannerState, StageName};

/// Read-only inputs shared by every worker in a run.
#[derive(Debug, Clone)]
pub struct StageContext {
    pub params: Arc<TripParams>,
    pub reference: Arc<ReferenceData>,
    pub config: Arc<PipelineConfig>,
}

/// What a worker produced.
#[derive(Debug, Clone)]
pub enum StageOutput {
    Flights(SearchOutcome<FlightOffer>),
    Hotels(SearchOutcome<HotelOffer>),
    Trains(SearchOutcome<TrainOffer>),
    Road(SearchOutcome<RoadOffer>),
    Itinerary(Vec<ItineraryDay>),
}

impl StageOutput {
    /// Number of real records, for logging.
    pub fn len(&self) -> usize {
        match self {
            StageOutput::Flights(o) => o.len(),
            StageOutput::Hotels(o) => o.len(),
            StageOutput::Trains(o) => o.len(),
            StageOutput::Road(o) => o.len(),
            StageOutput::Itinerary(days) => days.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stage whose slice of the state this output fills.
    pub fn stage(&self) -> StageName {
        match self {
            StageOutput::Flights(_) => StageName::SearchFlights,
            StageOutput::Hotels(_) => StageName::SearchHotels,
            StageOutput::Trains(_) => StageName::SearchTrains,
            StageOutput::Road(_) => StageName::SearchRoad,
            StageOutput::Itinerary(_) => StageName::BuildItinerary,
        }
    }

    pub(crate) fn apply(self, state: &mut PlannerState) {
        match self {
            StageOutput::Flights(o) => state.flights = o,
            StageOutput::Hotels(o) => state.hotels = o,
            StageOutput::Trains(o) => state.trains = o,
            StageOutput::Road(o) => state.road_options = o,
            StageOutput::Itinerary(days) => state.itinerary = days,
        }
    }
}

/// Error from a worker stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("{} error: {source}", .stage.label())]
    Failed { stage: StageName, source: SynthError },

    #[error("{} error: {message}", .stage.label())]
    Panicked { stage: StageName, message: String },

    #[error("{} error: returned output belonging to {produced}", .stage.label())]
    WrongOutput {
        stage: StageName,
        produced: StageName,
    },
}

impl StageError {
    pub fn stage(&self) -> StageName {
        match self {
            StageError::Failed { stage, .. }
            | StageError::Panicked { stage, .. }
            | StageError::WrongOutput { stage, .. } => *stage,
        }
    }

    pub(crate) fn from_panic(stage: StageName, payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(s) => (*s).to_string(),
                Err(_) => "stage panicked".to_string(),
            },
        };
        StageError::Panicked { stage, message }
    }
}

/// One independent unit of work in the pipeline.
///
/// Stages only read the shared context; all randomness comes from the
/// `rng` the orchestrator hands in.
pub trait Stage: Send + Sync {
    fn name(&self) -> StageName;

    /// Stages that must finish first.
    fn depends_on(&self) -> Vec<StageName> {
        vec![StageName::CollectInput]
    }

    fn run(&self, ctx: &StageContext, rng: &mut StdRng) -> Result<StageOutput, SynthError>;
}

pub struct FlightStage;

impl Stage for FlightStage {
    fn name(&self) -> StageName {
        StageName::SearchFlights
    }

    fn run(&self, ctx: &StageContext, rng: &mut StdRng) -> Result<StageOutput, SynthError> {
        let query = ctx.params.search_query(ctx.config.stay_nights);
        generate_flights(&query, &ctx.reference, rng).map(StageOutput::Flights)
    }
}

pub struct HotelStage;

impl Stage for HotelStage {
    fn name(&self) -> StageName {
        StageName::SearchHotels
    }

    fn run(&self, ctx: &StageContext, rng: &mut StdRng) -> Result<StageOutput, SynthError> {
        let query = ctx.params.search_query(ctx.config.stay_nights);
        generate_hotels(&query, &ctx.reference, rng).map(StageOutput::Hotels)
    }
}

pub struct TrainStage;

impl Stage for TrainStage {
    fn name(&self) -> StageName {
        StageName::SearchTrains
    }

    fn run(&self, ctx: &StageContext, rng: &mut StdRng) -> Result<StageOutput, SynthError> {
        let query = ctx.params.search_query(ctx.config.stay_nights);
        generate_trains(&query, &ctx.reference, rng).map(StageOutput::Trains)
    }
}

pub struct RoadStage;

impl Stage for RoadStage {
    fn name(&self) -> StageName {
        StageName::SearchRoad
    }

    fn run(&self, ctx: &StageContext, rng: &mut StdRng) -> Result<StageOutput, SynthError> {
        let query = ctx.params.search_query(ctx.config.stay_nights);
        generate_road(&query, &ctx.reference, rng).map(StageOutput::Road)
    }
}

pub struct ItineraryStage;

impl Stage for ItineraryStage {
    fn name(&self) -> StageName {
        StageName::BuildItinerary
    }

    fn run(&self, ctx: &StageContext, rng: &mut StdRng) -> Result<StageOutput, SynthError> {
        let request = ctx.params.itinerary_request(ctx.config.max_days);
        build_itinerary(&request, &ctx.reference, rng).map(StageOutput::Itinerary)
    }
}

/// The five built-in workers in declaration order.
pub fn builtin_stages() -> Vec<Arc<dyn Stage>> {
    vec![
        Arc::new(FlightStage),
        Arc::new(HotelStage),
        Arc::new(TrainStage),
        Arc::new(RoadStage),
        Arc::new(ItineraryStage),
    ]
}
