//! Runs the stage graph over a trip request.
//!
//! `collect_input` runs first and ends the run on a validation failure.
//! Worker stages then run layer by layer, either inline or on the blocking
//! pool, and `compile_results` runs last. A worker that fails or panics
//! leaves its result empty and records an error; the run continues.
//!
//! Each worker draws from its own RNG, seeded from the run seed and the
//! worker's name, so the sequential and concurrent schedulers produce the
//! same plan for the same seed.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::future::join_all;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::reference::ReferenceData;

use super::compile::compile_results;
use super::config::PipelineConfig;
use super::graph::{GraphError, StageGraph};
use super::input::collect_input;
use super::request::TripRequest;
use super::stage::{Stage, StageContext, StageError, StageOutput, builtin_stages};
use super::state::{PlannerState, RunStatus, StageName};

/// Golden-ratio increment used to spread per-stage seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derive a worker's RNG from the run seed and its name.
pub fn stage_rng(seed: u64, stage: StageName) -> StdRng {
    StdRng::seed_from_u64(seed ^ (stage.index() + 1).wrapping_mul(SEED_STRIDE))
}

/// The trip-planning pipeline.
pub struct Orchestrator {
    reference: Arc<ReferenceData>,
    config: Arc<PipelineConfig>,
    stages: Vec<Arc<dyn Stage>>,
    layers: Vec<Vec<StageName>>,
}

/// Builder for [`Orchestrator`].
pub struct OrchestratorBuilder {
    reference: ReferenceData,
    config: PipelineConfig,
    stages: Vec<Arc<dyn Stage>>,
}

impl OrchestratorBuilder {
    /// Swap in a stage with the same name, or append it if new.
    pub fn replace_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        match self.stages.iter_mut().find(|s| s.name() == stage.name()) {
            Some(slot) => *slot = stage,
            None => self.stages.push(stage),
        }
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the stage graph and build the orchestrator.
    pub fn build(self) -> Result<Orchestrator, GraphError> {
        let mut graph = StageGraph::new();
        graph.add(StageName::CollectInput, &[])?;
        for stage in &self.stages {
            graph.add(stage.name(), &stage.depends_on())?;
        }
        let workers: Vec<StageName> = self.stages.iter().map(|s| s.name()).collect();
        graph.add(StageName::CompileResults, &workers)?;

        let layers = graph
            .layers()?
            .into_iter()
            .map(|layer| {
                layer
                    .into_iter()
                    .filter(|s| !matches!(s, StageName::CollectInput | StageName::CompileResults))
                    .collect::<Vec<_>>()
            })
            .filter(|layer| !layer.is_empty())
            .collect();

        Ok(Orchestrator {
            reference: Arc::new(self.reference),
            config: Arc::new(self.config),
            stages: self.stages,
            layers,
        })
    }
}

impl Orchestrator {
    /// A builder preloaded with the five built-in workers.
    pub fn builder(reference: ReferenceData, config: PipelineConfig) -> OrchestratorBuilder {
        OrchestratorBuilder {
            reference,
            config,
            stages: builtin_stages(),
        }
    }

    /// The built-in pipeline over the built-in reference tables.
    pub fn builtin(config: PipelineConfig) -> Result<Self, GraphError> {
        Self::builder(ReferenceData::builtin(), config).build()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Worker stage names in declaration order.
    pub fn stage_names(&self) -> Vec<StageName> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    fn stage(&self, name: StageName) -> Option<&Arc<dyn Stage>> {
        self.stages.iter().find(|s| s.name() == name)
    }

    fn next_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Run with the configured scheduler.
    pub async fn plan(&self, request: &TripRequest) -> PlannerState {
        if self.config.concurrent {
            self.run_concurrent(request).await
        } else {
            self.run(request)
        }
    }

    /// Run every stage on the calling thread.
    pub fn run(&self, request: &TripRequest) -> PlannerState {
        self.run_seeded(request, self.next_seed())
    }

    pub fn run_seeded(&self, request: &TripRequest, seed: u64) -> PlannerState {
        let (mut state, ctx) = match self.start(request) {
            Ok(started) => started,
            Err(state) => return state,
        };

        for layer in &self.layers {
            state.set_status(RunStatus::Searching);
            for &name in layer {
                let Some(stage) = self.stage(name) else {
                    continue;
                };
                let mut rng = stage_rng(seed, name);
                let result = panic::catch_unwind(AssertUnwindSafe(|| stage.run(&ctx, &mut rng)))
                    .map_err(|payload| StageError::from_panic(name, payload))
                    .and_then(|r| r.map_err(|source| StageError::Failed { stage: name, source }));
                record(&mut state, name, result);
            }
        }

        finish(state, seed)
    }

    /// Run each layer's workers on the blocking pool and join them.
    pub async fn run_concurrent(&self, request: &TripRequest) -> PlannerState {
        self.run_concurrent_seeded(request, self.next_seed()).await
    }

    pub async fn run_concurrent_seeded(&self, request: &TripRequest, seed: u64) -> PlannerState {
        let (mut state, ctx) = match self.start(request) {
            Ok(started) => started,
            Err(state) => return state,
        };

        for layer in &self.layers {
            state.set_status(RunStatus::Searching);

            let (names, handles): (Vec<_>, Vec<_>) = layer
                .iter()
                .filter_map(|&name| self.stage(name))
                .map(|stage| {
                    let name = stage.name();
                    let stage = Arc::clone(stage);
                    let ctx = ctx.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        let mut rng = stage_rng(seed, name);
                        stage.run(&ctx, &mut rng)
                    });
                    (name, handle)
                })
                .unzip();

            // join_all preserves input order, so outputs land in declaration order
            for (name, joined) in names.into_iter().zip(join_all(handles).await) {
                let result = match joined {
                    Ok(r) => r.map_err(|source| StageError::Failed { stage: name, source }),
                    Err(e) if e.is_panic() => Err(StageError::from_panic(name, e.into_panic())),
                    Err(e) => Err(StageError::Panicked {
                        stage: name,
                        message: e.to_string(),
                    }),
                };
                record(&mut state, name, result);
            }
        }

        finish(state, seed)
    }

    /// Validate input. On failure the returned state is already terminal.
    fn start(&self, request: &TripRequest) -> Result<(PlannerState, StageContext), PlannerState> {
        let mut state = PlannerState::new();
        let result = collect_input(request, &self.reference.locations, &self.config);
        state.complete_step(StageName::CollectInput);

        match result {
            Ok(params) => {
                debug!(
                    origin = %params.origin,
                    destination = %params.destination,
                    tier = %params.tier,
                    days = params.num_days,
                    "Input accepted"
                );
                let params = Arc::new(params);
                state.params = Some(Arc::clone(&params));
                let ctx = StageContext {
                    params,
                    reference: Arc::clone(&self.reference),
                    config: Arc::clone(&self.config),
                };
                Ok((state, ctx))
            }
            Err(errors) => {
                for e in &errors {
                    state.record_error(e.to_string());
                }
                state.set_status(RunStatus::Error);
                warn!(errors = ?state.errors(), "Input rejected");
                Err(state)
            }
        }
    }
}

/// Apply a worker's result. Output for another stage's slice is rejected.
fn record(state: &mut PlannerState, name: StageName, result: Result<StageOutput, StageError>) {
    let result = result.and_then(|output| match output.stage() {
        produced if produced == name => Ok(output),
        produced => Err(StageError::WrongOutput {
            stage: name,
            produced,
        }),
    });

    match result {
        Ok(output) => {
            debug!(stage = %name, records = output.len(), "Stage finished");
            output.apply(state);
        }
        Err(e) => {
            warn!(stage = %name, error = %e, "Stage failed");
            state.record_error(e.to_string());
        }
    }
    state.complete_step(name);
}

fn finish(mut state: PlannerState, seed: u64) -> PlannerState {
    compile_results(&mut state);
    info!(
        seed,
        flights = state.flights.len(),
        hotels = state.hotels.len(),
        trains = state.trains.len(),
        road = state.road_options.len(),
        days = state.itinerary.len(),
        errors = state.errors().len(),
        "Plan compiled"
    );
    state
}
