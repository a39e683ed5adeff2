//! Web layer for the trip planner.
//!
//! Provides JSON endpoints for planning trips and inspecting the pipeline.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
