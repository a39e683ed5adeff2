//! Data transfer objects for web responses.
//!
//! Plan requests and results use [`crate::pipeline::TripRequest`] and
//! [`crate::pipeline::PlanResponse`] directly.

use serde::Serialize;

use crate::pipeline::StageName;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,

    /// RFC 3339 time the response was produced
    pub timestamp: String,

    pub version: &'static str,
}

impl HealthResponse {
    pub fn now() -> Self {
        Self {
            status: "healthy",
            service: env!("CARGO_PKG_NAME"),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// One registered worker stage.
#[derive(Debug, Serialize)]
pub struct AgentInfo {
    /// Stage id, e.g. "search_flights"
    pub id: StageName,
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    pub status: &'static str,
}

impl From<StageName> for AgentInfo {
    fn from(stage: StageName) -> Self {
        Self {
            id: stage,
            name: stage.label(),
            role: stage.role(),
            description: stage.description(),
            status: "ready",
        }
    }
}

/// Response listing the worker stages.
#[derive(Debug, Serialize)]
pub struct AgentsResponse {
    pub agents: Vec<AgentInfo>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
