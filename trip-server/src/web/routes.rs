//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::pipeline::{PlanResponse, TripRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/agents", get(agents))
        .route("/api/plan", post(plan_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::now())
}

/// List the registered worker stages.
async fn agents(State(state): State<AppState>) -> Json<AgentsResponse> {
    let agents = state
        .orchestrator
        .stage_names()
        .into_iter()
        .map(AgentInfo::from)
        .collect();

    Json(AgentsResponse { agents })
}

/// Plan a trip.
///
/// Responds 400 with the failure record when the request is rejected.
async fn plan_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: TripRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Unreadable plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let plan = PlanResponse::from(state.orchestrator.plan(&req).await);
    let status = if plan.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(plan)).into_response())
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Orchestrator, PipelineConfig};
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = PipelineConfig::default().with_seed(3);
        create_router(AppState::new(Orchestrator::builtin(config).unwrap()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_plan(body: impl Into<Body>) -> Request<Body> {
        Request::post("/api/plan")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, json) = send(Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "trip-server");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn agents_lists_workers_in_order() {
        let (status, json) = send(Request::get("/api/agents").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<&str> = json["agents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            [
                "search_flights",
                "search_hotels",
                "search_trains",
                "search_road",
                "build_itinerary"
            ]
        );
        assert!(json["agents"].as_array().unwrap().iter().all(|a| a["status"] == "ready"));
    }

    #[tokio::test]
    async fn plan_returns_full_record() {
        let body = json!({
            "origin": "Coimbatore",
            "destination": "Ooty",
            "departure_date": "2025-06-15",
            "return_date": "2025-06-18",
            "budget": "moderate",
            "travelers": 2,
            "interests": ["nature", "food"],
        });
        let (status, json) = send(post_plan(body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "complete");
        assert_eq!(json["data"]["trains"][0]["train_number"], "56136");
        assert_eq!(json["data"]["itinerary"].as_array().unwrap().len(), 3);
        assert_eq!(json["data"]["steps_completed"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn rejected_request_is_400_with_failure_record() {
        let body = json!({ "destination": "Goa" });
        let (status, json) = send(post_plan(body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "Departure date is required");
        assert_eq!(json["steps_completed"], json!(["collect_input"]));
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, json) = send(post_plan("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }
}
