use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

pub mod assessments;
pub mod coaching;
pub mod friends;
pub mod state;

pub use state::AppState;

/// Creates the application router with all routes
///
/// CORS is open: the original edge functions answered every origin and the
/// service keeps that contract. Each request carries an `x-request-id` that
/// also tags the HTTP trace span.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/assessments", post(assessments::submit))
        .route("/users/:id/profile", get(assessments::profile))
        .route("/users/:id/recommendations", get(friends::recommendations))
        .route("/users/:id/friends", get(friends::list_friends))
        .route("/users/:id/friends/:friend_id", delete(friends::remove_friend))
        .route("/users/:id/requests", get(friends::list_requests))
        .route("/friend-requests", post(friends::send_request))
        .route("/friend-requests/:id/accept", post(friends::accept_request))
        .route("/friend-requests/:id/decline", post(friends::decline_request))
        .route("/recommendations/coaching", post(coaching::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
