use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::ServerState;

/// GET /health
/// Returns a simple status object with the service version and which build is served.
pub async fn health_handler(State(state): State<ServerState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-review-hub",
        "variant": state.variant.name(),
    }))
}
