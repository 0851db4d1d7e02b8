pub mod calendar;
pub mod events;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use crate::error::AppError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(events::routes())
        .merge(calendar::routes())
}

// Liveness probe; also verifies the database is reachable
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.db.pool).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
