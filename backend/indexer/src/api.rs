//! Axum REST API handlers.
//!
//! Everything here is read-only: the API serves what the indexer has
//! already stored and never talks to the chain.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;
use crate::trail::{self, BatchTrail};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    pub batch_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: IndexerError) -> Response {
    let status = match err {
        IndexerError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /batches/:id/events`
///
/// Returns all indexed events for the given batch identifier.
pub async fn get_batch_events(
    State(state): State<Arc<ApiState>>,
    Path(batch_id): Path<String>,
) -> Response {
    match db::get_events_for_batch(&state.pool, &batch_id).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(EventsResponse {
                    batch_id,
                    count,
                    events,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// `GET /batches/:id/trail`
///
/// Returns the provenance trail of a batch: who produced, certified,
/// distributed and sold it, and the stage it has reached.
pub async fn get_batch_trail(
    State(state): State<Arc<ApiState>>,
    Path(batch_id): Path<String>,
) -> Response {
    match load_trail(&state.pool, &batch_id).await {
        Ok(trail) => (StatusCode::OK, Json(trail)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn load_trail(pool: &SqlitePool, batch_id: &str) -> crate::errors::Result<BatchTrail> {
    let events = db::get_events_for_batch(pool, batch_id).await?;
    trail::build_trail(batch_id, &events)
        .ok_or_else(|| IndexerError::NotFound(format!("Batch {batch_id}")))
}

/// `GET /events`
///
/// Returns all indexed events across all batches.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    match db::get_all_events(&state.pool).await {
        Ok(events) => {
            let count = events.len();
            (StatusCode::OK, Json(AllEventsResponse { count, events })).into_response()
        }
        Err(e) => error_response(e),
    }
}
