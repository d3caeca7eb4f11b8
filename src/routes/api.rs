use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    error::AppError,
    models::{alert::AlertRequest, trip::Trip},
    services::schedule::{filter_trips, DepartureWindow},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/scan", get(scan))
        .route("/api/alert", post(alert))
        .route("/health", get(health))
}

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    date: Option<String>,
    direction: Option<String>,
    from: Option<String>,
    to: Option<String>,
    available: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    date: String,
    direction: String,
    items: Vec<Trip>,
}

async fn scan(
    State(state): State<AppState>,
    Query(query): Query<ScanQuery>,
) -> Result<Json<ScanResponse>, AppError> {
    let (Some(date), Some(direction)) = (present(query.date), present(query.direction)) else {
        return Err(AppError::BadRequest("date and direction required".into()));
    };

    let trips = state
        .ferry
        .fetch_trips(&date, &direction)
        .await
        .inspect_err(|err| error!(%date, %direction, "error fetching spots: {err}"))?;

    let window = DepartureWindow {
        from: present(query.from),
        to: present(query.to),
        available_only: query.available.unwrap_or(false),
    };
    let items = filter_trips(trips, &window);

    Ok(Json(ScanResponse {
        date,
        direction,
        items,
    }))
}

async fn alert(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, AppError> {
    // The body is JSON whatever the Content-Type header says.
    let request: AlertRequest = serde_json::from_slice(&body)
        .map_err(|err| AppError::BadRequest(format!("invalid JSON: {err}")))?;

    // Sends run detached; their outcome is only logged.
    drop(state.alerts.dispatch(&request));

    Ok("Alert queued")
}

async fn health() -> &'static str {
    "OK"
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
