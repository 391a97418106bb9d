//! HTTP route handlers for the contact editor API.

use std::path::Path;

use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{
    application::contact_sync::{read_contacts, sync_contacts},
    domain::contact::ContactList,
};

use super::{error::ApiError, state::AppState};

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/get-sheet", get(get_sheet))
        .route("/update-sheet", post(update_sheet))
        .route("/make/run", post(run_scenario))
}

/// The whole application: the API under `/api`, plus static files from
/// `ui_dir` when it exists.
pub fn app(state: AppState, ui_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match ui_dir {
        Some(ui_dir) if ui_dir.exists() => {
            info!(ui_dir = %ui_dir.display(), "serving static UI files");
            router.fallback_service(ServeDir::new(ui_dir).append_index_html_on_directories(true))
        }
        Some(ui_dir) => {
            info!(ui_dir = %ui_dir.display(), "UI directory not found, API-only mode");
            router
        }
        None => router,
    }
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Serialize)]
struct RowsResponse {
    rows: ContactList,
}

/// GET /api/get-sheet - the contact list as stored in the sheet.
async fn get_sheet(State(state): State<AppState>) -> Result<Json<RowsResponse>, ApiError> {
    let backend = state.sheets.connect().await.map_err(ApiError::sheet_read)?;
    let rows = read_contacts(backend.as_ref(), &state.layout)
        .await
        .map_err(ApiError::sheet_read)?;

    Ok(Json(RowsResponse { rows }))
}

/// Extracts the contact list from an update request. Runs before anything
/// touches the sheet.
fn parse_rows(body: &[u8]) -> Result<ContactList, ApiError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::invalid_payload("Invalid payload: body must be JSON"))?;

    let Some(rows) = payload.get("rows").filter(|rows| rows.is_array()) else {
        return Err(ApiError::invalid_payload(
            "Invalid payload: rows must be an array",
        ));
    };

    serde_json::from_value(rows.clone())
        .map_err(|error| ApiError::invalid_payload(format!("Invalid payload: {}", error)))
}

/// POST /api/update-sheet - replace the contact list with `{ rows }`.
async fn update_sheet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let rows = parse_rows(&body)?;

    let backend = state
        .sheets
        .connect()
        .await
        .map_err(ApiError::sheet_update)?;
    let outcome = sync_contacts(backend.as_ref(), &state.layout, &rows)
        .await
        .map_err(ApiError::sync)?;

    info!(
        written_rows = outcome.written_rows,
        cleared = outcome.cleared.is_some(),
        "sheet updated"
    );
    Ok(Json(
        json!({ "message": "✅ Google Sheet Updated Successfully!" }),
    ))
}

/// POST /api/make/run - start the calling scenario.
async fn run_scenario(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let ack = state.trigger.trigger_run().await.map_err(ApiError::run)?;

    Ok(Json(json!({ "ok": true, "runResponse": ack.body })))
}
