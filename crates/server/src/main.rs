// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use shiftboard_api::{
    ApiError, AttendanceRequest, CreateMissionRequest, CreateShiftRequest, CreateVolunteerRequest,
    ListShiftsResponse, RegisterRequest, RegistrationResponse, UnregisterRequest,
    VolunteerResponse, create_mission, create_shift, create_volunteer, list_shifts, register,
    shift_detail, unregister, validate_attendance,
};
use shiftboard_domain::{AttendanceOutcome, Mission, ShiftDetail, ShiftSnapshot};
use shiftboard_persistence::SqlitePersistence;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::live::{DEFAULT_FEED_BUFFER, SnapshotBroadcaster, live_handler};

/// Shiftboard Server - HTTP and live push server for volunteer shifts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Snapshots buffered per live client before it starts skipping
    #[arg(long, default_value_t = DEFAULT_FEED_BUFFER)]
    feed_buffer: usize,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The shift store.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Fan-out of committed seat changes to `/live` clients.
    broadcaster: SnapshotBroadcaster,
}

impl AppState {
    fn new(persistence: SqlitePersistence, feed_buffer: usize) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            broadcaster: SnapshotBroadcaster::new(feed_buffer),
        }
    }
}

/// Query parameters for listing shifts.
#[derive(Debug, Deserialize)]
struct ListShiftsQuery {
    /// The volunteer the listing is built for.
    volunteer_id: i64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Machine-readable error code.
    error: String,
    /// Human-readable message, shown to the volunteer as-is.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error code.
    code: String,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(error = %err, code = err.code(), "Request rejected");
        }
        Self {
            status,
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/shifts` endpoint.
///
/// Lists the shifts visible now, with the volunteer's registrations.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListShiftsQuery>,
) -> Result<Json<ListShiftsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListShiftsResponse = list_shifts(
        &mut persistence,
        query.volunteer_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/shifts/{shift_id}` endpoint.
async fn handle_shift_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<ShiftDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: ShiftDetail = shift_detail(&mut persistence, shift_id)?;
    drop(persistence);

    Ok(Json(detail))
}

/// Handler for POST `/registrations` endpoint.
///
/// Takes a seat and broadcasts the shift's fresh snapshot.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    info!(
        shift_id = req.shift_id,
        volunteer_id = req.volunteer_id,
        "Handling register request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RegistrationResponse = register(&mut persistence, &req)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&response.snapshot);
    Ok(Json(response))
}

/// Handler for POST `/registrations/cancel` endpoint.
///
/// Gives a seat back and broadcasts the shift's fresh snapshot.
async fn handle_unregister(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UnregisterRequest>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    info!(
        shift_id = req.shift_id,
        volunteer_id = req.volunteer_id,
        "Handling unregister request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RegistrationResponse = unregister(&mut persistence, &req)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&response.snapshot);
    Ok(Json(response))
}

/// Handler for POST `/attendance` endpoint.
async fn handle_validate_attendance(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AttendanceRequest>,
) -> Result<Json<AttendanceOutcome>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let outcome: AttendanceOutcome = validate_attendance(&mut persistence, &req)?;
    drop(persistence);

    info!(
        shift_id = req.shift_id,
        volunteer_id = req.volunteer_id,
        hours_credited = outcome.hours_credited,
        "Validated attendance"
    );
    Ok(Json(outcome))
}

/// Handler for POST `/missions` endpoint.
async fn handle_create_mission(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateMissionRequest>,
) -> Result<Json<Mission>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mission: Mission = create_mission(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(mission))
}

/// Handler for POST `/shifts` endpoint.
///
/// New shifts are broadcast too, so mounted boards learn their capacity.
async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateShiftRequest>,
) -> Result<Json<ShiftSnapshot>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let snapshot: ShiftSnapshot = create_shift(&mut persistence, &req)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&snapshot);
    Ok(Json(snapshot))
}

/// Handler for POST `/volunteers` endpoint.
async fn handle_create_volunteer(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateVolunteerRequest>,
) -> Result<Json<VolunteerResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let volunteer: VolunteerResponse = create_volunteer(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(volunteer))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/shifts", get(handle_list_shifts))
        .route("/shifts", post(handle_create_shift))
        .route("/shifts/{shift_id}", get(handle_shift_detail))
        .route("/registrations", post(handle_register))
        .route("/registrations/cancel", post(handle_unregister))
        .route("/attendance", post(handle_validate_attendance))
        .route("/missions", post(handle_create_mission))
        .route("/volunteers", post(handle_create_volunteer))
        .route("/live", get(live_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shiftboard Server");

    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!(db_path, "Using file-based database");
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence, args.feed_buffer));

    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
