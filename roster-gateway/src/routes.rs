//! Axum route handlers for the Roster API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use roster_core::{NewStudent, StudentId};
use roster_store::StudentStore;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;

// ── Shared state ─────────────────────────────────────────────────────────────

type Store = Arc<dyn StudentStore>;

/// Plain-text body served at `/`.
pub const GREETING: &str = "welcome to students api";

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateStudentResponse {
    pub id: StudentId,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around the given record store.
pub fn create_router(store: Store) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/students", post(create_student).get(list_students))
        .route("/api/students/{id}", get(get_student))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — plain greeting.
pub async fn welcome() -> &'static str {
    GREETING
}

/// `POST /api/students` — validate and persist a new student.
///
/// # Errors
/// Returns [`ApiError::InvalidRequest`] if the body is empty, unreadable or
/// not valid JSON, [`ApiError::PayloadTooLarge`] if it exceeds the body
/// limit, [`ApiError::Validation`] if a field constraint fails, and
/// [`ApiError::Store`] if the write fails.
pub async fn create_student(
    State(store): State<Store>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("creating a student");
    let body = body?;
    let candidate = decode_create_body(&body)?;
    candidate.validate()?;

    let id = store
        .create_student(&candidate.name, &candidate.email, candidate.age)
        .await?;
    tracing::info!(student_id = %id, "student created");
    Ok((StatusCode::CREATED, Json(CreateStudentResponse { id })))
}

/// `GET /api/students/{id}` — fetch one student.
///
/// # Errors
/// Returns [`ApiError::InvalidRequest`] if `id` is not an integer or not
/// valid UTF-8 once decoded, and [`ApiError::Store`] if the id is unknown or
/// the read fails.
pub async fn get_student(
    State(store): State<Store>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(raw_id) = path?;
    tracing::info!(id = %raw_id, "getting a student");
    let id = parse_student_id(&raw_id)?;
    let student = store.get_student_by_id(id).await.inspect_err(|e| {
        tracing::warn!(%id, error = %e, "student lookup failed");
    })?;
    Ok(Json(student))
}

/// `GET /api/students` — list every student, possibly none.
///
/// # Errors
/// Returns [`ApiError::Store`] if the read fails.
pub async fn list_students(State(store): State<Store>) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("getting all students");
    let students = store.list_students().await?;
    Ok(Json(students))
}

// ── Decoding helpers ──────────────────────────────────────────────────────────

/// Decode a create request body. Absent fields are left at their defaults
/// so that validation, not decoding, reports them.
///
/// # Errors
/// Returns [`ApiError::InvalidRequest`] for an empty or whitespace-only body
/// and for anything that is not a JSON object of the expected shape.
pub fn decode_create_body(body: &[u8]) -> Result<NewStudent, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::InvalidRequest("empty body".to_owned()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn parse_student_id(raw: &str) -> Result<StudentId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::InvalidRequest(format!("invalid student id {raw:?}: {e}")))
}
