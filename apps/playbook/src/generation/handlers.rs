//! Axum route handlers for the JSON API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{ExportedDocument, PDF_MIME};
use crate::generation::pipeline::{export_latest, generate_playbook};
use crate::history::HistoryEntry;
use crate::models::{FailureKind, FormInput, GenerationOutcome, SpeechStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GenerationError {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// `generated`, `skipped` or `failed`.
    pub status: &'static str,
    pub number: Option<usize>,
    pub playbook: Option<String>,
    /// What the output area shows, error marker included.
    pub display_text: Option<String>,
    pub speech: Option<SpeechStatus>,
    pub error: Option<GenerationError>,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        let display_text = outcome.display_text();
        match outcome {
            GenerationOutcome::Skipped => GenerateResponse {
                status: "skipped",
                number: None,
                playbook: None,
                display_text,
                speech: None,
                error: None,
            },
            GenerationOutcome::Generated {
                number,
                text,
                speech,
            } => GenerateResponse {
                status: "generated",
                number: Some(number),
                playbook: Some(text),
                display_text,
                speech: Some(speech),
                error: None,
            },
            GenerationOutcome::Failed { kind, message } => GenerateResponse {
                status: "failed",
                number: None,
                playbook: None,
                display_text,
                speech: None,
                error: Some(GenerationError { kind, message }),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub count: usize,
    /// Newest first.
    pub entries: Vec<HistoryEntry>,
}

/// Serves an exported PDF as a download.
pub fn attachment(document: ExportedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, PDF_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.filename),
            ),
        ],
        document.bytes,
    )
        .into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session_id = state.sessions.create();
    (StatusCode::CREATED, Json(SessionResponse { session_id }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.end(session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}

/// POST /api/v1/sessions/:id/playbooks
///
/// Runs the generation pipeline. Completion failures come back as
/// `status: "failed"` with a 200, exactly like the page shows them.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<FormInput>,
) -> Result<Json<GenerateResponse>, AppError> {
    let outcome = generate_playbook(
        state.completion.as_ref(),
        state.speech.as_ref(),
        &state.sessions,
        session_id,
        &input,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// GET /api/v1/sessions/:id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let history = state
        .sessions
        .snapshot(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let entries = history.newest_first();
    Ok(Json(HistoryResponse {
        session_id,
        count: entries.len(),
        entries,
    }))
}

/// POST /api/v1/sessions/:id/export
///
/// Exports the latest playbook and returns it as `application/pdf`.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let document = export_latest(&state.exporter, &state.sessions, session_id).await?;
    Ok(attachment(document))
}
