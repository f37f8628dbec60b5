//! Runs one "generate" interaction end to end and exports the latest playbook.
//!
//! Flow: presence check → build_prompt → completion → history append →
//!       optional read-aloud. Export is a separate trigger on the latest entry.
//!
//! Every stage result is folded into `GenerationOutcome` here; completion and
//! speech failures never escape as errors.

use anyhow::Context;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{DocumentExporter, ExportedDocument};
use crate::generation::builder::build_prompt;
use crate::history::SessionRegistry;
use crate::llm_client::CompletionBackend;
use crate::models::{FormInput, GenerationOutcome, SpeechStatus};
use crate::speech::SpeechEngine;

/// Runs one "generate" interaction for `session_id`.
///
/// Returns `Err` only when the session does not exist or the prompt template
/// fails to render.
pub async fn generate_playbook(
    completion: &dyn CompletionBackend,
    speech: &dyn SpeechEngine,
    sessions: &SessionRegistry,
    session_id: Uuid,
    input: &FormInput,
) -> Result<GenerationOutcome, AppError> {
    if !sessions.contains(session_id) {
        return Err(session_not_found(session_id));
    }

    // Step 1: Presence check
    if !input.has_product() {
        info!("Generate skipped for session {session_id}: no product entered");
        return Ok(GenerationOutcome::Skipped);
    }

    // Step 2: Prompt
    let prompt = build_prompt(input).context("rendering playbook prompt")?;

    // Step 3: Completion
    info!(
        "Generating playbook for session {session_id} (query={}, tone={}, priority={})",
        input.query_type.label(),
        input.tone.label(),
        input.priority.label()
    );
    let text = match completion.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Playbook generation failed for session {session_id}: {e}");
            return Ok(GenerationOutcome::Failed {
                kind: e.kind(),
                message: e.to_string(),
            });
        }
    };

    // Step 4: History
    let number = sessions
        .append(session_id, text.clone())
        .ok_or_else(|| session_not_found(session_id))?;
    info!("Session {session_id}: stored playbook #{number}");

    // Step 5: Read aloud
    let speech_status = if input.read_aloud {
        match speech.speak(&text).await {
            Ok(()) => SpeechStatus::Spoken,
            Err(e) => {
                warn!("Read-aloud failed for session {session_id}: {e}");
                SpeechStatus::Failed(e.to_string())
            }
        }
    } else {
        SpeechStatus::NotRequested
    };

    Ok(GenerationOutcome::Generated {
        number,
        text,
        speech: speech_status,
    })
}

/// Exports the session's most recent playbook to a PDF.
pub async fn export_latest(
    exporter: &DocumentExporter,
    sessions: &SessionRegistry,
    session_id: Uuid,
) -> Result<ExportedDocument, AppError> {
    if !sessions.contains(session_id) {
        return Err(session_not_found(session_id));
    }
    let latest = sessions
        .latest(session_id)
        .ok_or_else(|| AppError::NotFound("No playbook has been generated yet".to_string()))?;

    let document = exporter.export_async(latest).await?;
    info!(
        "Session {session_id}: exported {} ({} cells, {} pages)",
        document.path.display(),
        document.cell_count,
        document.page_count
    );
    Ok(document)
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}
