use std::sync::Arc;

use crate::config::Config;
use crate::export::DocumentExporter;
use crate::history::SessionRegistry;
use crate::llm_client::CompletionBackend;
use crate::speech::SpeechEngine;
use crate::templates::Templates;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion client. Production: `LlmClient`.
    pub completion: Arc<dyn CompletionBackend>,
    pub speech: Arc<dyn SpeechEngine>,
    pub exporter: DocumentExporter,
    /// Per-session playbook history. Lives only as long as the process.
    pub sessions: SessionRegistry,
    pub templates: Templates,
    pub config: Config,
}
