use serde::Serialize;

/// Marker prepended to every generation failure shown to the user.
pub const ERROR_MARKER: &str = "❌ Error:";

/// What happened to the read-aloud request of a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SpeechStatus {
    NotRequested,
    Spoken,
    Failed(String),
}

/// Why a generation produced no playbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Authentication,
    Api,
    EmptyResponse,
}

/// The single result type of one "generate" interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// No product was entered; nothing was called and history is untouched.
    Skipped,
    Generated {
        /// 1-based position of the new entry in the session history.
        number: usize,
        text: String,
        speech: SpeechStatus,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl GenerationOutcome {
    /// Text for the output area. Failures render as `❌ Error: <message>`.
    pub fn display_text(&self) -> Option<String> {
        match self {
            GenerationOutcome::Skipped => None,
            GenerationOutcome::Generated { text, .. } => Some(text.clone()),
            GenerationOutcome::Failed { message, .. } => Some(format!("{ERROR_MARKER} {message}")),
        }
    }
}
