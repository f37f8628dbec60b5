//! The interactive page: form, result, download button and history panel.
//!
//! Server-rendered; a browser session is tracked by the `playbook_session` cookie.

use anyhow::Context;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::handlers::attachment;
use crate::generation::pipeline::{export_latest, generate_playbook};
use crate::history::HistoryEntry;
use crate::models::{FormInput, GenerateForm, GenerationOutcome, Priority, QueryType, SpeechStatus, Tone};
use crate::state::AppState;
use crate::templates::Templates;

pub const SESSION_COOKIE: &str = "playbook_session";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub history: Option<String>,
}

impl PageQuery {
    fn show_history(&self) -> bool {
        matches!(self.history.as_deref(), Some("on" | "true" | "1"))
    }
}

/// Everything one render of the page needs.
#[derive(Debug, Default)]
pub struct PageView {
    pub form: FormInput,
    pub outcome: Option<GenerationOutcome>,
    pub notice: Option<String>,
    /// `Some` when the history toggle is on.
    pub history: Option<Vec<HistoryEntry>>,
    pub missing_api_key: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Session cookie
// ────────────────────────────────────────────────────────────────────────────

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Resumes the cookie's session or starts a new one (setting the cookie).
fn ensure_session(state: &AppState, jar: CookieJar) -> (CookieJar, Uuid) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());
    let id = state.sessions.resume_or_create(existing);
    if existing == Some(id) {
        (jar, id)
    } else {
        (jar.add(session_cookie(id)), id)
    }
}

fn base_view(state: &AppState) -> PageView {
    PageView {
        missing_api_key: state.config.groq_api_key.is_none(),
        ..Default::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, session_id) = ensure_session(&state, jar);

    let mut view = base_view(&state);
    if query.show_history() {
        view.history = Some(
            state
                .sessions
                .snapshot(session_id)
                .map(|h| h.newest_first())
                .unwrap_or_default(),
        );
    }

    let html = render_page(&state.templates, &view)?;
    Ok((jar, Html(html)))
}

/// POST /generate
pub async fn handle_generate_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<GenerateForm>,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, session_id) = ensure_session(&state, jar);
    let input = FormInput::from(form);

    let outcome = generate_playbook(
        state.completion.as_ref(),
        state.speech.as_ref(),
        &state.sessions,
        session_id,
        &input,
    )
    .await?;

    let view = PageView {
        form: input,
        outcome: Some(outcome),
        ..base_view(&state)
    };
    let html = render_page(&state.templates, &view)?;
    Ok((jar, Html(html)))
}

/// POST /download
pub async fn handle_download(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, session_id) = ensure_session(&state, jar);

    match export_latest(&state.exporter, &state.sessions, session_id).await {
        Ok(document) => Ok((jar, attachment(document)).into_response()),
        Err(e) => {
            let notice = match e {
                AppError::NotFound(_) => "Generate a playbook before downloading.".to_string(),
                other => format!("Download failed: {other}"),
            };
            let view = PageView {
                notice: Some(notice),
                ..base_view(&state)
            };
            let html = render_page(&state.templates, &view)?;
            Ok((jar, Html(html)).into_response())
        }
    }
}

/// POST /session/reset
pub async fn handle_reset(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        state.sessions.end(id);
    }
    let id = state.sessions.create();
    (jar.add(session_cookie(id)), Redirect::to("/"))
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SelectOption {
    value: &'static str,
    selected: bool,
}

fn options<T: Copy + PartialEq>(
    all: &[T],
    selected: T,
    label: fn(T) -> &'static str,
) -> Vec<SelectOption> {
    all.iter()
        .map(|&item| SelectOption {
            value: label(item),
            selected: item == selected,
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct OutcomeContext {
    text: String,
    downloadable: bool,
    speech_error: Option<String>,
}

impl OutcomeContext {
    /// `None` for a skipped generation: the page shows no result area.
    fn from_outcome(outcome: &GenerationOutcome) -> Option<Self> {
        let text = outcome.display_text()?;
        let (downloadable, speech_error) = match outcome {
            GenerationOutcome::Generated { speech, .. } => match speech {
                SpeechStatus::Failed(message) => (true, Some(message.clone())),
                _ => (true, None),
            },
            _ => (false, None),
        };
        Some(Self {
            text,
            downloadable,
            speech_error,
        })
    }
}

/// Data handed to the page template.
#[derive(Debug, Serialize)]
struct PageContext<'a> {
    form: &'a FormInput,
    query_options: Vec<SelectOption>,
    tone_options: Vec<SelectOption>,
    priority_options: Vec<SelectOption>,
    outcome: Option<OutcomeContext>,
    notice: Option<&'a str>,
    history_shown: bool,
    history: &'a [HistoryEntry],
    missing_api_key: bool,
}

impl<'a> PageContext<'a> {
    fn new(view: &'a PageView) -> Self {
        let form = &view.form;
        Self {
            form,
            query_options: options(&QueryType::ALL, form.query_type, QueryType::label),
            tone_options: options(&Tone::ALL, form.tone, Tone::label),
            priority_options: options(&Priority::ALL, form.priority, Priority::label),
            outcome: view.outcome.as_ref().and_then(OutcomeContext::from_outcome),
            notice: view.notice.as_deref(),
            history_shown: view.history.is_some(),
            history: view.history.as_deref().unwrap_or_default(),
            missing_api_key: view.missing_api_key,
        }
    }
}

pub fn render_page(templates: &Templates, view: &PageView) -> anyhow::Result<String> {
    templates
        .render_page(&PageContext::new(view))
        .context("rendering page template")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureKind;

    fn render(view: &PageView) -> String {
        render_page(&Templates::new().unwrap(), view).unwrap()
    }

    #[test]
    fn test_user_text_is_escaped() {
        let view = PageView {
            form: FormInput {
                product: r#""><script>x</script>"#.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render(&view);
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_fresh_page_has_no_download_button() {
        let html = render(&PageView::default());
        assert!(html.contains("AI Customer Support Playbook Generator"));
        assert!(!html.contains("Download as PDF"));
        assert!(html.contains("Show Playbook History"));
    }

    #[test]
    fn test_generated_outcome_offers_download() {
        let view = PageView {
            outcome: Some(GenerationOutcome::Generated {
                number: 1,
                text: "Hello <customer>".to_string(),
                speech: SpeechStatus::NotRequested,
            }),
            ..Default::default()
        };
        let html = render(&view);
        assert!(html.contains("Hello &lt;customer&gt;"));
        assert!(html.contains("Download as PDF"));
    }

    #[test]
    fn test_failed_outcome_is_shown_without_download() {
        let view = PageView {
            outcome: Some(GenerationOutcome::Failed {
                kind: FailureKind::Transport,
                message: "connection refused".to_string(),
            }),
            ..Default::default()
        };
        let html = render(&view);
        assert!(html.contains("❌ Error: connection refused"));
        assert!(!html.contains("Download as PDF"));
    }

    #[test]
    fn test_speech_failure_notice() {
        let view = PageView {
            outcome: Some(GenerationOutcome::Generated {
                number: 1,
                text: "x".to_string(),
                speech: SpeechStatus::Failed("no engine".to_string()),
            }),
            ..Default::default()
        };
        assert!(render(&view).contains("Read-aloud failed: no engine"));
    }

    #[test]
    fn test_empty_history_message() {
        let view = PageView {
            history: Some(Vec::new()),
            ..Default::default()
        };
        assert!(render(&view).contains("No history available yet."));
    }

    #[test]
    fn test_history_renders_numbers_in_given_order() {
        let view = PageView {
            history: Some(vec![
                HistoryEntry {
                    number: 2,
                    text: "second".to_string(),
                },
                HistoryEntry {
                    number: 1,
                    text: "first".to_string(),
                },
            ]),
            ..Default::default()
        };
        let html = render(&view);
        let two = html.find("Playbook #2").unwrap();
        let one = html.find("Playbook #1").unwrap();
        assert!(two < one);
    }

    #[test]
    fn test_form_keeps_selected_values() {
        let view = PageView {
            form: FormInput {
                product: "Router".to_string(),
                tone: Tone::Apologetic,
                read_aloud: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render(&view);
        assert!(html.contains("value=\"Router\""));
        assert!(html.contains("<option value=\"Apologetic\" selected>"));
        assert!(html.contains("name=\"read_aloud\" checked"));
    }

    #[test]
    fn test_missing_api_key_banner() {
        let view = PageView {
            missing_api_key: true,
            ..Default::default()
        };
        assert!(render(&view).contains("GROQ_API_KEY is not set"));
    }

    #[test]
    fn test_history_toggle_values() {
        let on = PageQuery {
            history: Some("on".to_string()),
        };
        assert!(on.show_history());
        assert!(!PageQuery::default().show_history());
    }
}
