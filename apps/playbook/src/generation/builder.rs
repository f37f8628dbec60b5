//! Turns a [`FormInput`] into the instruction string sent to the completion
//! service.
//!
//! Field values are embedded verbatim: the template is rendered by handlebars
//! with escaping switched off, and rendered values are never re-expanded.

use handlebars::{no_escape, Handlebars, RenderError};
use serde_json::json;

use crate::generation::guidance::{escalation_guidance, tone_guidance};
use crate::generation::prompts::{COMPANY_PLACEHOLDER, PLAYBOOK_PROMPT_TEMPLATE};
use crate::models::{FormInput, QueryType};

/// The query description the prompt talks about.
///
/// `Other` with a non-empty custom query uses the custom text; every other
/// combination (including `Other` with an empty custom query) uses the label.
pub fn resolve_query(input: &FormInput) -> &str {
    if input.query_type == QueryType::Other && !input.custom_query.is_empty() {
        &input.custom_query
    } else {
        input.query_type.label()
    }
}

/// Company name, or the placeholder when left blank.
pub fn resolve_company(input: &FormInput) -> &str {
    if input.company.is_empty() {
        COMPANY_PLACEHOLDER
    } else {
        &input.company
    }
}

/// Builds the full playbook prompt.
pub fn build_prompt(input: &FormInput) -> Result<String, RenderError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(no_escape);

    let render_vals = json!({
        "product": input.product,
        "company": resolve_company(input),
        "query": resolve_query(input),
        "tone": input.tone.label().to_lowercase(),
        "tone_guidance": tone_guidance(input.tone),
        "priority": input.priority.label().to_lowercase(),
        "escalation_guidance": escalation_guidance(input.priority),
    });
    handlebars.render_template(PLAYBOOK_PROMPT_TEMPLATE, &render_vals)
}
