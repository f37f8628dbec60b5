//! Handlebars templates for the HTML page, registered once at startup.
//!
//! `{{value}}` output is HTML-escaped by the registry's default escape function.

use std::sync::Arc;

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page";

#[derive(Clone)]
pub struct Templates {
    registry: Arc<Handlebars<'static>>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(
            PAGE_TEMPLATE,
            include_str!("../templates/page.html.hbs"),
        )?;
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render_page<T: Serialize>(&self, data: &T) -> Result<String, RenderError> {
        self.registry.render(PAGE_TEMPLATE, data)
    }
}
