//! Template engine for output paths.

use crate::error::{CodegenError, Result};
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

/// Template engine using Handlebars.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        handlebars.set_strict_mode(true);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}
