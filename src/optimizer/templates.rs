// Persona template loading and rendering

use std::fs;
use std::path::Path;

/// The three persona templates, loaded once per optimizer construction.
///
/// A template that fails to load degrades to an inline error string: the
/// problem surfaces through the progress stream instead of failing
/// construction.
#[derive(Debug, Clone)]
pub struct Templates {
    pub drafter: String,
    pub critic: String,
    pub coordinator: String,
}

impl Templates {
    /// Load the templates from `dir`.
    ///
    /// Returns the templates plus human-readable load errors for the caller
    /// to emit as coordinator log events.
    pub fn load(dir: &Path) -> (Self, Vec<String>) {
        let mut errors = Vec::new();
        let mut read = |file: &str| match fs::read_to_string(dir.join(file)) {
            Ok(text) => text,
            Err(e) => {
                let message = format!("Error loading {file} template: {e}");
                tracing::warn!(template = file, error = %e, "Template load failed");
                errors.push(message.clone());
                message
            }
        };

        let templates = Self {
            drafter: read("drafter.md"),
            critic: read("critic.md"),
            coordinator: read("coordinator.md"),
        };
        (templates, errors)
    }
}

/// Replace every occurrence of `placeholder` in `template` with `value`.
///
/// Literal substitution only, no escaping. An absent placeholder is a
/// silent no-op, not an error.
pub fn render(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(placeholder, value)
}
