//! Per-session mutable state.

use std::time::{Duration, Instant};

use crate::model::Wizard;
use crate::value::{Value, Variables};

/// Variables, position and history of one running session.
///
/// Created at session start from the wizard's seed variables and discarded
/// when the session ends. Never shared between sessions.
#[derive(Debug, Clone)]
pub struct WizardContext {
    variables: Variables,
    current_page: String,
    history: Vec<String>,
    started: Instant,
}

impl WizardContext {
    /// Seed a context positioned on the wizard's start page.
    pub fn new(wizard: &Wizard) -> Self {
        Self {
            variables: wizard.variables().clone(),
            current_page: wizard.start_id().to_string(),
            history: vec![wizard.start_id().to_string()],
            started: Instant::now(),
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// ID of the page being shown. Empty once the session has terminated.
    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    /// Visited page IDs in order, including the current one.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub(crate) fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Move to `page`; an empty id marks the session as terminated.
    pub(crate) fn advance(&mut self, page: &str) {
        self.current_page = page.to_string();
        if !page.is_empty() {
            self.history.push(page.to_string());
        }
    }

    pub(crate) fn into_parts(self) -> (Variables, Vec<String>, Duration) {
        let elapsed = self.started.elapsed();
        (self.variables, self.history, elapsed)
    }

    pub fn expand(&self, text: &str) -> String {
        expand_placeholders(text, &self.variables)
    }
}

/// Replace every `{{name}}` in `text` with the string form of `variables[name]`.
///
/// Whitespace inside the braces is ignored. Unknown names and unterminated
/// braces are left as written.
pub fn expand_placeholders(text: &str, variables: &Variables) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = after[..close].trim();
        match variables.get(name) {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}
