//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so other crates
//! in the workspace can use the same fixtures through the `test-utils`
//! feature.

use std::collections::VecDeque;

use crate::component::InputError;
use crate::engine::{PageView, RenderError, Renderer, TaskError, TaskRunner};
use crate::model::{
    ChoiceOption, NavigationRule, Page, PageKind, Task, ValidationRule, Wizard, WizardBuilder,
};
use crate::value::{Value, Variables};

// ===========================================================================
// Sample wizards
// ===========================================================================

/// `welcome` (info) → `complete` (success).
pub fn welcome_complete_wizard() -> Wizard {
    let mut b = WizardBuilder::new("test-wizard", "Test Wizard");
    b.version("1.0").variable("test_var", "default_value");
    b.add_page(
        Page::new("welcome", PageKind::Info)
            .title("Welcome")
            .content("This is a test wizard")
            .next(NavigationRule::to("complete")),
    );
    b.add_page(
        Page::new("complete", PageKind::Success)
            .title("Complete")
            .content("Wizard completed successfully"),
    );
    b.build().expect("welcome/complete wizard is valid")
}

/// A branching project-setup flow touching every interactive page kind:
///
/// ```text
/// welcome → name → use_db ─true─→ database → features → setup → done
///                         └false───────────↗
/// ```
pub fn project_wizard() -> Wizard {
    let mut b = WizardBuilder::new("project-setup", "Project Setup");
    b.version("1.0")
        .description("Scaffold a new project")
        .variable("use_database", false);

    b.add_page(
        Page::new("welcome", PageKind::Info)
            .title("New project")
            .next(NavigationRule::to("name")),
    );
    b.add_page(
        Page::new("name", PageKind::Input)
            .title("Project name")
            .prompt("Name")
            .variable("project_name")
            .validation(
                ValidationRule::new()
                    .required()
                    .pattern("^[a-z][a-z0-9-]*$")
                    .expect("literal pattern compiles"),
            )
            .next(NavigationRule::to("use_db")),
    );
    b.add_page(
        Page::new("use_db", PageKind::Confirm)
            .title("Use a database?")
            .variable("use_database")
            .next(NavigationRule::when("use_database true", "database", "features")),
    );
    b.add_page(
        Page::new("database", PageKind::Select)
            .title("Database")
            .variable("database")
            .option(ChoiceOption::new("postgres", "PostgreSQL"))
            .option(ChoiceOption::new("mysql", "MySQL"))
            .option(ChoiceOption::new("sqlite", "SQLite").description("file based"))
            .next(NavigationRule::to("features")),
    );
    b.add_page(
        Page::new("features", PageKind::MultiSelect)
            .title("Features")
            .variable("features")
            .option(ChoiceOption::new("docker", "Docker").variable("enable_docker"))
            .option(ChoiceOption::new("ci", "CI pipeline").variable("enable_ci"))
            .next(NavigationRule::to("setup")),
    );
    b.add_page(
        Page::new("setup", PageKind::Progress)
            .title("Setting up {{project_name}}")
            .task(Task::new("scaffold", "Create layout", "mkdir -p {{project_name}}"))
            .task(Task {
                condition: Some("enable_docker".to_string()),
                ..Task::new("docker", "Write Dockerfile", "touch {{project_name}}/Dockerfile")
            })
            .task(Task {
                condition: Some("database == sqlite".to_string()),
                weight: Some(2.0),
                ..Task::new("migrate", "Create database", "touch {{project_name}}/app.db")
            })
            .next(NavigationRule::to("done")),
    );
    b.add_page(Page::new("done", PageKind::Success).title("{{project_name}} is ready"));
    b.build().expect("project wizard is valid")
}

pub fn sample_variables() -> Variables {
    let mut v = Variables::new();
    v.insert("str_var".to_string(), Value::from("hello"));
    v.insert("bool_var".to_string(), Value::Bool(true));
    v.insert("false_var".to_string(), Value::Bool(false));
    v.insert("num_var".to_string(), Value::Number(42.0));
    v
}

// ===========================================================================
// Collaborators
// ===========================================================================

/// Answers interactive pages from a fixed queue and records what it saw.
/// Aborts once the queue is empty.
#[derive(Debug, Default)]
pub struct ScriptedRenderer {
    answers: VecDeque<Value>,
    /// Every page shown or asked, in order.
    pub pages_seen: Vec<String>,
    /// Theme name active for each page.
    pub themes_seen: Vec<String>,
    /// `(page, error)` for every redisplay after a rejected answer.
    pub errors_seen: Vec<(String, InputError)>,
    /// `(task, percent)` progress reports.
    pub progress: Vec<(String, f64)>,
    /// Expanded titles, in order.
    pub titles: Vec<String>,
}

impl ScriptedRenderer {
    pub fn new(answers: Vec<Value>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn record(&mut self, page: &Page, view: &PageView<'_>) {
        self.pages_seen.push(page.id.clone());
        self.themes_seen.push(view.theme.name.clone());
        self.titles.push(view.expand(&page.title));
        if let Some(err) = view.error {
            self.errors_seen.push((page.id.clone(), err.clone()));
        }
    }
}

impl Renderer for ScriptedRenderer {
    fn show(&mut self, page: &Page, view: &PageView<'_>) -> Result<(), RenderError> {
        self.record(page, view);
        Ok(())
    }

    fn ask(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError> {
        self.record(page, view);
        self.answers.pop_front().ok_or(RenderError::Aborted)
    }

    fn progress(
        &mut self,
        _page: &Page,
        task: &Task,
        percent: f64,
        _view: &PageView<'_>,
    ) -> Result<(), RenderError> {
        self.progress.push((task.id.clone(), percent));
        Ok(())
    }
}

/// Records task IDs instead of running commands. `ran` lists every task
/// attempted, including the one made to fail.
#[derive(Debug, Default)]
pub struct RecordingTaskRunner {
    pub ran: Vec<String>,
    fail_on: Option<String>,
}

impl RecordingTaskRunner {
    pub fn failing_on(task: impl Into<String>) -> Self {
        Self {
            ran: Vec::new(),
            fail_on: Some(task.into()),
        }
    }
}

impl TaskRunner for RecordingTaskRunner {
    fn run(&mut self, task: &Task, _variables: &Variables) -> Result<(), TaskError> {
        self.ran.push(task.id.clone());
        if self.fail_on.as_deref() == Some(task.id.as_str()) {
            return Err(TaskError::new("exit status: 1"));
        }
        Ok(())
    }
}
