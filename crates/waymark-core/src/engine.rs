//! The wizard state machine.
//!
//! States are page IDs. A session starts on the wizard's start page, and
//! every completed page resolves its [`NavigationRule`] to the next ID; an
//! empty ID ends the session.
//!
//! There are two ways to drive a session:
//!
//! - [`Session`] is the step API. The caller asks for the current page,
//!   collects an answer however it likes, and calls [`Session::submit`] or
//!   [`Session::proceed`].
//! - [`WizardEngine::run`] drives a whole session through a [`Renderer`] and
//!   a [`TaskRunner`], redisplaying rejected pages until they validate.
//!
//! A [`Wizard`] is only ever borrowed, so one definition can back many
//! sessions at once. Each engine keeps its own selected theme.

use std::time::Duration;

use crate::component::{InputError, component_for};
use crate::condition::evaluate_condition;
use crate::context::WizardContext;
use crate::model::{NavigationRule, Page, PageKind, Task, Wizard};
use crate::theme::{Theme, ThemeRegistry, UnknownThemeError};
use crate::value::{Value, Variables};

// ===========================================================================
// Navigation
// ===========================================================================

/// Resolve the next page ID. `None` and empty targets both yield `""`.
pub fn evaluate_navigation<'r>(rule: Option<&'r NavigationRule>, variables: &Variables) -> &'r str {
    match rule {
        None => "",
        Some(NavigationRule::Page(target)) => target,
        Some(NavigationRule::Conditional {
            condition,
            if_true,
            if_false,
        }) => {
            if evaluate_condition(condition, variables) {
                if_true
            } else {
                if_false
            }
        }
    }
}

// ===========================================================================
// Errors
// ===========================================================================

/// Failure reported by a [`Renderer`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The user cancelled. The session ends without completing.
    #[error("aborted by user")]
    Aborted,

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Failure reported by a [`TaskRunner`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct TaskError {
    pub detail: String,
}

impl TaskError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Errors that stop a session. Invalid answers are not errors; they come
/// back as [`StepOutcome::Rejected`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("page not found: {page}")]
    PageNotFound { page: String },

    #[error("page '{page}' is a {kind} page and takes no answer")]
    NotAnInputPage { page: String, kind: PageKind },

    #[error("page '{page}' needs an answer before moving on")]
    AnswerRequired { page: String },

    #[error("session already finished")]
    SessionFinished,

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("task '{task}' failed: {detail}")]
    Task { task: String, detail: String },
}

// ===========================================================================
// Collaborators
// ===========================================================================

/// What a renderer needs besides the page itself.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub context: &'a WizardContext,
    pub theme: &'a Theme,
    /// Why the previous answer to this page was refused, if it was.
    pub error: Option<&'a InputError>,
}

impl PageView<'_> {
    /// Expand `{{name}}` placeholders against the session variables.
    pub fn expand(&self, text: &str) -> String {
        self.context.expand(text)
    }
}

/// Presents pages and collects answers.
pub trait Renderer {
    /// Display a page that takes no answer (info, progress, success, error).
    fn show(&mut self, page: &Page, view: &PageView<'_>) -> Result<(), RenderError>;

    /// Display an interactive page and return the raw answer. The engine
    /// validates it; an invalid answer leads to another `ask` for the same
    /// page with `view.error` set.
    fn ask(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError>;

    /// A task on a progress page finished. `percent` is cumulative and
    /// weight-proportional, reaching 100 with the last task that runs.
    fn progress(
        &mut self,
        page: &Page,
        task: &Task,
        percent: f64,
        view: &PageView<'_>,
    ) -> Result<(), RenderError> {
        let _ = (page, task, percent, view);
        Ok(())
    }
}

/// Executes progress-page tasks.
pub trait TaskRunner {
    fn run(&mut self, task: &Task, variables: &Variables) -> Result<(), TaskError>;
}

/// Logs each task instead of running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRun;

impl TaskRunner for DryRun {
    fn run(&mut self, task: &Task, _variables: &Variables) -> Result<(), TaskError> {
        tracing::info!(task = %task.id, command = %task.command, "dry run, task skipped");
        Ok(())
    }
}

/// Tasks of `page` whose condition holds, each paired with the cumulative
/// completion percentage after it runs.
pub fn plan_tasks<'p>(page: &'p Page, variables: &Variables) -> Vec<(&'p Task, f64)> {
    let selected: Vec<&Task> = page
        .tasks
        .iter()
        .filter(|task| match &task.condition {
            Some(condition) => evaluate_condition(condition, variables),
            None => true,
        })
        .collect();

    let total: f64 = selected.iter().map(|task| task.weight()).sum();
    let mut done = 0.0;
    let count = selected.len();
    selected
        .into_iter()
        .enumerate()
        .map(|(i, task)| {
            done += task.weight();
            // Pin the last one so float drift never leaves the bar at 99.99.
            let percent = if i + 1 == count {
                100.0
            } else {
                done / total * 100.0
            };
            (task, percent)
        })
        .collect()
}

// ===========================================================================
// Session
// ===========================================================================

/// Result of one step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The answer failed validation. Nothing changed; ask again.
    Rejected(InputError),
    /// Moved to the named page.
    Advanced(String),
    /// Navigation resolved to no page.
    Finished,
}

/// Summary of a session, produced by [`Session::finish`].
#[derive(Debug, Clone)]
pub struct WizardResult {
    /// `true` when navigation reached a terminal page; `false` when the
    /// session was abandoned.
    pub completed: bool,
    pub variables: Variables,
    /// Visited page IDs in order.
    pub history: Vec<String>,
    pub duration: Duration,
}

/// One walk through a wizard.
#[derive(Debug)]
pub struct Session<'w> {
    wizard: &'w Wizard,
    context: WizardContext,
    finished: bool,
}

impl<'w> Session<'w> {
    pub fn new(wizard: &'w Wizard) -> Self {
        tracing::info!(wizard = wizard.id(), start = wizard.start_id(), "session started");
        Self {
            wizard,
            context: WizardContext::new(wizard),
            finished: false,
        }
    }

    pub fn wizard(&self) -> &'w Wizard {
        self.wizard
    }

    /// The page awaiting an answer or acknowledgement, `None` once finished.
    pub fn current_page(&self) -> Option<&'w Page> {
        if self.finished {
            return None;
        }
        self.wizard.find_page(self.context.current_page())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    /// Answer the current interactive page.
    ///
    /// The value goes through the page's component; if it is refused the
    /// session is left exactly as it was. Otherwise it is stored under the
    /// page's variable, multiselect option flags are updated and navigation
    /// is resolved.
    pub fn submit(&mut self, value: Value) -> Result<StepOutcome, EngineError> {
        let page = self.active_page()?;
        let Some(mut component) = component_for(page) else {
            return Err(EngineError::NotAnInputPage {
                page: page.id.clone(),
                kind: page.kind,
            });
        };

        if let Err(err) = component.set_value(value).and_then(|()| component.validate()) {
            tracing::warn!(page = %page.id, error = %err, "answer rejected");
            return Ok(StepOutcome::Rejected(err));
        }

        let answer = component.get_value();
        if page.kind == PageKind::MultiSelect {
            let picked = answer.as_list().unwrap_or_default();
            for option in &page.options {
                if let Some(flag) = &option.variable {
                    let selected = picked.iter().any(|v| *v == option.value);
                    self.context.set(flag.clone(), Value::Bool(selected));
                }
            }
        }
        if let Some(name) = &page.variable {
            self.context.set(name.clone(), answer);
        }

        self.navigate(page)
    }

    /// Acknowledge the current display page and move on.
    pub fn proceed(&mut self) -> Result<StepOutcome, EngineError> {
        let page = self.active_page()?;
        if page.kind.is_interactive() {
            return Err(EngineError::AnswerRequired {
                page: page.id.clone(),
            });
        }
        self.navigate(page)
    }

    /// End the session and hand back its state. Sessions that never reached
    /// a terminal page report `completed: false`.
    pub fn finish(self) -> WizardResult {
        let completed = self.finished;
        let wizard = self.wizard.id().to_string();
        let (variables, history, duration) = self.context.into_parts();
        tracing::info!(
            wizard = %wizard,
            completed,
            pages = history.len(),
            elapsed_ms = duration.as_millis() as u64,
            "session finished"
        );
        WizardResult {
            completed,
            variables,
            history,
            duration,
        }
    }

    fn active_page(&self) -> Result<&'w Page, EngineError> {
        if self.finished {
            return Err(EngineError::SessionFinished);
        }
        self.current_page().ok_or_else(|| EngineError::PageNotFound {
            page: self.context.current_page().to_string(),
        })
    }

    fn navigate(&mut self, from: &Page) -> Result<StepOutcome, EngineError> {
        let target = evaluate_navigation(from.next.as_ref(), self.context.variables());
        tracing::debug!(from = %from.id, to = target, "navigation resolved");

        if target.is_empty() {
            self.finished = true;
            self.context.advance("");
            return Ok(StepOutcome::Finished);
        }

        if self.wizard.find_page(target).is_none() {
            self.finished = true;
            return Err(EngineError::PageNotFound {
                page: target.to_string(),
            });
        }

        self.context.advance(target);
        Ok(StepOutcome::Advanced(target.to_string()))
    }
}

// ===========================================================================
// Engine
// ===========================================================================

/// Starts and runs sessions with a selected theme.
#[derive(Debug, Clone)]
pub struct WizardEngine<'t> {
    themes: &'t ThemeRegistry,
    theme: Theme,
}

impl<'t> WizardEngine<'t> {
    /// Select [`ThemeRegistry::DEFAULT`], else the first registered theme.
    pub fn new(themes: &'t ThemeRegistry) -> Self {
        let theme = themes
            .get(ThemeRegistry::DEFAULT)
            .or_else(|| themes.names().first().and_then(|name| themes.get(name)))
            .cloned()
            .unwrap_or_else(Theme::default_theme);
        Self { themes, theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Switch to a registered theme. On failure the current one stays.
    pub fn set_theme(&mut self, name: &str) -> Result<(), UnknownThemeError> {
        let theme = self.themes.resolve(name)?;
        tracing::debug!(theme = name, "theme selected");
        self.theme = theme.clone();
        Ok(())
    }

    /// Registered theme names in registration order.
    pub fn list_themes(&self) -> Vec<String> {
        self.themes.names()
    }

    pub fn start<'w>(&self, wizard: &'w Wizard) -> Session<'w> {
        Session::new(wizard)
    }

    /// Run a whole session.
    ///
    /// Interactive pages are asked until their answer validates. Progress
    /// pages are shown, then their tasks run in order with progress reported
    /// after each. If the renderer reports [`RenderError::Aborted`] the
    /// session stops and the result has `completed: false`.
    pub fn run(
        &self,
        wizard: &Wizard,
        renderer: &mut dyn Renderer,
        tasks: &mut dyn TaskRunner,
    ) -> Result<WizardResult, EngineError> {
        let mut session = self.start(wizard);
        let mut rejection: Option<InputError> = None;

        while let Some(page) = session.current_page() {
            let view = PageView {
                context: session.context(),
                theme: &self.theme,
                error: rejection.as_ref(),
            };

            let outcome = if page.kind.is_interactive() {
                let Some(answer) = unless_aborted(renderer.ask(page, &view))? else {
                    return Ok(session.finish());
                };
                session.submit(answer)?
            } else {
                if unless_aborted(renderer.show(page, &view))?.is_none() {
                    return Ok(session.finish());
                }
                if page.kind == PageKind::Progress
                    && !self.run_tasks(page, session.context(), renderer, tasks)?
                {
                    return Ok(session.finish());
                }
                session.proceed()?
            };

            rejection = match outcome {
                StepOutcome::Rejected(err) => Some(err),
                StepOutcome::Advanced(_) | StepOutcome::Finished => None,
            };
        }

        Ok(session.finish())
    }

    /// Returns `false` if the renderer aborted part way.
    fn run_tasks(
        &self,
        page: &Page,
        context: &WizardContext,
        renderer: &mut dyn Renderer,
        tasks: &mut dyn TaskRunner,
    ) -> Result<bool, EngineError> {
        let view = PageView {
            context,
            theme: &self.theme,
            error: None,
        };

        for (task, percent) in plan_tasks(page, context.variables()) {
            tracing::debug!(page = %page.id, task = %task.id, "running task");
            tasks
                .run(task, context.variables())
                .map_err(|err| EngineError::Task {
                    task: task.id.clone(),
                    detail: err.detail,
                })?;
            if unless_aborted(renderer.progress(page, task, percent, &view))?.is_none() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// `Aborted` becomes `Ok(None)`; other render failures are errors.
fn unless_aborted<T>(result: Result<T, RenderError>) -> Result<Option<T>, EngineError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RenderError::Aborted) => {
            tracing::info!("session aborted by renderer");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChoiceOption, ValidationRule, WizardBuilder};
    use crate::test_utils::*;

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    #[test]
    fn navigation_resolution() {
        let mut vars = Variables::new();
        vars.insert("use_db".to_string(), Value::Bool(true));

        let rule = NavigationRule::to("next-page");
        assert_eq!(evaluate_navigation(Some(&rule), &vars), "next-page");

        let rule = NavigationRule::when("use_db true", "db-page", "skip-page");
        assert_eq!(evaluate_navigation(Some(&rule), &vars), "db-page");

        vars.insert("use_db".to_string(), Value::Bool(false));
        assert_eq!(evaluate_navigation(Some(&rule), &vars), "skip-page");

        assert_eq!(evaluate_navigation(None, &vars), "");
        assert_eq!(evaluate_navigation(Some(&NavigationRule::to("")), &vars), "");
    }

    #[test]
    fn malformed_condition_takes_false_branch() {
        let rule = NavigationRule::when("use_db >= 3", "yes", "no");
        assert_eq!(evaluate_navigation(Some(&rule), &Variables::new()), "no");
    }

    // -----------------------------------------------------------------------
    // Session stepping
    // -----------------------------------------------------------------------

    #[test]
    fn welcome_to_complete() {
        let wizard = welcome_complete_wizard();
        let mut session = Session::new(&wizard);

        assert_eq!(session.current_page().unwrap().id, "welcome");
        assert_eq!(
            session.proceed().unwrap(),
            StepOutcome::Advanced("complete".to_string())
        );
        assert_eq!(session.proceed().unwrap(), StepOutcome::Finished);
        assert!(session.is_finished());
        assert!(session.current_page().is_none());

        let result = session.finish();
        assert!(result.completed);
        assert_eq!(result.history, vec!["welcome", "complete"]);
    }

    #[test]
    fn rejected_answer_changes_nothing() {
        let wizard = project_wizard();
        let mut session = Session::new(&wizard);
        session.proceed().unwrap();
        let before = session.context().variables().clone();

        let outcome = session.submit(Value::from("")).unwrap();
        assert_eq!(outcome, StepOutcome::Rejected(InputError::Required));
        assert_eq!(session.current_page().unwrap().id, "name");
        assert_eq!(session.context().variables(), &before);

        let outcome = session.submit(Value::from("Bad Name")).unwrap();
        assert!(matches!(outcome, StepOutcome::Rejected(InputError::PatternMismatch { .. })));
        assert_eq!(session.context().variables(), &before);
    }

    #[test]
    fn wrong_kind_is_rejected_not_fatal() {
        let wizard = project_wizard();
        let mut session = Session::new(&wizard);
        session.proceed().unwrap();
        let outcome = session.submit(Value::Bool(true)).unwrap();
        assert!(matches!(outcome, StepOutcome::Rejected(InputError::KindMismatch { .. })));
        assert_eq!(session.current_page().unwrap().id, "name");
    }

    #[test]
    fn accepted_answer_is_stored_and_branches() {
        let wizard = project_wizard();
        let mut session = Session::new(&wizard);
        session.proceed().unwrap();
        session.submit(Value::from("atlas")).unwrap();
        assert_eq!(session.context().get("project_name"), Some(&Value::from("atlas")));

        // use_database defaults to false in the seed; answering yes branches.
        assert_eq!(
            session.submit(Value::Bool(true)).unwrap(),
            StepOutcome::Advanced("database".to_string())
        );
        session.submit(Value::from("postgres")).unwrap();
        assert_eq!(session.current_page().unwrap().id, "features");
    }

    #[test]
    fn false_branch_skips_database() {
        let wizard = project_wizard();
        let mut session = Session::new(&wizard);
        session.proceed().unwrap();
        session.submit(Value::from("atlas")).unwrap();
        assert_eq!(
            session.submit(Value::Bool(false)).unwrap(),
            StepOutcome::Advanced("features".to_string())
        );
        assert!(session.context().get("database").is_none());
    }

    #[test]
    fn multiselect_sets_option_flags() {
        let wizard = project_wizard();
        let mut session = Session::new(&wizard);
        session.proceed().unwrap();
        session.submit(Value::from("atlas")).unwrap();
        session.submit(Value::Bool(false)).unwrap();
        session.submit(Value::from(vec!["docker"])).unwrap();

        let ctx = session.context();
        assert_eq!(ctx.get("features"), Some(&Value::from(vec!["docker"])));
        assert_eq!(ctx.get("enable_docker"), Some(&Value::Bool(true)));
        assert_eq!(ctx.get("enable_ci"), Some(&Value::Bool(false)));
    }

    #[test]
    fn submit_on_display_page_fails() {
        let wizard = welcome_complete_wizard();
        let mut session = Session::new(&wizard);
        assert!(matches!(
            session.submit(Value::from("x")),
            Err(EngineError::NotAnInputPage { kind: PageKind::Info, .. })
        ));
    }

    #[test]
    fn proceed_on_input_page_fails() {
        let wizard = project_wizard();
        let mut session = Session::new(&wizard);
        session.proceed().unwrap();
        assert!(matches!(
            session.proceed(),
            Err(EngineError::AnswerRequired { ref page }) if page == "name"
        ));
    }

    #[test]
    fn stepping_after_finish_fails() {
        let wizard = welcome_complete_wizard();
        let mut session = Session::new(&wizard);
        session.proceed().unwrap();
        session.proceed().unwrap();
        assert!(matches!(session.proceed(), Err(EngineError::SessionFinished)));
        assert!(matches!(
            session.submit(Value::from("x")),
            Err(EngineError::SessionFinished)
        ));
    }

    #[test]
    fn abandoned_session_is_incomplete() {
        let wizard = welcome_complete_wizard();
        let session = Session::new(&wizard);
        let result = session.finish();
        assert!(!result.completed);
        assert_eq!(result.history, vec!["welcome"]);
    }

    #[test]
    fn page_without_variable_still_validates() {
        let mut b = WizardBuilder::new("w", "W");
        b.add_page(
            Page::new("ack", PageKind::Input)
                .validation(ValidationRule::new().required())
                .next(NavigationRule::to("")),
        );
        let wizard = b.build().unwrap();
        let mut session = Session::new(&wizard);
        assert!(matches!(
            session.submit(Value::from("")).unwrap(),
            StepOutcome::Rejected(_)
        ));
        assert_eq!(session.submit(Value::from("ok")).unwrap(), StepOutcome::Finished);
        assert!(session.context().variables().is_empty());
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    #[test]
    fn plan_skips_false_conditions_and_ends_at_100() {
        let page = Page::new("setup", PageKind::Progress)
            .task(Task::new("a", "A", "true"))
            .task(Task {
                condition: Some("use_docker".to_string()),
                ..Task::new("b", "B", "docker build .")
            })
            .task(Task {
                weight: Some(3.0),
                ..Task::new("c", "C", "true")
            });

        let plan = plan_tasks(&page, &Variables::new());
        let ids: Vec<&str> = plan.iter().map(|(t, _)| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(plan[0].1, 25.0);
        assert_eq!(plan[1].1, 100.0);
    }

    #[test]
    fn plan_with_no_tasks_is_empty() {
        let page = Page::new("setup", PageKind::Progress);
        assert!(plan_tasks(&page, &Variables::new()).is_empty());
    }

    // -----------------------------------------------------------------------
    // Engine
    // -----------------------------------------------------------------------

    #[test]
    fn run_with_scripted_renderer() {
        let themes = ThemeRegistry::with_builtins();
        let engine = WizardEngine::new(&themes);
        let wizard = project_wizard();
        let mut renderer = ScriptedRenderer::new(vec![
            Value::from(""),
            Value::from("atlas"),
            Value::Bool(true),
            Value::from("postgres"),
            Value::from(vec!["ci", "docker"]),
        ]);
        let mut tasks = RecordingTaskRunner::default();

        let result = engine.run(&wizard, &mut renderer, &mut tasks).unwrap();
        assert!(result.completed);
        assert_eq!(
            result.history,
            vec!["welcome", "name", "use_db", "database", "features", "setup", "done"]
        );
        assert_eq!(result.variables.get("database"), Some(&Value::from("postgres")));
        assert_eq!(result.variables.get("enable_ci"), Some(&Value::Bool(true)));

        // The empty name was asked again with the error attached.
        assert_eq!(renderer.errors_seen, vec![("name".to_string(), InputError::Required)]);

        // docker task ran because its flag is set.
        assert_eq!(tasks.ran, vec!["scaffold", "docker"]);
        assert_eq!(renderer.progress.last().map(|(_, p)| *p), Some(100.0));
    }

    #[test]
    fn run_aborted_is_incomplete() {
        let themes = ThemeRegistry::with_builtins();
        let engine = WizardEngine::new(&themes);
        let wizard = project_wizard();
        let mut renderer = ScriptedRenderer::new(vec![Value::from("atlas")]);

        let result = engine.run(&wizard, &mut renderer, &mut DryRun).unwrap();
        assert!(!result.completed);
        assert_eq!(result.history, vec!["welcome", "name", "use_db"]);
    }

    #[test]
    fn run_task_failure_is_error() {
        let themes = ThemeRegistry::with_builtins();
        let engine = WizardEngine::new(&themes);
        let wizard = project_wizard();
        let mut renderer = ScriptedRenderer::new(vec![
            Value::from("atlas"),
            Value::Bool(false),
            Value::from(Vec::<String>::new()),
        ]);
        let mut tasks = RecordingTaskRunner::failing_on("scaffold");

        let err = engine.run(&wizard, &mut renderer, &mut tasks).unwrap_err();
        assert!(matches!(err, EngineError::Task { ref task, .. } if task == "scaffold"));
        assert_eq!(tasks.ran, vec!["scaffold"]);
        assert!(renderer.progress.is_empty());
    }

    #[test]
    fn renderer_sees_selected_theme() {
        let themes = ThemeRegistry::with_builtins();
        let mut engine = WizardEngine::new(&themes);
        engine.set_theme("minimal").unwrap();
        let wizard = welcome_complete_wizard();
        let mut renderer = ScriptedRenderer::new(vec![]);

        engine.run(&wizard, &mut renderer, &mut DryRun).unwrap();
        assert_eq!(renderer.themes_seen, vec!["minimal", "minimal"]);
    }

    // -----------------------------------------------------------------------
    // Themes
    // -----------------------------------------------------------------------

    #[test]
    fn set_theme_known_and_unknown() {
        let themes = ThemeRegistry::with_builtins();
        let mut engine = WizardEngine::new(&themes);
        assert_eq!(engine.theme().name, "default");

        engine.set_theme("colorful").unwrap();
        assert_eq!(engine.theme().name, "colorful");
        assert_eq!(engine.list_themes(), vec!["default", "colorful", "minimal"]);

        let err = engine.set_theme("nonexistent").unwrap_err();
        assert_eq!(err.name, "nonexistent");
        assert_eq!(engine.theme().name, "colorful");
    }

    #[test]
    fn engines_select_themes_independently() {
        let themes = ThemeRegistry::with_builtins();
        let mut a = WizardEngine::new(&themes);
        let b = WizardEngine::new(&themes);
        a.set_theme("minimal").unwrap();
        assert_eq!(a.theme().name, "minimal");
        assert_eq!(b.theme().name, "default");
    }

    #[test]
    fn engine_on_registry_without_default() {
        let mut themes = ThemeRegistry::empty();
        themes.register(Theme::colorful());
        let engine = WizardEngine::new(&themes);
        assert_eq!(engine.theme().name, "colorful");
    }

    #[test]
    fn option_flags_only_for_multiselect() {
        let mut b = WizardBuilder::new("w", "W");
        b.add_page(
            Page::new("db", PageKind::Select)
                .variable("db")
                .option(ChoiceOption::new("pg", "Postgres").variable("is_pg")),
        );
        let wizard = b.build().unwrap();
        let mut session = Session::new(&wizard);
        session.submit(Value::from("pg")).unwrap();
        assert!(session.context().get("is_pg").is_none());
        assert_eq!(session.context().get("db"), Some(&Value::from("pg")));
    }

    #[test]
    fn error_display_messages() {
        let e = EngineError::PageNotFound {
            page: "ghost".to_string(),
        };
        assert_eq!(e.to_string(), "page not found: ghost");
        let e = EngineError::from(RenderError::Aborted);
        assert_eq!(e.to_string(), "render error: aborted by user");
        let e = EngineError::Task {
            task: "build".to_string(),
            detail: "exit status 2".to_string(),
        };
        assert!(e.to_string().contains("'build'"));
    }
}
