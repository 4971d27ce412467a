//! Waymark Core -- the engine behind declarative configuration wizards.
//!
//! A wizard is a directed graph of pages described by data. This crate holds
//! the in-memory model of that graph and the machinery to walk it; reading
//! documents from disk lives in `waymark-data`, drawing pages in the
//! front end.
//!
//! # Session Flow
//!
//! 1. **Build** -- a [`model::WizardBuilder`] validates pages into an
//!    immutable [`model::Wizard`].
//! 2. **Start** -- [`engine::WizardEngine::start`] opens a
//!    [`engine::Session`] on the start page, seeded with the wizard's
//!    variables.
//! 3. **Answer** -- interactive pages bind a [`component::Component`]; the
//!    answer is set, validated and copied into the session variables.
//! 4. **Navigate** -- the page's [`model::NavigationRule`] resolves to the
//!    next page, consulting [`condition::evaluate_condition`] for branches.
//! 5. **Finish** -- an empty target ends the session and yields a
//!    [`engine::WizardResult`].
//!
//! ```rust,ignore
//! let themes = ThemeRegistry::with_builtins();
//! let engine = WizardEngine::new(&themes);
//! let result = engine.run(&wizard, &mut renderer, &mut tasks)?;
//! assert!(result.completed);
//! ```
//!
//! # Key Types
//!
//! - [`model::Wizard`] -- Frozen page arena plus seed variables.
//! - [`value::Value`] -- Closed set of variable shapes.
//! - [`component::Component`] -- Input, Select, MultiSelect and Confirm.
//! - [`engine::Renderer`] / [`engine::TaskRunner`] -- Collaborators the
//!   engine drives.
//! - [`theme::ThemeRegistry`] -- Named themes shared by reference.

pub mod component;
pub mod condition;
pub mod context;
pub mod engine;
pub mod model;
pub mod theme;
pub mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use component::{Component, InputError, component_for};
pub use condition::{Condition, evaluate_condition, parse_condition};
pub use context::{WizardContext, expand_placeholders};
pub use engine::{
    DryRun, EngineError, PageView, RenderError, Renderer, Session, StepOutcome, TaskError,
    TaskRunner, WizardEngine, WizardResult, evaluate_navigation, plan_tasks,
};
pub use model::{
    ChoiceOption, DefinitionError, NavigationRule, Page, PageKind, Task, ValidationRule, Wizard,
    WizardBuilder,
};
pub use theme::{ProgressStyle, SpinnerStyle, Theme, ThemeColor, ThemeRegistry, UnknownThemeError};
pub use value::{Value, ValueKind, Variables};
