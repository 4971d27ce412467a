//! Waymark Data -- loading wizard definitions and answer files.
//!
//! Definitions are read from YAML, JSON, TOML or RON (chosen by file
//! extension), resolved into a [`waymark_core::Wizard`] and validated by the
//! core builder. [`lint::lint_wizard`] adds advisory checks on top.

pub mod answers;
pub mod lint;
pub mod loader;
pub mod schema;

pub use answers::{AnswerSet, load_answers, parse_answers};
pub use lint::{ConditionSite, LintWarning, lint_wizard};
pub use loader::{
    FileSource, Format, InlineSource, LoadError, WizardSource, detect_format, load_from_source,
    load_wizard, parse_wizard,
};
