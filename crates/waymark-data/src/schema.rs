//! Serde structs for wizard definition files.
//!
//! These mirror the on-disk shape and are deserialized from YAML, JSON, TOML
//! or RON, then resolved into core types by the loader. Everything optional
//! on disk is optional here; the loader decides what an absent field means.

use std::collections::BTreeMap;

use serde::Deserialize;
use waymark_core::{PageKind, Value};

// ===========================================================================
// Document root
// ===========================================================================

/// Top level of a definition file: everything lives under `wizard`.
#[derive(Debug, Clone, Deserialize)]
pub struct WizardDocument {
    pub wizard: WizardData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    #[serde(default)]
    pub pages: Vec<PageData>,
}

// ===========================================================================
// Pages
// ===========================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PageKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub variable: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub options: Vec<OptionData>,
    #[serde(default, alias = "validate")]
    pub validation: Option<ValidationData>,
    #[serde(default)]
    pub tasks: Vec<TaskData>,
    #[serde(default)]
    pub next: Option<NextData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionData {
    pub value: String,
    /// Falls back to `value` when omitted.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub variable: Option<String>,
}

/// Input constraints. Both `min_len` and the longer `min_length` spelling
/// are accepted (likewise for `max_*`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationData {
    #[serde(default)]
    pub required: bool,
    #[serde(default, alias = "min_length")]
    pub min_len: usize,
    #[serde(default, alias = "max_length")]
    pub max_len: usize,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskData {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// `next` block: either `page`, or `condition` with `true`/`false` targets.
///
/// RON cannot use `true`/`false` as field names, so `if_true`/`if_false`
/// are accepted everywhere as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextData {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default, rename = "true", alias = "if_true")]
    pub if_true: Option<String>,
    #[serde(default, rename = "false", alias = "if_false")]
    pub if_false: Option<String>,
}

// ===========================================================================
// Answer files
// ===========================================================================

/// Page id → answer, as written in an answer file.
pub type AnswerData = BTreeMap<String, Value>;
