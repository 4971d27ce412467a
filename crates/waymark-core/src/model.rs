//! Wizard definition types and the builder that enforces their invariants.
//!
//! A [`Wizard`] is frozen once built: it has no `&mut self` methods, so a
//! single definition can be shared read-only by any number of sessions.

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::{Value, Variables};

// ===========================================================================
// Page kinds
// ===========================================================================

/// What a page does: display something, or collect an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Info,
    Input,
    Password,
    Select,
    #[serde(alias = "multi_select")]
    MultiSelect,
    Confirm,
    Progress,
    Success,
    Error,
}

impl PageKind {
    /// Pages that bind a component and expect an answer from the renderer.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            PageKind::Input
                | PageKind::Password
                | PageKind::Select
                | PageKind::MultiSelect
                | PageKind::Confirm
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            PageKind::Info => "info",
            PageKind::Input => "input",
            PageKind::Password => "password",
            PageKind::Select => "select",
            PageKind::MultiSelect => "multiselect",
            PageKind::Confirm => "confirm",
            PageKind::Progress => "progress",
            PageKind::Success => "success",
            PageKind::Error => "error",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ===========================================================================
// Page building blocks
// ===========================================================================

/// A selectable choice on a select or multiselect page.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    /// Machine token stored in the session variables.
    pub value: String,
    /// Display text.
    pub label: String,
    pub description: Option<String>,
    /// Boolean flag set to whether this option was picked (multiselect only).
    pub variable: Option<String>,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            variable: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }
}

/// Constraints on the text of an input page.
///
/// A zero `min_len`/`max_len` means "unbounded". The pattern is compiled
/// when the rule is built, so an invalid expression never reaches a session.
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub min_len: usize,
    pub max_len: usize,
    pub pattern: Option<Regex>,
    /// Replaces the default text of the required and pattern failures.
    pub message: Option<String>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A command executed on a progress page.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub label: String,
    pub command: String,
    /// Skip the task unless this condition holds.
    pub condition: Option<String>,
    pub weight: Option<f64>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            command: command.into(),
            condition: None,
            weight: None,
        }
    }

    /// Relative share of the progress bar. Missing or non-positive weights count as 1.
    pub fn weight(&self) -> f64 {
        match self.weight {
            Some(w) if w > 0.0 => w,
            _ => 1.0,
        }
    }
}

/// Edge from a page to its successor.
///
/// Targets are page IDs; an empty target means the wizard ends there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRule {
    Page(String),
    Conditional {
        condition: String,
        if_true: String,
        if_false: String,
    },
}

impl NavigationRule {
    pub fn to(target: impl Into<String>) -> Self {
        NavigationRule::Page(target.into())
    }

    pub fn when(
        condition: impl Into<String>,
        if_true: impl Into<String>,
        if_false: impl Into<String>,
    ) -> Self {
        NavigationRule::Conditional {
            condition: condition.into(),
            if_true: if_true.into(),
            if_false: if_false.into(),
        }
    }

    /// Every target this rule can resolve to, including empty ones.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            NavigationRule::Page(target) => vec![target.as_str()],
            NavigationRule::Conditional {
                if_true, if_false, ..
            } => vec![if_true.as_str(), if_false.as_str()],
        }
    }

    pub fn condition(&self) -> Option<&str> {
        match self {
            NavigationRule::Page(_) => None,
            NavigationRule::Conditional { condition, .. } => Some(condition),
        }
    }
}

// ===========================================================================
// Page
// ===========================================================================

/// One step of a wizard.
#[derive(Debug, Clone)]
pub struct Page {
    pub id: String,
    pub kind: PageKind,
    pub title: String,
    pub content: String,
    pub prompt: String,
    /// Variable the answer is stored under. Pages without one still
    /// validate and navigate, they just don't record anything.
    pub variable: Option<String>,
    /// Value offered to the renderer as the initial answer.
    pub default: Option<Value>,
    pub options: Vec<ChoiceOption>,
    pub validation: Option<ValidationRule>,
    pub tasks: Vec<Task>,
    pub next: Option<NavigationRule>,
}

impl Page {
    pub fn new(id: impl Into<String>, kind: PageKind) -> Self {
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            content: String::new(),
            prompt: String::new(),
            variable: None,
            default: None,
            options: Vec::new(),
            validation: None,
            tasks: Vec::new(),
            next: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn option(mut self, option: ChoiceOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn next(mut self, rule: NavigationRule) -> Self {
        self.next = Some(rule);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

// ===========================================================================
// Errors
// ===========================================================================

/// Structural problems that make a definition unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("wizard '{wizard}' has no pages")]
    EmptyWizard { wizard: String },

    #[error("duplicate page id '{page}'")]
    DuplicatePage { page: String },

    #[error("page '{page}' navigates to unknown page '{target}'")]
    DanglingTarget { page: String, target: String },

    #[error("start page '{start}' does not exist")]
    UnknownStart { start: String },

    #[error("invalid validation pattern on page '{page}': {detail}")]
    InvalidPattern { page: String, detail: String },

    #[error("{kind} page '{page}' has no options")]
    MissingOptions { page: String, kind: PageKind },
}

// ===========================================================================
// Wizard + builder
// ===========================================================================

/// Collects pages and metadata, then validates them into a [`Wizard`].
#[derive(Debug)]
pub struct WizardBuilder {
    id: String,
    name: String,
    version: String,
    description: String,
    start: Option<String>,
    variables: Variables,
    pages: Vec<Page>,
}

impl WizardBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: String::new(),
            description: String::new(),
            start: None,
            variables: Variables::new(),
            pages: Vec::new(),
        }
    }

    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Start somewhere other than the first declared page.
    pub fn start(&mut self, page: impl Into<String>) -> &mut Self {
        self.start = Some(page.into());
        self
    }

    pub fn variable(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn add_page(&mut self, page: Page) -> &mut Self {
        self.pages.push(page);
        self
    }

    /// Validate and freeze the definition.
    ///
    /// Checks, in order: at least one page, unique IDs, select-style pages
    /// carry options, the start marker exists, and every navigation target
    /// is either empty or an existing page.
    pub fn build(self) -> Result<Wizard, DefinitionError> {
        if self.pages.is_empty() {
            return Err(DefinitionError::EmptyWizard { wizard: self.id });
        }

        let mut pages: IndexMap<String, Page> = IndexMap::with_capacity(self.pages.len());
        for page in self.pages {
            if pages.contains_key(&page.id) {
                return Err(DefinitionError::DuplicatePage { page: page.id });
            }
            if matches!(page.kind, PageKind::Select | PageKind::MultiSelect)
                && page.options.is_empty()
            {
                return Err(DefinitionError::MissingOptions {
                    page: page.id,
                    kind: page.kind,
                });
            }
            pages.insert(page.id.clone(), page);
        }

        let start = match self.start.filter(|s| !s.is_empty()) {
            Some(start) if !pages.contains_key(&start) => {
                return Err(DefinitionError::UnknownStart { start });
            }
            Some(start) => start,
            None => pages
                .keys()
                .next()
                .cloned()
                .unwrap_or_default(),
        };

        for page in pages.values() {
            let Some(rule) = &page.next else { continue };
            for target in rule.targets() {
                if !target.is_empty() && !pages.contains_key(target) {
                    return Err(DefinitionError::DanglingTarget {
                        page: page.id.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }

        Ok(Wizard {
            id: self.id,
            name: self.name,
            version: self.version,
            description: self.description,
            start,
            variables: self.variables,
            pages,
        })
    }
}

/// An immutable, validated wizard definition.
#[derive(Debug, Clone)]
pub struct Wizard {
    id: String,
    name: String,
    version: String,
    description: String,
    start: String,
    variables: Variables,
    pages: IndexMap<String, Page>,
}

impl Wizard {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Initial variable values every session is seeded with.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Pages in declaration order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Look up a page by ID. A missing page is `None`, never an error.
    pub fn find_page(&self, id: &str) -> Option<&Page> {
        self.pages.get(id)
    }

    pub fn start_id(&self) -> &str {
        &self.start
    }

    pub fn start_page(&self) -> &Page {
        // `build` guarantees a non-empty arena and a start that exists.
        &self.pages[self.start.as_str()]
    }
}
