//! Reading definition files and resolving them into a [`Wizard`].
//!
//! Provides format detection (YAML/JSON/TOML/RON), the [`WizardSource`]
//! abstraction over where text comes from, and the resolution step that
//! turns schema structs into a validated core definition.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use waymark_core::{
    ChoiceOption, DefinitionError, NavigationRule, Page, Task, ValidationRule, Wizard,
    WizardBuilder,
};

use crate::schema::{NextData, PageData, ValidationData, WizardDocument};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a definition or answer file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be read at all.
    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// The file has an extension we don't support.
    #[error("unsupported format for {origin}")]
    UnsupportedFormat { origin: String },

    /// The text is not a structurally valid document.
    #[error("parse error in {origin}: {detail}")]
    Parse { origin: String, detail: String },

    /// The document parsed but describes an unusable wizard.
    #[error("invalid wizard in {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: DefinitionError,
    },
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
    Toml,
    Ron,
}

impl Format {
    /// Every recognised extension, in lookup order.
    pub const EXTENSIONS: [&'static str; 5] = ["yaml", "yml", "json", "toml", "ron"];

    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "ron" => Some(Format::Ron),
            _ => None,
        }
    }
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, LoadError> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Format::from_extension)
        .ok_or_else(|| LoadError::UnsupportedFormat {
            origin: path.display().to_string(),
        })
}

/// Deserialize `text` in the given format. `origin` only labels errors.
pub fn deserialize_str<T: DeserializeOwned>(
    text: &str,
    format: Format,
    origin: &str,
) -> Result<T, LoadError> {
    let parse = |detail: String| LoadError::Parse {
        origin: origin.to_string(),
        detail,
    };

    match format {
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| parse(e.to_string())),
        Format::Json => serde_json::from_str(text).map_err(|e| parse(e.to_string())),
        Format::Toml => toml::from_str(text).map_err(|e| parse(e.to_string())),
        Format::Ron => ron::from_str(text).map_err(|e| parse(e.to_string())),
    }
}

/// Read a file and deserialize it according to its extension.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let source = FileSource::new(path);
    let text = source.read()?;
    deserialize_str(&text, source.format()?, &source.origin())
}

// ===========================================================================
// Sources
// ===========================================================================

/// Somewhere definition text can be read from.
pub trait WizardSource {
    /// Human-readable label used in errors and logs.
    fn origin(&self) -> String;

    fn format(&self) -> Result<Format, LoadError>;

    fn read(&self) -> Result<String, LoadError>;
}

/// A definition file on disk; format comes from the extension.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WizardSource for FileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn format(&self) -> Result<Format, LoadError> {
        detect_format(&self.path)
    }

    fn read(&self) -> Result<String, LoadError> {
        std::fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            origin: self.origin(),
            source,
        })
    }
}

/// Definition text held in memory, e.g. embedded in a binary or a test.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    text: String,
    format: Format,
}

impl InlineSource {
    pub fn new(text: impl Into<String>, format: Format) -> Self {
        Self {
            name: "<inline>".to_string(),
            text: text.into(),
            format,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl WizardSource for InlineSource {
    fn origin(&self) -> String {
        self.name.clone()
    }

    fn format(&self) -> Result<Format, LoadError> {
        Ok(self.format)
    }

    fn read(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load and validate a definition file.
pub fn load_wizard(path: impl AsRef<Path>) -> Result<Wizard, LoadError> {
    load_from_source(&FileSource::new(path.as_ref()))
}

/// Load and validate a definition held in memory.
pub fn parse_wizard(text: &str, format: Format) -> Result<Wizard, LoadError> {
    load_from_source(&InlineSource::new(text, format))
}

pub fn load_from_source(source: &dyn WizardSource) -> Result<Wizard, LoadError> {
    let origin = source.origin();
    let format = source.format()?;
    let text = source.read()?;
    let document: WizardDocument = deserialize_str(&text, format, &origin)?;

    let wizard = build_wizard(document).map_err(|source| LoadError::Invalid {
        origin: origin.clone(),
        source,
    })?;

    tracing::debug!(
        origin = %origin,
        wizard = wizard.id(),
        pages = wizard.page_count(),
        "wizard loaded"
    );
    Ok(wizard)
}

// ===========================================================================
// Resolution
// ===========================================================================

/// Resolve schema structs into a validated core definition.
pub fn build_wizard(document: WizardDocument) -> Result<Wizard, DefinitionError> {
    let data = document.wizard;
    let mut builder = WizardBuilder::new(data.id, data.name);
    builder.version(data.version).description(data.description);
    if let Some(start) = data.start {
        builder.start(start);
    }
    for (name, value) in data.variables {
        builder.variable(name, value);
    }
    for page in data.pages {
        builder.add_page(build_page(page)?);
    }
    builder.build()
}

fn build_page(data: PageData) -> Result<Page, DefinitionError> {
    let validation = data
        .validation
        .map(|rule| build_rule(&data.id, rule))
        .transpose()?;

    let mut page = Page::new(data.id, data.kind)
        .title(data.title)
        .content(data.content)
        .prompt(data.prompt);
    page.variable = data.variable.filter(|v| !v.is_empty());
    page.default = data.default;
    page.validation = validation;
    page.next = data.next.map(build_next);

    page.options = data
        .options
        .into_iter()
        .map(|o| {
            let label = o.label.unwrap_or_else(|| o.value.clone());
            ChoiceOption {
                value: o.value,
                label,
                description: o.description,
                variable: o.variable.filter(|v| !v.is_empty()),
            }
        })
        .collect();

    page.tasks = data
        .tasks
        .into_iter()
        .map(|t| Task {
            id: t.id,
            label: t.label,
            command: t.command,
            condition: t.condition.filter(|c| !c.trim().is_empty()),
            weight: t.weight,
        })
        .collect();

    Ok(page)
}

fn build_rule(page: &str, data: ValidationData) -> Result<ValidationRule, DefinitionError> {
    let mut rule = ValidationRule {
        required: data.required,
        min_len: data.min_len,
        max_len: data.max_len,
        pattern: None,
        message: data.message.filter(|m| !m.is_empty()),
    };
    if let Some(pattern) = data.pattern.filter(|p| !p.is_empty()) {
        rule = rule
            .pattern(&pattern)
            .map_err(|e| DefinitionError::InvalidPattern {
                page: page.to_string(),
                detail: e.to_string(),
            })?;
    }
    Ok(rule)
}

/// A non-empty `condition` makes the rule conditional; otherwise `page` is
/// the unconditional target. Missing targets are terminal.
fn build_next(data: NextData) -> NavigationRule {
    match data.condition.filter(|c| !c.trim().is_empty()) {
        Some(condition) => NavigationRule::Conditional {
            condition,
            if_true: data.if_true.unwrap_or_default(),
            if_false: data.if_false.unwrap_or_default(),
        },
        None => NavigationRule::Page(data.page.unwrap_or_default()),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
