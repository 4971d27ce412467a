//! Named presentation profiles.
//!
//! The registry is built once at startup and shared by reference; which
//! theme is *selected* is state of each engine instance, not of the registry.

use std::fmt;

use indexmap::IndexMap;

/// Terminal-independent color names. Renderers map them to their backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    Bar,
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStyle {
    Dots,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub primary: ThemeColor,
    pub secondary: ThemeColor,
    pub error: ThemeColor,
    pub success: ThemeColor,
    pub info: ThemeColor,
    pub progress: ProgressStyle,
    pub spinner: SpinnerStyle,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            primary: ThemeColor::Cyan,
            secondary: ThemeColor::White,
            error: ThemeColor::Red,
            success: ThemeColor::Green,
            info: ThemeColor::Blue,
            progress: ProgressStyle::Bar,
            spinner: SpinnerStyle::Dots,
        }
    }

    pub fn colorful() -> Self {
        Self {
            name: "colorful".to_string(),
            primary: ThemeColor::Magenta,
            secondary: ThemeColor::Yellow,
            error: ThemeColor::Red,
            success: ThemeColor::Green,
            info: ThemeColor::Blue,
            progress: ProgressStyle::Bar,
            spinner: SpinnerStyle::Line,
        }
    }

    /// No colors at all; suitable for logs and dumb terminals.
    pub fn minimal() -> Self {
        Self {
            name: "minimal".to_string(),
            primary: ThemeColor::Reset,
            secondary: ThemeColor::Reset,
            error: ThemeColor::Reset,
            success: ThemeColor::Reset,
            info: ThemeColor::Reset,
            progress: ProgressStyle::Simple,
            spinner: SpinnerStyle::Dots,
        }
    }
}

/// Returned when selecting a theme that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("theme not found: {name} (available: {})", .available.join(", "))]
pub struct UnknownThemeError {
    pub name: String,
    pub available: Vec<String>,
}

/// All themes an engine may select from, in registration order.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: IndexMap<String, Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ThemeRegistry {
    /// The name every engine starts with.
    pub const DEFAULT: &'static str = "default";

    pub fn empty() -> Self {
        Self {
            themes: IndexMap::new(),
        }
    }

    /// `default`, `colorful` and `minimal`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Theme::default_theme());
        registry.register(Theme::colorful());
        registry.register(Theme::minimal());
        registry
    }

    /// Add or replace a theme under its own name.
    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Look up `name`, or explain which names exist.
    pub fn resolve(&self, name: &str) -> Result<&Theme, UnknownThemeError> {
        self.get(name).ok_or_else(|| UnknownThemeError {
            name: name.to_string(),
            available: self.names(),
        })
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
