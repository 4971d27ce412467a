//! User settings, read from an optional TOML file.
//!
//! Lookup order: `--config`, then `$WAYMARK_CONFIG`, then
//! `<config dir>/waymark/config.toml`. An explicitly named file must exist;
//! the default location may be absent, in which case defaults apply.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use waymark_core::ThemeRegistry;

pub const CONFIG_ENV: &str = "WAYMARK_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {detail}", .path.display())]
    Parse { path: PathBuf, detail: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme used when `run` gets no `--theme`.
    pub theme: String,
    /// Searched in order when a wizard is named rather than given by path.
    pub wizard_dirs: Vec<PathBuf>,
    /// How often a rejected answer from an answer file is retried before
    /// the run fails.
    pub non_interactive_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut wizard_dirs = vec![PathBuf::from("wizards")];
        if let Some(dirs) = project_dirs() {
            wizard_dirs.push(dirs.data_dir().join("wizards"));
        }
        Self {
            theme: ThemeRegistry::DEFAULT.to_string(),
            wizard_dirs,
            non_interactive_retries: 0,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "waymark")
}

/// The settings file to read and whether it must exist.
pub fn settings_path(
    explicit: Option<&Path>,
    env_value: Option<PathBuf>,
) -> Option<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), true));
    }
    if let Some(path) = env_value.filter(|p| !p.as_os_str().is_empty()) {
        return Some((path, true));
    }
    project_dirs().map(|dirs| (dirs.config_dir().join("config.toml"), false))
}

impl Settings {
    /// Resolve and read the settings file.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let env_value = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match settings_path(explicit, env_value) {
            Some((path, true)) => Self::from_file(&path),
            Some((path, false)) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text).map_err(|detail| SettingsError::Parse {
            path: path.to_path_buf(),
            detail,
        })?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}
