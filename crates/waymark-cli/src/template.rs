//! Starter definition written by `waymark create`.

use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("file '{}' already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("wizard name '{name}' must be non-empty and use only letters, digits, '-' or '_'")]
    InvalidName { name: String },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `database-setup` → `Database Setup`.
fn display_name(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn starter_yaml(id: &str) -> String {
    let name = display_name(id);
    format!(
        r#"wizard:
  id: "{id}"
  name: "{name} Setup Wizard"
  version: "1.0"
  description: "Description of your wizard"

  # Initial values, e.g. `install_dir: "/opt/{id}"`
  variables: {{}}

  pages:
    - id: "welcome"
      type: "info"
      title: "Welcome"
      content: |
        Welcome to the {name} setup wizard!

        This wizard will guide you through the setup process.
      next:
        page: "complete"

    - id: "complete"
      type: "success"
      title: "Setup Complete!"
      content: |
        Setup completed successfully!
"#
    )
}

/// Write `<dir>/<name>.yaml`. Never overwrites an existing file.
pub fn create_wizard(name: &str, dir: &Path) -> Result<PathBuf, TemplateError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(TemplateError::InvalidName {
            name: name.to_string(),
        });
    }

    let path = dir.join(format!("{name}.yaml"));
    let write_err = |source| TemplateError::Write {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(write_err)?;
    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(TemplateError::AlreadyExists { path: path.clone() });
        }
        Err(e) => return Err(write_err(e)),
    };

    file.write_all(starter_yaml(name).as_bytes()).map_err(write_err)?;
    tracing::info!(path = %path.display(), "wizard template created");
    Ok(path)
}
