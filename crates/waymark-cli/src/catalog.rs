//! Finding wizard files by name in the configured directories.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use waymark_data::Format;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("wizard file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error(
        "wizard not found: {name} (searched {}); run `waymark list` to see available wizards",
        searched_list(.searched)
    )]
    NotFound { name: String, searched: Vec<PathBuf> },
}

fn searched_list(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A wizard file discovered in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardEntry {
    /// File stem, used to run the wizard by name.
    pub name: String,
    pub path: PathBuf,
}

fn is_wizard_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Format::from_extension)
            .is_some()
}

/// Whether `input` should be treated as a path rather than a name.
fn looks_like_path(input: &str) -> bool {
    let path = Path::new(input);
    input.contains(['/', '\\'])
        || path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Format::from_extension)
            .is_some()
}

/// Every wizard file in `dirs`, sorted by name. When two directories hold
/// the same name the earlier directory wins.
pub fn discover(dirs: &[PathBuf]) -> Vec<WizardEntry> {
    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();
    for dir in dirs {
        let Ok(entries) = std::fs::read_dir(dir) else {
            tracing::debug!(dir = %dir.display(), "wizard directory not readable, skipped");
            continue;
        };
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| is_wizard_file(p))
            .collect();
        paths.sort();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            found.entry(name.to_string()).or_insert(path);
        }
    }
    found
        .into_iter()
        .map(|(name, path)| WizardEntry { name, path })
        .collect()
}

/// Turn a `run` argument into a file path.
///
/// Anything containing a path separator or ending in a known extension is a
/// path and must exist. Otherwise `<dir>/<name>.<ext>` is tried for each
/// directory and extension in order.
pub fn resolve(input: &str, dirs: &[PathBuf]) -> Result<PathBuf, CatalogError> {
    if looks_like_path(input) {
        let path = PathBuf::from(input);
        return if path.is_file() {
            Ok(path)
        } else {
            Err(CatalogError::FileNotFound { path })
        };
    }

    for dir in dirs {
        for ext in Format::EXTENSIONS {
            let candidate = dir.join(format!("{input}.{ext}"));
            if candidate.is_file() {
                tracing::debug!(wizard = input, path = %candidate.display(), "wizard resolved");
                return Ok(candidate);
            }
        }
    }

    Err(CatalogError::NotFound {
        name: input.to_string(),
        searched: dirs.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("a");
        let b = root.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("db.yaml"), "").unwrap();
        fs::write(a.join("notes.txt"), "").unwrap();
        fs::write(b.join("db.json"), "").unwrap();
        fs::write(b.join("dev.toml"), "").unwrap();
        (root, a, b)
    }

    #[test]
    fn discover_sorted_and_first_dir_wins() {
        let (_root, a, b) = setup();
        let entries = discover(&[a.clone(), b.clone()]);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["db", "dev"]);
        assert_eq!(entries[0].path, a.join("db.yaml"));
        assert_eq!(entries[1].path, b.join("dev.toml"));
    }

    #[test]
    fn discover_skips_missing_dirs() {
        let (_root, a, _) = setup();
        let entries = discover(&[PathBuf::from("/nonexistent/wizards"), a]);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn resolve_by_name() {
        let (_root, a, b) = setup();
        let dirs = vec![a.clone(), b.clone()];
        assert_eq!(resolve("db", &dirs).unwrap(), a.join("db.yaml"));
        assert_eq!(resolve("dev", &dirs).unwrap(), b.join("dev.toml"));
        assert!(matches!(
            resolve("nope", &dirs),
            Err(CatalogError::NotFound { ref name, .. }) if name == "nope"
        ));
    }

    #[test]
    fn resolve_by_path() {
        let (_root, a, _) = setup();
        let path = a.join("db.yaml");
        assert_eq!(resolve(path.to_str().unwrap(), &[]).unwrap(), path);
        assert!(matches!(
            resolve("missing.yaml", &[a]),
            Err(CatalogError::FileNotFound { .. })
        ));
    }

    #[test]
    fn not_found_lists_searched_dirs() {
        let err = resolve("x", &[PathBuf::from("/one"), PathBuf::from("/two")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/one, /two"), "{msg}");
    }
}
