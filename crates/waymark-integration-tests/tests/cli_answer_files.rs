//! The `waymark` commands run against the wizards shipped in `wizards/`,
//! answered from files instead of the terminal.

#![cfg(unix)]

use std::fs;
use std::path::PathBuf;

use waymark_cli::Settings;
use waymark_cli::commands::{self, RunOptions};
use waymark_core::ThemeRegistry;

fn settings() -> Settings {
    Settings {
        wizard_dirs: vec![PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../wizards")],
        ..Settings::default()
    }
}

/// Split the `--print-variables` JSON off the end of the run transcript.
fn printed_variables(out: &str) -> serde_json::Value {
    let start = out.find("\n{").map(|i| i + 1).expect("variables printed");
    serde_json::from_str(&out[start..]).unwrap()
}

#[test]
fn database_setup_from_answer_file() {
    let dir = tempfile::tempdir().unwrap();
    let answers = dir.path().join("answers.toml");
    fs::write(
        &answers,
        "engine = \"postgres\"\n\
         db_name = \"inventory\"\n\
         password = \"correct-horse\"\n\
         sample = \"yes\"\n",
    )
    .unwrap();

    let options = RunOptions {
        theme: None,
        answers: Some(answers),
        print_variables: true,
    };
    let mut out = Vec::new();
    commands::run(
        "database-setup",
        &options,
        &settings(),
        &ThemeRegistry::with_builtins(),
        &mut out,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("[password] Administrator password = ********"), "{out}");
    assert!(!out.contains("correct-horse"), "{out}");
    assert!(out.contains("100% Load sample data"), "{out}");

    let vars = printed_variables(&out);
    assert_eq!(vars["db_engine"], "postgres");
    assert_eq!(vars["db_name"], "inventory");
    assert_eq!(vars["create_sample_data"], true);
    assert_eq!(vars["db_password"], "********");
    assert_eq!(vars["db_port"], 5432);
}

#[test]
fn defaults_fill_unanswered_pages() {
    let dir = tempfile::tempdir().unwrap();
    let answers = dir.path().join("answers.yaml");
    fs::write(&answers, "engine: sqlite\nsample: false\n").unwrap();

    let options = RunOptions {
        answers: Some(answers),
        print_variables: true,
        ..RunOptions::default()
    };
    let mut out = Vec::new();
    commands::run(
        "database-setup",
        &options,
        &settings(),
        &ThemeRegistry::with_builtins(),
        &mut out,
    )
    .unwrap();

    let vars = printed_variables(&String::from_utf8(out).unwrap());
    assert_eq!(vars["db_path"], "./data/app.db");
    assert!(vars.get("db_password").is_none());
}

#[test]
fn dev_environment_cancel_reaches_error_page() {
    let dir = tempfile::tempdir().unwrap();
    let answers = dir.path().join("answers.json");
    fs::write(
        &answers,
        r#"{"language": "go", "tools": "git, vscode", "confirm": false}"#,
    )
    .unwrap();

    let options = RunOptions {
        answers: Some(answers),
        print_variables: true,
        ..RunOptions::default()
    };
    let mut out = Vec::new();
    commands::run(
        "dev-environment",
        &options,
        &settings(),
        &ThemeRegistry::with_builtins(),
        &mut out,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("[error]"), "{out}");

    let vars = printed_variables(&out);
    assert_eq!(vars["tools"], serde_json::json!(["git", "vscode"]));
    assert_eq!(vars["install_docker"], false);
    assert_eq!(vars["proceed"], false);
}

#[test]
fn validate_and_list_shipped_wizards() {
    let mut out = Vec::new();
    commands::list(&settings(), &mut out).unwrap();
    let listing = String::from_utf8(out).unwrap();
    assert!(listing.contains("database-setup"), "{listing}");
    assert!(listing.contains("dev-environment"), "{listing}");

    for name in ["database-setup.yaml", "dev-environment.yaml"] {
        let path = settings().wizard_dirs[0].join(name);
        let mut out = Vec::new();
        commands::validate(&path, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("OK\n"));
    }
}
