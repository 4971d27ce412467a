//! Subcommand implementations. Each writes its report to `out`.

use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail};
use waymark_core::{
    PageKind, ThemeRegistry, Value, Variables, Wizard, WizardEngine, WizardResult,
};
use waymark_data::{LintWarning, lint_wizard, load_answers, load_wizard};

use crate::catalog;
use crate::cli::Cmd;
use crate::scripted::AnswerRenderer;
use crate::settings::Settings;
use crate::tasks::ShellTaskRunner;
use crate::template;
use crate::terminal::TerminalRenderer;

pub fn dispatch(cmd: Cmd, settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let themes = ThemeRegistry::with_builtins();
    match cmd {
        Cmd::Run {
            wizard,
            theme,
            answers,
            print_variables,
        } => {
            let options = RunOptions {
                theme,
                answers,
                print_variables,
            };
            run(&wizard, &options, settings, &themes, out)
        }
        Cmd::List => list(settings, out),
        Cmd::Validate { path } => validate(&path, out),
        Cmd::Create { name, dir } => create(&name, &dir, out),
        Cmd::Themes => themes_list(settings, &themes, out),
    }
}

// ===========================================================================
// run
// ===========================================================================

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub theme: Option<String>,
    pub answers: Option<PathBuf>,
    pub print_variables: bool,
}

pub fn run(
    wizard: &str,
    options: &RunOptions,
    settings: &Settings,
    themes: &ThemeRegistry,
    out: &mut dyn Write,
) -> Result<()> {
    let path = catalog::resolve(wizard, &settings.wizard_dirs)?;
    let wizard = load_wizard(&path)?;

    let mut engine = WizardEngine::new(themes);
    let theme = options.theme.as_deref().unwrap_or(&settings.theme);
    if let Err(err) = engine.set_theme(theme) {
        tracing::warn!(%err, using = %engine.theme().name, "keeping current theme");
    }

    let mut tasks = ShellTaskRunner::new();
    let result = match &options.answers {
        Some(answers_path) => {
            let answers = load_answers(answers_path)
                .wrap_err_with(|| format!("loading answers from {}", answers_path.display()))?;
            let mut renderer =
                AnswerRenderer::new(answers, settings.non_interactive_retries, &mut *out);
            engine.run(&wizard, &mut renderer, &mut tasks)?
        }
        None => {
            let mut renderer = TerminalRenderer::stdio();
            engine.run(&wizard, &mut renderer, &mut tasks)?
        }
    };

    report(&wizard, &result, options.print_variables, out)?;
    if !result.completed {
        bail!("wizard '{}' was cancelled", wizard.id());
    }
    Ok(())
}

/// Shown in place of password answers.
const MASK: &str = "********";

/// `variables` with every password page's answer replaced by [`MASK`].
pub fn masked_variables(wizard: &Wizard, variables: &Variables) -> Variables {
    let mut masked = variables.clone();
    let secrets = wizard
        .pages()
        .filter(|page| page.kind == PageKind::Password)
        .filter_map(|page| page.variable.as_deref());
    for name in secrets {
        if let Some(value) = masked.get_mut(name) {
            *value = Value::from(MASK);
        }
    }
    masked
}

fn report(
    wizard: &Wizard,
    result: &WizardResult,
    print_variables: bool,
    out: &mut dyn Write,
) -> Result<()> {
    tracing::info!(
        completed = result.completed,
        pages = result.history.len(),
        elapsed_ms = result.duration.as_millis() as u64,
        "wizard finished"
    );
    if print_variables {
        let json = serde_json::to_string_pretty(&masked_variables(wizard, &result.variables))?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}

// ===========================================================================
// list / validate / create / themes
// ===========================================================================

pub fn list(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let entries = catalog::discover(&settings.wizard_dirs);
    if entries.is_empty() {
        writeln!(out, "No wizards found.")?;
        return Ok(());
    }

    writeln!(out, "Available wizards:")?;
    for entry in entries {
        match load_wizard(&entry.path) {
            Ok(wizard) if wizard.description().is_empty() => {
                writeln!(out, "  {:<24} {}", entry.name, wizard.name())?
            }
            Ok(wizard) => writeln!(
                out,
                "  {:<24} {} - {}",
                entry.name,
                wizard.name(),
                wizard.description()
            )?,
            Err(err) => {
                tracing::warn!(path = %entry.path.display(), %err, "wizard does not load");
                writeln!(out, "  {:<24} (invalid: {err})", entry.name)?
            }
        }
    }
    Ok(())
}

pub fn validate(path: &Path, out: &mut dyn Write) -> Result<()> {
    let wizard = load_wizard(path)
        .wrap_err_with(|| format!("{} is not a valid wizard", path.display()))?;
    let warnings: Vec<LintWarning> = lint_wizard(&wizard);

    writeln!(
        out,
        "{}: {} v{} ({} pages, start '{}')",
        path.display(),
        wizard.name(),
        wizard.version(),
        wizard.page_count(),
        wizard.start_id()
    )?;
    if warnings.is_empty() {
        writeln!(out, "OK")?;
    } else {
        for warning in &warnings {
            writeln!(out, "warning: {warning}")?;
        }
        writeln!(out, "{} warning(s)", warnings.len())?;
    }
    Ok(())
}

pub fn create(name: &str, dir: &Path, out: &mut dyn Write) -> Result<()> {
    let path = template::create_wizard(name, dir)?;
    writeln!(out, "Created {}", path.display())?;
    writeln!(out, "Run it with: waymark run {}", path.display())?;
    Ok(())
}

pub fn themes_list(settings: &Settings, themes: &ThemeRegistry, out: &mut dyn Write) -> Result<()> {
    for name in themes.names() {
        let marker = if name == settings.theme { "*" } else { " " };
        writeln!(out, "{marker} {name}")?;
    }
    if !themes.contains(&settings.theme) {
        writeln!(out, "(configured theme '{}' is not registered)", settings.theme)?;
    }
    Ok(())
}
