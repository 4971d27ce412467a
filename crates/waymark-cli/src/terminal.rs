//! Line-oriented interactive renderer.
//!
//! Pages are printed top to bottom with crossterm styling; answers are read a
//! line at a time, so the renderer also works over pipes. End of input
//! aborts the session.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Stylize};
use crossterm::terminal;
use waymark_core::{
    ChoiceOption, Page, PageKind, PageView, ProgressStyle, RenderError, Renderer, Task, Theme,
    ThemeColor, Value,
};

const BAR_WIDTH: usize = 30;

pub fn color(c: ThemeColor) -> Color {
    match c {
        ThemeColor::Black => Color::Black,
        ThemeColor::Red => Color::Red,
        ThemeColor::Green => Color::Green,
        ThemeColor::Yellow => Color::Yellow,
        ThemeColor::Blue => Color::Blue,
        ThemeColor::Magenta => Color::Magenta,
        ThemeColor::Cyan => Color::Cyan,
        ThemeColor::White => Color::White,
        ThemeColor::Reset => Color::Reset,
    }
}

/// Text form of a progress report, e.g. `[#######.......]  50% Build`.
pub fn progress_line(style: ProgressStyle, percent: f64, label: &str) -> String {
    let percent = percent.clamp(0.0, 100.0);
    match style {
        ProgressStyle::Bar => {
            let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
            format!(
                "[{}{}] {:>3.0}% {label}",
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled),
                percent
            )
        }
        ProgressStyle::Simple => format!("{percent:>3.0}% {label}"),
    }
}

/// Parse a 1-based option number or an option value.
pub fn pick_option<'o>(options: &'o [ChoiceOption], token: &str) -> Option<&'o ChoiceOption> {
    let token = token.trim();
    match token.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => options.get(n - 1),
        _ => options.iter().find(|o| o.value == token),
    }
}

fn not_an_option(token: &str) -> String {
    format!("'{}' is not one of the options", token.trim())
}

pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

pub struct TerminalRenderer<R, W> {
    input: R,
    output: W,
    /// Read passwords in raw mode without echo.
    hide_secrets: bool,
}

impl TerminalRenderer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        let hide_secrets = io::stdin().is_terminal();
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
            hide_secrets,
        }
    }
}

impl<R: BufRead, W: Write> TerminalRenderer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, RenderError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RenderError::Aborted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&mut self) -> Result<String, RenderError> {
        if !self.hide_secrets {
            return self.read_line();
        }
        terminal::enable_raw_mode()?;
        let secret = read_secret_raw();
        terminal::disable_raw_mode()?;
        writeln!(self.output)?;
        secret
    }

    fn header(&mut self, page: &Page, view: &PageView<'_>) -> io::Result<()> {
        let theme = view.theme;
        let title = view.expand(&page.title);
        let title = match page.kind {
            PageKind::Success => format!("✔ {title}").with(color(theme.success)),
            PageKind::Error => format!("✘ {title}").with(color(theme.error)),
            _ => title.with(color(theme.primary)),
        };
        writeln!(self.output)?;
        writeln!(self.output, "{}", title.bold())?;

        let content = view.expand(&page.content);
        if !content.is_empty() {
            writeln!(self.output, "{}", content.trim_end().with(color(theme.secondary)))?;
        }
        if let Some(err) = view.error {
            writeln!(self.output, "{}", format!("! {err}").with(color(theme.error)))?;
        }
        Ok(())
    }

    fn prompt(&mut self, view: &PageView<'_>, page: &Page, hint: &str) -> io::Result<()> {
        let prompt = view.expand(&page.prompt);
        let prompt = if prompt.is_empty() { "›".to_string() } else { prompt };
        let hint = if hint.is_empty() {
            String::new()
        } else {
            format!(" {}", hint.with(color(view.theme.info)))
        };
        write!(self.output, "{prompt}{hint} ")?;
        self.output.flush()
    }

    fn list_options(&mut self, theme: &Theme, options: &[ChoiceOption]) -> io::Result<()> {
        for (i, option) in options.iter().enumerate() {
            let number = format!("{:>3})", i + 1).with(color(theme.info));
            match &option.description {
                Some(desc) => writeln!(self.output, "{number} {} - {desc}", option.label)?,
                None => writeln!(self.output, "{number} {}", option.label)?,
            }
        }
        Ok(())
    }

    fn complain(&mut self, theme: &Theme, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.with(color(theme.error)))
    }

    fn ask_text(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError> {
        let default = page.default.as_ref().map(Value::to_string);
        let hint = match (&default, page.kind) {
            (Some(d), PageKind::Input) => format!("[{d}]"),
            _ => String::new(),
        };
        self.prompt(view, page, &hint)?;
        let line = if page.kind == PageKind::Password {
            self.read_secret()?
        } else {
            self.read_line()?
        };
        match default {
            Some(d) if line.is_empty() => Ok(Value::String(d)),
            _ => Ok(Value::String(line)),
        }
    }

    fn ask_select(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError> {
        self.list_options(view.theme, &page.options)?;
        let default = page.default.as_ref().and_then(Value::as_str).map(str::to_string);
        loop {
            let hint = match &default {
                Some(d) => format!("[1-{}, default {d}]", page.options.len()),
                None => format!("[1-{}]", page.options.len()),
            };
            self.prompt(view, page, &hint)?;
            let line = self.read_line()?;
            if line.trim().is_empty() {
                return Ok(Value::String(default.clone().unwrap_or_default()));
            }
            match pick_option(&page.options, &line) {
                Some(option) => return Ok(Value::String(option.value.clone())),
                None => self.complain(view.theme, &not_an_option(&line))?,
            }
        }
    }

    fn ask_multi(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError> {
        self.list_options(view.theme, &page.options)?;
        'ask: loop {
            self.prompt(view, page, "[comma separated, empty for none]")?;
            let line = self.read_line()?;
            if line.trim().is_empty() {
                let default = page.default.as_ref().and_then(Value::as_list).unwrap_or_default();
                return Ok(Value::List(default.to_vec()));
            }

            let mut picked: Vec<String> = Vec::new();
            for token in line.split(',').filter(|t| !t.trim().is_empty()) {
                let Some(option) = pick_option(&page.options, token) else {
                    self.complain(view.theme, &not_an_option(token))?;
                    continue 'ask;
                };
                if !picked.contains(&option.value) {
                    picked.push(option.value.clone());
                }
            }
            return Ok(Value::List(picked));
        }
    }

    fn ask_confirm(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError> {
        let default = page.default.as_ref().and_then(Value::as_bool).unwrap_or(false);
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            self.prompt(view, page, hint)?;
            let line = self.read_line()?;
            if line.trim().is_empty() {
                return Ok(Value::Bool(default));
            }
            match parse_yes_no(&line) {
                Some(answer) => return Ok(Value::Bool(answer)),
                None => self.complain(view.theme, "please answer y or n")?,
            }
        }
    }
}

/// Collect characters until Enter without echoing them. Esc and Ctrl-C abort.
fn read_secret_raw() -> Result<String, RenderError> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Esc => return Err(RenderError::Aborted),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(RenderError::Aborted);
            }
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}

impl<R: BufRead, W: Write> Renderer for TerminalRenderer<R, W> {
    fn show(&mut self, page: &Page, view: &PageView<'_>) -> Result<(), RenderError> {
        self.header(page, view)?;
        if page.kind == PageKind::Info {
            self.prompt(view, page, "(press Enter)")?;
            self.read_line()?;
        }
        Ok(())
    }

    fn ask(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError> {
        self.header(page, view)?;
        match page.kind {
            PageKind::Select => self.ask_select(page, view),
            PageKind::MultiSelect => self.ask_multi(page, view),
            PageKind::Confirm => self.ask_confirm(page, view),
            _ => self.ask_text(page, view),
        }
    }

    fn progress(
        &mut self,
        _page: &Page,
        task: &Task,
        percent: f64,
        view: &PageView<'_>,
    ) -> Result<(), RenderError> {
        let line = progress_line(view.theme.progress, percent, &view.expand(&task.label));
        let line = if percent >= 100.0 {
            line.with(color(view.theme.success))
        } else {
            line.with(color(view.theme.primary))
        };
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}
