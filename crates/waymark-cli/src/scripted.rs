//! Non-interactive renderer fed from an answer file.

use std::collections::HashMap;
use std::io::Write;

use waymark_core::{Page, PageKind, PageView, RenderError, Renderer, Task, Value};
use waymark_data::AnswerSet;

/// Bring an answer-file value into the shape the page's component takes.
///
/// Answer files are hand-written, so `port: 8080` for an input page or
/// `features: docker` for a multiselect should still work.
pub fn coerce_answer(kind: PageKind, value: Value) -> Value {
    match (kind, value) {
        (
            PageKind::Input | PageKind::Password | PageKind::Select,
            v @ (Value::Bool(_) | Value::Number(_)),
        ) => Value::String(v.to_string()),
        (PageKind::MultiSelect, Value::String(s)) => Value::List(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        (PageKind::Confirm, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Value::Bool(true),
            "n" | "no" | "false" => Value::Bool(false),
            _ => Value::String(s),
        },
        (_, v) => v,
    }
}

/// Answers each page from an [`AnswerSet`], falling back to the page default.
///
/// A page whose answer keeps being rejected fails the run once it has been
/// retried `retries` times. Display pages are echoed as a single line.
pub struct AnswerRenderer<W> {
    answers: AnswerSet,
    retries: u32,
    rejections: HashMap<String, u32>,
    output: W,
}

impl<W: Write> AnswerRenderer<W> {
    pub fn new(answers: AnswerSet, retries: u32, output: W) -> Self {
        Self {
            answers,
            retries,
            rejections: HashMap::new(),
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> Renderer for AnswerRenderer<W> {
    fn show(&mut self, page: &Page, view: &PageView<'_>) -> Result<(), RenderError> {
        writeln!(self.output, "[{}] {}", page.kind, view.expand(&page.title))?;
        Ok(())
    }

    fn ask(&mut self, page: &Page, view: &PageView<'_>) -> Result<Value, RenderError> {
        if let Some(err) = view.error {
            let count = self.rejections.entry(page.id.clone()).or_insert(0);
            *count += 1;
            tracing::warn!(
                page = %page.id,
                attempt = *count,
                error = %err,
                "scripted answer rejected"
            );
            if *count > self.retries {
                return Err(RenderError::Other(format!(
                    "answer for page '{}' rejected: {err}",
                    page.id
                )));
            }
        }

        let answer = self
            .answers
            .get(&page.id)
            .or(page.default.as_ref())
            .cloned()
            .ok_or_else(|| RenderError::Other(format!("no answer for page '{}'", page.id)))?;
        let answer = coerce_answer(page.kind, answer);

        let shown = if page.kind == PageKind::Password {
            "********".to_string()
        } else {
            answer.to_string()
        };
        writeln!(self.output, "[{}] {} = {shown}", page.kind, view.expand(&page.title))?;
        Ok(answer)
    }

    fn progress(
        &mut self,
        _page: &Page,
        task: &Task,
        percent: f64,
        view: &PageView<'_>,
    ) -> Result<(), RenderError> {
        writeln!(self.output, "  {percent:>3.0}% {}", view.expand(&task.label))?;
        Ok(())
    }
}
