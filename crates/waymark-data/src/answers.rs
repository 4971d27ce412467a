//! Answer files for non-interactive runs.
//!
//! An answer file is a flat mapping from page id to the value that page
//! should receive, in any supported format:
//!
//! ```yaml
//! name: atlas
//! use_db: true
//! features: [docker, ci]
//! ```

use std::path::Path;

use waymark_core::Value;

use crate::loader::{Format, LoadError, deserialize_file, deserialize_str};
use crate::schema::AnswerData;

/// Pre-recorded answers keyed by page id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    answers: AnswerData,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, page: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.answers.insert(page.into(), value.into());
        self
    }

    pub fn get(&self, page: &str) -> Option<&Value> {
        self.answers.get(page)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }
}

impl From<AnswerData> for AnswerSet {
    fn from(answers: AnswerData) -> Self {
        Self { answers }
    }
}

pub fn load_answers(path: impl AsRef<Path>) -> Result<AnswerSet, LoadError> {
    let answers: AnswerData = deserialize_file(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), answers = answers.len(), "answers loaded");
    Ok(answers.into())
}

pub fn parse_answers(text: &str, format: Format) -> Result<AnswerSet, LoadError> {
    let answers: AnswerData = deserialize_str(text, format, "<inline>")?;
    Ok(answers.into())
}
