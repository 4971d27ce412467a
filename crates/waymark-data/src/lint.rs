//! Static checks for loaded definitions.
//!
//! Conditions fail closed at runtime, so a typo such as `use_db = true` or a
//! misspelled variable silently takes the `false` branch. Lint reports those
//! cases, plus pages no navigation path can reach. Findings are advisory:
//! they never stop a wizard from loading or running.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use waymark_core::{Wizard, parse_condition};

/// Where a condition was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionSite {
    Navigation,
    Task,
}

impl fmt::Display for ConditionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionSite::Navigation => f.write_str("navigation"),
            ConditionSite::Task => f.write_str("task"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// The condition matches no recognised shape and always evaluates false.
    MalformedCondition {
        page: String,
        site: ConditionSite,
        condition: String,
    },
    /// The condition reads a variable nothing seeds or sets.
    UnknownVariable {
        page: String,
        site: ConditionSite,
        variable: String,
    },
    /// No navigation path from the start page leads here.
    UnreachablePage { page: String },
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::MalformedCondition {
                page,
                site,
                condition,
            } => write!(
                f,
                "page '{page}': {site} condition '{condition}' is malformed and always false"
            ),
            LintWarning::UnknownVariable {
                page,
                site,
                variable,
            } => write!(
                f,
                "page '{page}': {site} condition reads '{variable}', which is never set"
            ),
            LintWarning::UnreachablePage { page } => {
                write!(f, "page '{page}' is unreachable from the start page")
            }
        }
    }
}

/// Every variable a session of `wizard` can hold.
fn known_variables(wizard: &Wizard) -> BTreeSet<&str> {
    let mut known: BTreeSet<&str> = wizard.variables().keys().map(String::as_str).collect();
    for page in wizard.pages() {
        known.extend(page.variable.as_deref());
        known.extend(page.options.iter().filter_map(|o| o.variable.as_deref()));
    }
    known
}

fn reachable_pages(wizard: &Wizard) -> BTreeSet<&str> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([wizard.start_id()]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        let Some(rule) = wizard.find_page(id).and_then(|p| p.next.as_ref()) else {
            continue;
        };
        queue.extend(rule.targets().into_iter().filter(|t| !t.is_empty()));
    }
    seen
}

pub fn lint_wizard(wizard: &Wizard) -> Vec<LintWarning> {
    let known = known_variables(wizard);
    let reachable = reachable_pages(wizard);
    let mut warnings = Vec::new();

    for page in wizard.pages() {
        let nav = page
            .next
            .as_ref()
            .and_then(|rule| rule.condition())
            .map(|c| (ConditionSite::Navigation, c));
        let tasks = page
            .tasks
            .iter()
            .filter_map(|t| t.condition.as_deref())
            .map(|c| (ConditionSite::Task, c));

        for (site, expression) in nav.into_iter().chain(tasks) {
            let condition = parse_condition(expression);
            match condition.variable() {
                None => warnings.push(LintWarning::MalformedCondition {
                    page: page.id.clone(),
                    site,
                    condition: expression.to_string(),
                }),
                Some(name) if !known.contains(name) => {
                    warnings.push(LintWarning::UnknownVariable {
                        page: page.id.clone(),
                        site,
                        variable: name.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        if !reachable.contains(page.id.as_str()) {
            warnings.push(LintWarning::UnreachablePage {
                page: page.id.clone(),
            });
        }
    }

    for warning in &warnings {
        tracing::warn!(wizard = wizard.id(), "{warning}");
    }
    warnings
}
