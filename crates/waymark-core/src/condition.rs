//! Boolean conditions over session variables, used to pick navigation branches.
//!
//! The language is whitespace-tokenized and deliberately tiny:
//!
//! | Shape             | True when                                          |
//! |-------------------|----------------------------------------------------|
//! | `name`            | `name` is the boolean `true`                       |
//! | `name true/false` | `name` is a boolean equal to the literal           |
//! | `name == literal` | the string form of `name` equals `literal`         |
//! | `name != literal` | `name` is set and its string form differs          |
//!
//! Evaluation is fail-closed: unknown variables, unknown operators and any
//! other token shape evaluate to `false` instead of raising an error.
//! [`parse_condition`] exposes the parsed shape so definitions can be linted
//! for typos without changing runtime behavior.

use crate::value::{Value, Variables};

/// A parsed condition. Borrows its tokens from the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition<'a> {
    /// Bare variable name.
    Truthy(&'a str),
    /// `name true` or `name false`.
    Is { name: &'a str, expected: bool },
    Equals { name: &'a str, literal: &'a str },
    NotEquals { name: &'a str, literal: &'a str },
    /// Empty input or an unrecognised token shape.
    Malformed,
}

impl<'a> Condition<'a> {
    /// The variable this condition reads, if it parsed.
    pub fn variable(&self) -> Option<&'a str> {
        match *self {
            Condition::Truthy(name)
            | Condition::Is { name, .. }
            | Condition::Equals { name, .. }
            | Condition::NotEquals { name, .. } => Some(name),
            Condition::Malformed => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Condition::Malformed)
    }

    pub fn evaluate(&self, variables: &Variables) -> bool {
        let Some(value) = self.variable().and_then(|name| variables.get(name)) else {
            return false;
        };

        match *self {
            Condition::Truthy(_) => matches!(value, Value::Bool(true)),
            Condition::Is { expected, .. } => value.as_bool() == Some(expected),
            Condition::Equals { literal, .. } => value.to_string() == literal,
            Condition::NotEquals { literal, .. } => value.to_string() != literal,
            Condition::Malformed => false,
        }
    }
}

/// Split an expression into one of the recognised shapes.
pub fn parse_condition(expression: &str) -> Condition<'_> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    match *tokens.as_slice() {
        [name] => Condition::Truthy(name),
        [name, "true"] => Condition::Is {
            name,
            expected: true,
        },
        [name, "false"] => Condition::Is {
            name,
            expected: false,
        },
        [name, "==", literal] => Condition::Equals { name, literal },
        [name, "!=", literal] => Condition::NotEquals { name, literal },
        _ => Condition::Malformed,
    }
}

/// Evaluate `expression` against `variables`. Never fails; anything that
/// cannot be resolved is `false`.
pub fn evaluate_condition(expression: &str, variables: &Variables) -> bool {
    let condition = parse_condition(expression);
    let result = condition.evaluate(variables);
    if condition.is_malformed() {
        tracing::debug!(expression, "malformed condition evaluated as false");
    }
    result
}
