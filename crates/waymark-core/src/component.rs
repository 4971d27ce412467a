//! Typed input components bound to interactive pages.
//!
//! Each component owns exactly one value type and exposes it through the
//! object-safe [`Component`] trait as a [`Value`]. Setting a value never
//! validates it; the engine calls [`Component::validate`] as a separate step
//! so it can decide between redisplaying the page and advancing.

use std::fmt;

use crate::model::{ChoiceOption, Page, PageKind, ValidationRule};
use crate::value::{Value, ValueKind};

// ===========================================================================
// Errors
// ===========================================================================

/// Why an answer was refused. Always recoverable: the page is asked again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("required field empty")]
    Required,

    #[error("minimum length is {min} characters")]
    TooShort { min: usize, actual: usize },

    #[error("maximum length is {max} characters")]
    TooLong { max: usize, actual: usize },

    #[error("value does not match pattern {pattern}")]
    PatternMismatch { pattern: String },

    /// Author-provided replacement for the required/pattern messages.
    #[error("{0}")]
    Custom(String),

    #[error("no selection made")]
    NoSelection,

    #[error("expected a {expected} answer, got a {found}")]
    KindMismatch { expected: ValueKind, found: ValueKind },
}

// ===========================================================================
// Trait
// ===========================================================================

/// Capability set shared by every input component.
pub trait Component: fmt::Debug {
    /// The value kind this component accepts and returns.
    fn value_kind(&self) -> ValueKind;

    fn get_value(&self) -> Value;

    /// Replace the current value. Refuses values of the wrong kind and
    /// leaves the component unchanged in that case.
    fn set_value(&mut self, value: Value) -> Result<(), InputError>;

    fn validate(&self) -> Result<(), InputError>;
}

fn mismatch(expected: ValueKind, found: &Value) -> InputError {
    InputError::KindMismatch {
        expected,
        found: found.kind(),
    }
}

// ===========================================================================
// Input
// ===========================================================================

/// Free-form text, optionally constrained by a [`ValidationRule`].
#[derive(Debug, Clone, Default)]
pub struct InputComponent {
    value: String,
    rule: Option<ValidationRule>,
    masked: bool,
}

impl InputComponent {
    pub fn new(rule: Option<ValidationRule>) -> Self {
        Self {
            value: String::new(),
            rule,
            masked: false,
        }
    }

    /// Password variant: identical rules, renderers hide the typed text.
    pub fn masked(rule: Option<ValidationRule>) -> Self {
        Self {
            masked: true,
            ..Self::new(rule)
        }
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl Component for InputComponent {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn get_value(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn set_value(&mut self, value: Value) -> Result<(), InputError> {
        match value {
            Value::String(s) => {
                self.value = s;
                Ok(())
            }
            other => Err(mismatch(ValueKind::String, &other)),
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        let Some(rule) = &self.rule else {
            return Ok(());
        };

        if rule.required && self.value.is_empty() {
            return Err(match &rule.message {
                Some(msg) => InputError::Custom(msg.clone()),
                None => InputError::Required,
            });
        }

        let len = self.value.chars().count();
        if rule.min_len > 0 && len < rule.min_len {
            return Err(InputError::TooShort {
                min: rule.min_len,
                actual: len,
            });
        }
        if rule.max_len > 0 && len > rule.max_len {
            return Err(InputError::TooLong {
                max: rule.max_len,
                actual: len,
            });
        }

        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(&self.value) {
                return Err(match &rule.message {
                    Some(msg) => InputError::Custom(msg.clone()),
                    None => InputError::PatternMismatch {
                        pattern: pattern.as_str().to_string(),
                    },
                });
            }
        }

        Ok(())
    }
}

// ===========================================================================
// Select
// ===========================================================================

/// Single choice from an ordered option list. Starts with no selection.
#[derive(Debug, Clone, Default)]
pub struct SelectComponent {
    options: Vec<ChoiceOption>,
    selected: String,
}

impl SelectComponent {
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self {
            options,
            selected: String::new(),
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.selected
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.selected = value.into();
    }
}

impl Component for SelectComponent {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn get_value(&self) -> Value {
        Value::String(self.selected.clone())
    }

    fn set_value(&mut self, value: Value) -> Result<(), InputError> {
        match value {
            Value::String(s) => {
                self.selected = s;
                Ok(())
            }
            other => Err(mismatch(ValueKind::String, &other)),
        }
    }

    /// Selection is implicitly required. Whether the value is still one of
    /// the options is not checked here.
    fn validate(&self) -> Result<(), InputError> {
        if self.selected.is_empty() {
            Err(InputError::NoSelection)
        } else {
            Ok(())
        }
    }
}

// ===========================================================================
// MultiSelect
// ===========================================================================

/// Any subset of the options, kept in the order the user picked them.
#[derive(Debug, Clone, Default)]
pub struct MultiSelectComponent {
    options: Vec<ChoiceOption>,
    selected: Vec<String>,
}

impl MultiSelectComponent {
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self {
            options,
            selected: Vec::new(),
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn value(&self) -> &[String] {
        &self.selected
    }

    pub fn set(&mut self, values: Vec<String>) {
        self.selected = values;
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|s| s == value)
    }
}

impl Component for MultiSelectComponent {
    fn value_kind(&self) -> ValueKind {
        ValueKind::List
    }

    fn get_value(&self) -> Value {
        Value::List(self.selected.clone())
    }

    fn set_value(&mut self, value: Value) -> Result<(), InputError> {
        match value {
            Value::List(items) => {
                self.selected = items;
                Ok(())
            }
            other => Err(mismatch(ValueKind::List, &other)),
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        Ok(())
    }
}

// ===========================================================================
// Confirm
// ===========================================================================

/// Yes/no answer, `false` until set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmComponent {
    value: bool,
}

impl ConfirmComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set(&mut self, value: bool) {
        self.value = value;
    }
}

impl Component for ConfirmComponent {
    fn value_kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn get_value(&self) -> Value {
        Value::Bool(self.value)
    }

    fn set_value(&mut self, value: Value) -> Result<(), InputError> {
        match value {
            Value::Bool(b) => {
                self.value = b;
                Ok(())
            }
            other => Err(mismatch(ValueKind::Bool, &other)),
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        Ok(())
    }
}

// ===========================================================================
// Factory
// ===========================================================================

/// Build the component for an interactive page, or `None` for display pages.
pub fn component_for(page: &Page) -> Option<Box<dyn Component>> {
    match page.kind {
        PageKind::Input => Some(Box::new(InputComponent::new(page.validation.clone()))),
        PageKind::Password => Some(Box::new(InputComponent::masked(page.validation.clone()))),
        PageKind::Select => Some(Box::new(SelectComponent::new(page.options.clone()))),
        PageKind::MultiSelect => Some(Box::new(MultiSelectComponent::new(page.options.clone()))),
        PageKind::Confirm => Some(Box::new(ConfirmComponent::new())),
        PageKind::Info | PageKind::Progress | PageKind::Success | PageKind::Error => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_with(rule: ValidationRule, value: &str) -> InputComponent {
        let mut c = InputComponent::new(Some(rule));
        c.set(value);
        c
    }

    fn options() -> Vec<ChoiceOption> {
        vec![
            ChoiceOption::new("option1", "Option 1"),
            ChoiceOption::new("option2", "Option 2"),
            ChoiceOption::new("option3", "Option 3"),
        ]
    }

    // -----------------------------------------------------------------------
    // Defaults and round trips
    // -----------------------------------------------------------------------

    #[test]
    fn defaults_are_zero_values() {
        assert_eq!(InputComponent::default().get_value(), Value::from(""));
        assert_eq!(SelectComponent::new(options()).get_value(), Value::from(""));
        assert_eq!(
            MultiSelectComponent::new(options()).get_value(),
            Value::List(vec![])
        );
        assert_eq!(ConfirmComponent::new().get_value(), Value::Bool(false));
    }

    #[test]
    fn select_set_and_get() {
        let mut c = SelectComponent::new(options());
        c.set_value(Value::from("option2")).unwrap();
        assert_eq!(c.value(), "option2");
        assert_eq!(c.get_value(), Value::from("option2"));
    }

    #[test]
    fn confirm_set_and_get() {
        let mut c = ConfirmComponent::new();
        c.set_value(Value::Bool(true)).unwrap();
        assert!(c.value());
        c.set_value(Value::Bool(false)).unwrap();
        assert_eq!(c.get_value(), Value::Bool(false));
    }

    #[test]
    fn multiselect_preserves_selection_order() {
        let mut c = MultiSelectComponent::new(options());
        c.set_value(Value::from(vec!["option3", "option1"])).unwrap();
        assert_eq!(c.value(), &["option3".to_string(), "option1".to_string()]);
        assert!(c.is_selected("option1"));
        assert!(!c.is_selected("option2"));
    }

    #[test]
    fn wrong_kind_is_refused_and_value_kept() {
        let mut c = SelectComponent::new(options());
        c.set("option1");
        let err = c.set_value(Value::Bool(true)).unwrap_err();
        assert_eq!(
            err,
            InputError::KindMismatch {
                expected: ValueKind::String,
                found: ValueKind::Bool,
            }
        );
        assert_eq!(c.value(), "option1");

        let mut c = ConfirmComponent::new();
        assert!(c.set_value(Value::from("yes")).is_err());
        assert!(!c.value());
    }

    // -----------------------------------------------------------------------
    // Input validation
    // -----------------------------------------------------------------------

    #[test]
    fn input_validation_table() {
        let pattern = || ValidationRule::new().pattern("^[a-z]+$").unwrap();
        let cases: Vec<(&str, ValidationRule, &str, bool)> = vec![
            ("required empty", ValidationRule::new().required(), "", false),
            ("required present", ValidationRule::new().required(), "test", true),
            ("min ok", ValidationRule::new().min_len(5), "hello", true),
            ("min short", ValidationRule::new().min_len(5), "hi", false),
            ("max ok", ValidationRule::new().max_len(5), "hello", true),
            ("max long", ValidationRule::new().max_len(5), "hello world", false),
            ("pattern ok", pattern(), "hello", true),
            ("pattern bad", pattern(), "Hello123", false),
        ];

        for (name, rule, value, valid) in cases {
            let result = input_with(rule, value).validate();
            assert_eq!(result.is_ok(), valid, "case '{name}': got {result:?}");
        }
    }

    #[test]
    fn input_without_rule_is_always_valid() {
        let c = InputComponent::new(None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn input_checks_short_circuit_in_order() {
        // Empty + required + min_len: the required check wins.
        let rule = ValidationRule::new().required().min_len(3);
        assert_eq!(input_with(rule, "").validate(), Err(InputError::Required));

        // Too short and not matching the pattern: length wins.
        let rule = ValidationRule::new().min_len(5).pattern("^[0-9]+$").unwrap();
        assert_eq!(
            input_with(rule, "ab").validate(),
            Err(InputError::TooShort { min: 5, actual: 2 })
        );
    }

    #[test]
    fn input_length_counts_characters() {
        let rule = ValidationRule::new().max_len(4);
        assert!(input_with(rule, "žluť").validate().is_ok());
    }

    #[test]
    fn custom_message_replaces_required_and_pattern() {
        let rule = ValidationRule::new().required().message("name please");
        assert_eq!(
            input_with(rule, "").validate(),
            Err(InputError::Custom("name please".to_string()))
        );

        let rule = ValidationRule::new()
            .pattern("^[a-z]+$")
            .unwrap()
            .message("lowercase only");
        let err = input_with(rule, "ABC").validate().unwrap_err();
        assert_eq!(err.to_string(), "lowercase only");
    }

    #[test]
    fn password_uses_masked_input() {
        let c = InputComponent::masked(Some(ValidationRule::new().required()));
        assert!(c.is_masked());
        assert_eq!(c.validate(), Err(InputError::Required));
    }

    // -----------------------------------------------------------------------
    // Select / MultiSelect / Confirm validation
    // -----------------------------------------------------------------------

    #[test]
    fn select_fails_only_when_empty() {
        let mut c = SelectComponent::new(options());
        assert_eq!(c.validate(), Err(InputError::NoSelection));
        c.set("option1");
        assert!(c.validate().is_ok());
        // Not one of the options, still accepted.
        c.set("stale");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn multiselect_and_confirm_never_fail() {
        let c = MultiSelectComponent::new(options());
        assert!(c.validate().is_ok());
        let mut c = ConfirmComponent::new();
        assert!(c.validate().is_ok());
        c.set(true);
        assert!(c.validate().is_ok());
    }

    // -----------------------------------------------------------------------
    // Factory
    // -----------------------------------------------------------------------

    #[test]
    fn component_for_page_kinds() {
        let page = Page::new("p", PageKind::Confirm);
        assert_eq!(component_for(&page).unwrap().value_kind(), ValueKind::Bool);

        let page = Page::new("p", PageKind::MultiSelect).option(ChoiceOption::new("a", "A"));
        assert_eq!(component_for(&page).unwrap().value_kind(), ValueKind::List);

        assert!(component_for(&Page::new("p", PageKind::Info)).is_none());
        assert!(component_for(&Page::new("p", PageKind::Success)).is_none());
    }

    #[test]
    fn component_for_input_carries_rule() {
        let page = Page::new("name", PageKind::Input).validation(ValidationRule::new().required());
        let component = component_for(&page).unwrap();
        assert_eq!(component.validate(), Err(InputError::Required));
    }
}
