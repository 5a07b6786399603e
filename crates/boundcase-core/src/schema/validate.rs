//! Non-throwing validation of a [`Value`] against a [`Schema`].
//!
//! Every check runs and every failure is collected, so callers can inspect
//! the full issue list. Messages follow the wording test authors expect from
//! Zod-style validators ("Required", "Expected string, received number",
//! "String must contain at least 2 character(s)", ...).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::{formats, NumberCheck, ObjectSchema, Schema, StringCheck, UnknownKeys};
use crate::value::{js_number, Value};

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Field names from the root to the failing value.
    pub path: Vec<String>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// All issues found for one value. Never empty.
#[derive(Debug, Clone, Error)]
#[error("{}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl ValidationError {
    /// The message of the first issue found.
    pub fn first_message(&self) -> &str {
        self.issues
            .first()
            .map(|issue| issue.message.as_str())
            .unwrap_or_default()
    }
}

fn summarize(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Schema {
    /// Validate `value`, collecting every issue.
    pub fn safe_parse(&self, value: &Value) -> Result<(), ValidationError> {
        let mut checker = Checker::default();
        checker.visit(self, value);
        if checker.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                issues: checker.issues,
            })
        }
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.safe_parse(value).is_ok()
    }
}

#[derive(Default)]
struct Checker {
    path: Vec<String>,
    issues: Vec<Issue>,
}

impl Checker {
    fn report(&mut self, message: impl Into<String>) {
        self.issues.push(Issue {
            path: self.path.clone(),
            message: message.into(),
        });
    }

    fn invalid_type(&mut self, expected: &str, value: &Value) {
        if value.is_undefined() {
            self.report("Required");
        } else {
            self.report(format!(
                "Expected {}, received {}",
                expected,
                value.type_name()
            ));
        }
    }

    fn visit(&mut self, schema: &Schema, value: &Value) {
        match schema {
            Schema::Optional { inner } => {
                if !value.is_undefined() {
                    self.visit(inner, value);
                }
            }
            Schema::Nullable { inner } => {
                if !value.is_null() {
                    self.visit(inner, value);
                }
            }
            Schema::String(string) => match value.as_str() {
                Some(text) => {
                    for check in &string.checks {
                        if let Some(message) = check_string(check, text) {
                            self.report(message);
                        }
                    }
                }
                None => self.invalid_type("string", value),
            },
            Schema::Number(number) => match value {
                Value::Number(n) if !n.is_nan() => {
                    for check in &number.checks {
                        if let Some(message) = check_number(check, *n) {
                            self.report(message);
                        }
                    }
                }
                _ => self.invalid_type("number", value),
            },
            Schema::Boolean => {
                if value.as_bool().is_none() {
                    self.invalid_type("boolean", value);
                }
            }
            Schema::Enum(enumeration) => {
                let expected = enumeration
                    .values
                    .iter()
                    .map(|v| format!("'{}'", v))
                    .collect::<Vec<_>>()
                    .join(" | ");
                match value.as_str() {
                    Some(text) if enumeration.values.iter().any(|v| v == text) => {}
                    Some(text) => self.report(format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        expected, text
                    )),
                    None => self.invalid_type(&expected, value),
                }
            }
            Schema::Object(object) => match value.as_object() {
                Some(_) => self.visit_object(object, value),
                None => self.invalid_type("object", value),
            },
            Schema::DateWindow(window) => match value.as_str() {
                Some(text) => {
                    let inside = window
                        .parse(text)
                        .is_some_and(|instant| window.contains(instant));
                    if !inside {
                        self.report(window.message());
                    }
                }
                None => self.invalid_type("string", value),
            },
            Schema::TimeWindow(window) => match value.as_str() {
                Some(text) => {
                    let inside = window.parse(text).is_some_and(|time| window.contains(time));
                    if !inside {
                        self.report(window.message());
                    }
                }
                None => self.invalid_type("string", value),
            },
            Schema::Unsupported { kind } => {
                self.report(format!("No validator for schema kind `{}`", kind));
            }
        }
    }

    fn visit_object(&mut self, object: &ObjectSchema, value: &Value) {
        for (name, field) in object.fields() {
            self.path.push(name.to_string());
            self.visit(field, value.field(name));
            self.path.pop();
        }

        if object.unknown_keys == UnknownKeys::Strict {
            let unknown: Vec<String> = value
                .as_object()
                .into_iter()
                .flatten()
                .filter(|(key, v)| !v.is_undefined() && object.field(key).is_none())
                .map(|(key, _)| format!("'{}'", key))
                .collect();
            if !unknown.is_empty() {
                self.report(format!(
                    "Unrecognized key(s) in object: {}",
                    unknown.join(", ")
                ));
            }
        }
    }
}

/// Check a single string constraint. Returns `Some(message)` on violation.
fn check_string(check: &StringCheck, text: &str) -> Option<String> {
    let length = text.chars().count();
    match check {
        StringCheck::Min { value } if length < *value => Some(format!(
            "String must contain at least {} character(s)",
            value
        )),
        StringCheck::Max { value } if length > *value => Some(format!(
            "String must contain at most {} character(s)",
            value
        )),
        StringCheck::Length { value } if length != *value => Some(format!(
            "String must contain exactly {} character(s)",
            value
        )),
        StringCheck::Regex { pattern } if !pattern.is_match(text) => Some("Invalid".to_string()),
        StringCheck::StartsWith { value } if !text.starts_with(value.as_str()) => Some(format!(
            "Invalid input: must start with \"{}\"",
            value
        )),
        StringCheck::EndsWith { value } if !text.ends_with(value.as_str()) => Some(format!(
            "Invalid input: must end with \"{}\"",
            value
        )),
        other => {
            let format = other.format()?;
            if formats::matches(format, text) {
                None
            } else {
                Some(format!("Invalid {}", format.name()))
            }
        }
    }
}

/// Check a single number constraint. Returns `Some(message)` on violation.
fn check_number(check: &NumberCheck, n: f64) -> Option<String> {
    match check {
        NumberCheck::Min { value } if n < *value => Some(format!(
            "Number must be greater than or equal to {}",
            js_number(*value)
        )),
        NumberCheck::Max { value } if n > *value => Some(format!(
            "Number must be less than or equal to {}",
            js_number(*value)
        )),
        NumberCheck::Int if !is_integer(n) => {
            Some("Expected integer, received float".to_string())
        }
        NumberCheck::Finite if !n.is_finite() => Some("Number must be finite".to_string()),
        NumberCheck::MultipleOf { value } if !is_multiple_of(n, *value) => Some(format!(
            "Number must be a multiple of {}",
            js_number(*value)
        )),
        _ => None,
    }
}

fn is_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// Digits after the decimal point in the shortest rendering of `n`, capped at 15.
pub(crate) fn decimals(n: f64) -> u32 {
    let rendered = format!("{}", n);
    let count = rendered.split_once('.').map_or(0, |(_, frac)| frac.len());
    u32::try_from(count).unwrap_or(u32::MAX).min(15)
}

/// Divisibility that tolerates binary rounding (`0.3` is a multiple of `0.1`).
///
/// Both operands are scaled to integers by the larger of their decimal counts
/// before taking the remainder.
pub(crate) fn is_multiple_of(n: f64, step: f64) -> bool {
    if !n.is_finite() || !step.is_finite() || step == 0.0 {
        return false;
    }
    let scale = 10f64.powi(decimals(n).max(decimals(step)) as i32);
    if (n * scale).abs() >= 1e36 {
        return n % step == 0.0;
    }
    let scaled_n = (n * scale).round() as i128;
    let scaled_step = (step * scale).round() as i128;
    scaled_step != 0 && scaled_n % scaled_step == 0
}
