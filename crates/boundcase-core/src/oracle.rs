//! The case-validity oracle.
//!
//! A case's `is_valid` flag is never asserted by a generator: every candidate
//! is run through [`Schema::safe_parse`] and the verdict is recorded.

use serde::Serialize;
use tracing::debug;

use crate::schema::Schema;
use crate::value::Value;

/// One generated input with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub description: String,
    pub value: Value,
    pub is_valid: bool,
    /// First validation message, present only for invalid cases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_message: Option<String>,
}

/// The oracle's judgement of one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_valid: bool,
    pub expected_message: Option<String>,
}

pub fn classify(schema: &Schema, value: &Value) -> Verdict {
    match schema.safe_parse(value) {
        Ok(()) => Verdict {
            is_valid: true,
            expected_message: None,
        },
        Err(error) => Verdict {
            is_valid: false,
            expected_message: Some(error.first_message().to_string()),
        },
    }
}

/// Classify `value` against `schema` and package it as a case.
pub fn case(schema: &Schema, description: impl Into<String>, value: Value) -> TestCase {
    let verdict = classify(schema, &value);
    TestCase {
        description: description.into(),
        value,
        is_valid: verdict.is_valid,
        expected_message: verdict.expected_message,
    }
}

/// Keep the cases whose verdict matches the bucket being built.
pub(crate) fn retain_bucket(cases: Vec<TestCase>, want_valid: bool) -> Vec<TestCase> {
    cases
        .into_iter()
        .filter(|case| {
            let keep = case.is_valid == want_valid;
            if !keep {
                debug!(
                    description = %case.description,
                    value = %case.value,
                    "dropping case the oracle placed in the other bucket"
                );
            }
            keep
        })
        .collect()
}

/// Re-judge existing cases against another schema, keeping their descriptions.
pub(crate) fn reclassify(schema: &Schema, cases: Vec<TestCase>) -> Vec<TestCase> {
    cases
        .into_iter()
        .map(|tc| case(schema, tc.description, tc.value))
        .collect()
}
