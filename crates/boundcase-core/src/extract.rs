//! Flatten a primitive node's check list into a [`ConstraintSet`].

use crate::schema::{NumberCheck, Pattern, Schema, StringCheck, StringFormat};

/// The constraints a generator needs, read from one primitive node.
///
/// `min`/`max` are numeric bounds for numbers and length bounds for strings.
/// A missing bound means unconstrained on that side.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub exact_length: Option<usize>,
    pub multiple_of: Option<f64>,
    pub is_integer: bool,
    pub is_finite: bool,
    pub format: Option<StringFormat>,
    pub regex: Option<Pattern>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
}

impl ConstraintSet {
    /// Smallest accepted string length. An exact length pins both bounds.
    pub fn min_length(&self) -> usize {
        self.exact_length
            .or_else(|| self.min.map(|m| m.max(0.0) as usize))
            .unwrap_or(0)
    }

    /// Largest accepted string length, `None` when unbounded.
    pub fn max_length(&self) -> Option<usize> {
        self.exact_length
            .or_else(|| self.max.map(|m| m.max(0.0) as usize))
    }
}

/// Read the constraints of `schema`.
///
/// Checks are applied in order; a repeated check overwrites the earlier one.
/// Wrappers, objects and enums yield an empty set.
pub fn extract(schema: &Schema) -> ConstraintSet {
    let mut set = ConstraintSet::default();
    match schema {
        Schema::String(string) => {
            for check in &string.checks {
                match check {
                    StringCheck::Min { value } => set.min = Some(*value as f64),
                    StringCheck::Max { value } => set.max = Some(*value as f64),
                    StringCheck::Length { value } => set.exact_length = Some(*value),
                    StringCheck::Regex { pattern } => set.regex = Some(pattern.clone()),
                    StringCheck::StartsWith { value } => set.starts_with = Some(value.clone()),
                    StringCheck::EndsWith { value } => set.ends_with = Some(value.clone()),
                    StringCheck::Unknown => {}
                    other => set.format = other.format(),
                }
            }
        }
        Schema::Number(number) => {
            for check in &number.checks {
                match check {
                    NumberCheck::Min { value } => set.min = Some(*value),
                    NumberCheck::Max { value } => set.max = Some(*value),
                    NumberCheck::Int => set.is_integer = true,
                    NumberCheck::Finite => set.is_finite = true,
                    NumberCheck::MultipleOf { value } => set.multiple_of = Some(*value),
                    NumberCheck::Unknown => {}
                }
            }
        }
        _ => {}
    }
    set
}
