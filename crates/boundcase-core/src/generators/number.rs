//! Number boundary values.

use super::{round2, round_to_step, GenContext, LeafGenerator};
use crate::error::GenerateError;
use crate::extract::{extract, ConstraintSet};
use crate::oracle::{case, TestCase};
use crate::schema::Schema;
use crate::value::{js_number, Fields, Value};
use crate::warning::WarningKind;

#[derive(Debug, Default, Clone, Copy)]
pub struct NumberGenerator;

impl LeafGenerator for NumberGenerator {
    fn valid(&self, schema: &Schema, ctx: &mut GenContext) -> Result<Vec<TestCase>, GenerateError> {
        if !matches!(schema, Schema::Number(_)) {
            return Err(ctx.mismatch("number", schema));
        }
        let cs = extract(schema);
        let mut candidates: Vec<(String, f64)> = Vec::new();

        if let Some(n) = sample_in_range(&cs, ctx) {
            candidates.push(("random valid number in range".to_string(), n));
        }
        if cs.is_finite {
            candidates.push((
                "finite number".to_string(),
                ctx.options.finite_sentinel,
            ));
        }
        if let Some(min) = cs.min {
            candidates.push((format!("minimum value ({})", js_number(min)), min));
        }
        if let Some(max) = cs.max {
            candidates.push((format!("maximum value ({})", js_number(max)), max));
        }
        if cs.min != cs.max {
            if let (Some(min), Some(max)) = (cs.min, cs.max) {
                let mid = min / 2.0 + max / 2.0;
                let mid = if cs.is_integer {
                    mid.floor()
                } else {
                    round2_within(mid, min, max)
                };
                candidates.push((format!("midpoint value ({})", js_number(mid)), mid));
            }
            if !cs.is_integer {
                if let Some(min) = cs.min {
                    let n = round2(min + 0.01);
                    candidates.push((format!("just above minimum ({})", js_number(n)), n));
                }
                if let Some(max) = cs.max {
                    let n = round2(max - 0.01);
                    candidates.push((format!("just below maximum ({})", js_number(n)), n));
                }
            }
        }
        if let Some(step) = cs.multiple_of {
            let unit = step.abs();
            let n = match (cs.min, cs.max) {
                (Some(min), _) => match min.rem_euclid(unit) {
                    r if r == 0.0 => min,
                    r => min - r + unit,
                },
                (None, Some(max)) => max - max.rem_euclid(unit),
                (None, None) => step,
            };
            let n = round_to_step(n, step);
            candidates.push((format!("multiple of {} ({})", js_number(step), js_number(n)), n));
        }

        Ok(candidates
            .into_iter()
            .map(|(desc, n)| case(schema, desc, Value::Number(n)))
            .collect())
    }

    fn invalid(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        if !matches!(schema, Schema::Number(_)) {
            return Err(ctx.mismatch("number", schema));
        }
        let cs = extract(schema);
        let mut cases = vec![
            case(schema, "string instead of number", Value::from("not-a-number")),
            case(schema, "boolean instead of number", Value::Bool(true)),
            case(
                schema,
                "array instead of number",
                Value::Array(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]),
            ),
            case(schema, "object instead of number", {
                let mut fields = Fields::new();
                fields.insert("value".to_string(), Value::from(1i64));
                Value::Object(fields)
            }),
        ];

        let mut candidates: Vec<(String, f64)> = Vec::new();
        if cs.is_finite {
            candidates.push(("positive infinity".to_string(), f64::INFINITY));
            candidates.push(("negative infinity".to_string(), f64::NEG_INFINITY));
            candidates.push(("NaN".to_string(), f64::NAN));
        }
        if cs.is_integer {
            let n = cs.min.unwrap_or(1.0).floor() + 0.5;
            candidates.push((format!("non-integer value ({})", js_number(n)), n));
        }
        if let Some(min) = cs.min {
            candidates.push((format!("below minimum ({})", js_number(min - 1.0)), min - 1.0));
            if !cs.is_integer {
                let n = round2(min - 0.01);
                candidates.push((format!("just below minimum ({})", js_number(n)), n));
            }
        }
        if let Some(max) = cs.max {
            candidates.push((format!("above maximum ({})", js_number(max + 1.0)), max + 1.0));
            if !cs.is_integer {
                let n = round2(max + 0.01);
                candidates.push((format!("just above maximum ({})", js_number(n)), n));
            }
        }
        if let Some(step) = cs.multiple_of {
            match sample_non_multiple(&cs, step, ctx) {
                Some(n) => candidates.push((
                    format!("not a multiple of {} ({})", js_number(step), js_number(n)),
                    n,
                )),
                None => ctx.warn(
                    WarningKind::SamplingExhausted {
                        target: "non-multiple".to_string(),
                    },
                    format!(
                        "no in-range value that is not a multiple of {} found",
                        js_number(step)
                    ),
                ),
            }
        }

        cases.extend(
            candidates
                .into_iter()
                .map(|(desc, n)| case(schema, desc, Value::Number(n))),
        );
        Ok(cases)
    }
}

/// The sampling range, with missing bounds replaced by the surrogate span.
fn range(cs: &ConstraintSet, ctx: &GenContext) -> (f64, f64) {
    let span = ctx.options.unbounded_span;
    (cs.min.unwrap_or(-span), cs.max.unwrap_or(span))
}

fn sample_in_range(cs: &ConstraintSet, ctx: &mut GenContext) -> Option<f64> {
    let (low, high) = range(cs, ctx);
    match cs.multiple_of {
        Some(step) if step != 0.0 => {
            let (a, b) = (
                (low / step).ceil().clamp(-f64::MAX, f64::MAX),
                (high / step).floor().clamp(-f64::MAX, f64::MAX),
            );
            let (lo_k, hi_k) = if step > 0.0 { (a, b) } else { (b, a) };
            ctx.rng
                .int_in(lo_k, hi_k)
                .map(|k| round_to_step(k * step, step))
        }
        _ if cs.is_integer => ctx.rng.int_in(low, high),
        _ => {
            let n = ctx.rng.float_in(low, high);
            Some(round2_within(n, low, high))
        }
    }
}

/// `round2(n)`, unless rounding would leave `[low, high]`.
fn round2_within(n: f64, low: f64, high: f64) -> f64 {
    let rounded = round2(n);
    if (low..=high).contains(&rounded) {
        rounded
    } else {
        n
    }
}

fn sample_non_multiple(cs: &ConstraintSet, step: f64, ctx: &mut GenContext) -> Option<f64> {
    let (low, high) = range(cs, ctx);
    let attempts = ctx.options.sample_attempts;
    (0..attempts).find_map(|_| {
        let n = if cs.is_integer {
            ctx.rng.int_in(low, high)?
        } else {
            round2(ctx.rng.float_in(low, high))
        };
        (!crate::schema::is_multiple_of(n, step)).then_some(n)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerateOptions;
    use pretty_assertions::assert_eq;

    fn numbers(cases: &[TestCase]) -> Vec<f64> {
        cases.iter().filter_map(|c| c.value.as_f64()).collect()
    }

    fn ctx() -> GenContext {
        GenContext::new(&GenerateOptions::default().with_seed(17))
    }

    #[test]
    fn test_bounded_valid_boundaries() {
        let schema: Schema = Schema::number().min(1.0).max(10.0).into();
        let cases = NumberGenerator.valid(&schema, &mut ctx()).unwrap();
        let values = numbers(&cases);
        for expected in [1.0, 10.0, 5.5, 1.01, 9.99] {
            assert!(values.contains(&expected), "missing {expected} in {values:?}");
        }
        assert!(cases.iter().all(|c| c.is_valid));
    }

    #[test]
    fn test_bounded_invalid_boundaries() {
        let schema: Schema = Schema::number().min(1.0).max(10.0).into();
        let cases = NumberGenerator.invalid(&schema, &mut ctx()).unwrap();
        let values = numbers(&cases);
        assert!(values.contains(&0.0));
        assert!(values.contains(&11.0));
        assert!(values.contains(&0.99));
        assert!(values.contains(&10.01));
        assert!(cases.iter().all(|c| !c.is_valid));
        assert_eq!(
            cases[..4].iter().map(|c| c.value.type_name()).collect::<Vec<_>>(),
            vec!["string", "boolean", "array", "object"]
        );
    }

    #[test]
    fn test_integer_schema() {
        let schema: Schema = Schema::number().int().min(0.0).max(5.0).into();
        let mut ctx = ctx();
        let valid = NumberGenerator.valid(&schema, &mut ctx).unwrap();
        assert!(valid.iter().all(|c| c.is_valid));
        assert!(numbers(&valid).iter().all(|n| n.fract() == 0.0));
        assert!(numbers(&valid).contains(&2.0));

        let invalid = NumberGenerator.invalid(&schema, &mut ctx).unwrap();
        assert!(numbers(&invalid).contains(&0.5));
        assert!(!numbers(&invalid).contains(&-0.01));
    }

    #[test]
    fn test_unbounded_integer_non_integer_default() {
        let schema: Schema = Schema::number().int().into();
        let invalid = NumberGenerator.invalid(&schema, &mut ctx()).unwrap();
        assert!(numbers(&invalid).contains(&1.5));
    }

    #[test]
    fn test_finite_cases() {
        let schema: Schema = Schema::number().finite().into();
        let mut ctx = ctx();
        let valid = NumberGenerator.valid(&schema, &mut ctx).unwrap();
        assert!(numbers(&valid).contains(&1_000_000.0));

        let invalid = NumberGenerator.invalid(&schema, &mut ctx).unwrap();
        let values = numbers(&invalid);
        assert!(values.contains(&f64::INFINITY));
        assert!(values.contains(&f64::NEG_INFINITY));
        assert!(values.iter().any(|n| n.is_nan()));
    }

    #[test]
    fn test_multiple_of() {
        let schema: Schema = Schema::number().min(7.0).max(100.0).multiple_of(5.0).into();
        let mut ctx = ctx();
        let valid = NumberGenerator.valid(&schema, &mut ctx).unwrap();
        let values: Vec<f64> = valid
            .iter()
            .filter(|c| c.is_valid)
            .filter_map(|c| c.value.as_f64())
            .collect();
        assert!(values.contains(&10.0));
        assert!(values.contains(&100.0));

        let invalid = NumberGenerator.invalid(&schema, &mut ctx).unwrap();
        assert!(invalid
            .iter()
            .any(|c| c.description.starts_with("not a multiple of 5")));
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        for schema in [
            Schema::number().min(-1e308).max(1e308),
            Schema::number().int().min(-1e308).max(1e308),
            Schema::number().min(-1e308).max(1e308).multiple_of(0.5),
        ] {
            let schema: Schema = schema.into();
            let mut ctx = ctx();
            let valid = NumberGenerator.valid(&schema, &mut ctx).unwrap();
            let values = numbers(&valid);
            assert!(values.iter().all(|n| n.is_finite()), "{values:?}");
            assert!(values.contains(&0.0), "missing midpoint in {values:?}");
            assert!(valid.iter().all(|c| c.is_valid), "{valid:?}");
            NumberGenerator.invalid(&schema, &mut ctx).unwrap();
        }
    }

    #[test]
    fn test_synthesized_floats_have_two_decimals() {
        let two_decimals = |n: f64| ((n * 100.0).round() - n * 100.0).abs() < 1e-6;
        for seed in 0..20 {
            let mut ctx = GenContext::new(&GenerateOptions::default().with_seed(seed));
            let schema: Schema = Schema::number().min(0.0).max(10.0).into();
            let valid = NumberGenerator.valid(&schema, &mut ctx).unwrap();
            let random = valid
                .iter()
                .find(|c| c.description == "random valid number in range")
                .and_then(|c| c.value.as_f64())
                .unwrap();
            assert!(two_decimals(random), "{random}");
        }

        let schema: Schema = Schema::number().min(0.25).max(1.0).multiple_of(0.1).into();
        let valid = NumberGenerator.valid(&schema, &mut ctx()).unwrap();
        let multiple = valid
            .iter()
            .find(|c| c.description.starts_with("multiple of 0.1"))
            .unwrap();
        assert_eq!(multiple.description, "multiple of 0.1 (0.3)");
        assert_eq!(multiple.value, Value::Number(0.3));
        assert!(numbers(&valid).iter().all(|&n| two_decimals(n)));
    }
}
