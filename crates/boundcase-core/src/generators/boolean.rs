//! Boolean cases: both literals valid, a fixed battery of look-alikes invalid.

use super::{GenContext, LeafGenerator};
use crate::error::GenerateError;
use crate::oracle::{case, TestCase};
use crate::schema::Schema;
use crate::value::{Fields, Value};

#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanGenerator;

impl LeafGenerator for BooleanGenerator {
    fn valid(&self, schema: &Schema, ctx: &mut GenContext) -> Result<Vec<TestCase>, GenerateError> {
        if !matches!(schema, Schema::Boolean) {
            return Err(ctx.mismatch("boolean", schema));
        }
        Ok(vec![
            case(schema, "true", Value::Bool(true)),
            case(schema, "false", Value::Bool(false)),
        ])
    }

    fn invalid(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        if !matches!(schema, Schema::Boolean) {
            return Err(ctx.mismatch("boolean", schema));
        }
        let candidates = [
            ("string \"true\"", Value::from("true")),
            ("string \"false\"", Value::from("false")),
            ("number 1", Value::from(1i64)),
            ("number 0", Value::from(0i64)),
            ("null", Value::Null),
            ("undefined", Value::Undefined),
            ("empty object", Value::Object(Fields::new())),
            ("empty array", Value::Array(Vec::new())),
            ("NaN", Value::Number(f64::NAN)),
            ("Infinity", Value::Number(f64::INFINITY)),
            ("-Infinity", Value::Number(f64::NEG_INFINITY)),
        ];
        Ok(candidates
            .into_iter()
            .map(|(desc, value)| case(schema, desc, value))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerateOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_cases() {
        let mut ctx = GenContext::new(&GenerateOptions::default());
        let schema = Schema::boolean();

        let valid = BooleanGenerator.valid(&schema, &mut ctx).unwrap();
        assert_eq!(valid.len(), 2);
        assert!(valid.iter().all(|c| c.is_valid));

        let invalid = BooleanGenerator.invalid(&schema, &mut ctx).unwrap();
        assert_eq!(invalid.len(), 11);
        assert!(invalid.iter().all(|c| !c.is_valid));
        assert_eq!(invalid[5].expected_message.as_deref(), Some("Required"));
        assert_eq!(
            invalid[8].expected_message.as_deref(),
            Some("Expected boolean, received nan")
        );
    }
}
