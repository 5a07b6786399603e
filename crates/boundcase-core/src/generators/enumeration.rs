//! Enum cases: every member valid; placeholders and wrong types invalid.

use super::{GenContext, LeafGenerator};
use crate::error::GenerateError;
use crate::oracle::{case, TestCase};
use crate::schema::Schema;
use crate::value::{Fields, Value};

#[derive(Debug, Default, Clone, Copy)]
pub struct EnumGenerator;

impl LeafGenerator for EnumGenerator {
    fn valid(&self, schema: &Schema, ctx: &mut GenContext) -> Result<Vec<TestCase>, GenerateError> {
        let Schema::Enum(enumeration) = schema else {
            return Err(ctx.mismatch("enum", schema));
        };
        Ok(enumeration
            .values
            .iter()
            .map(|member| {
                case(
                    schema,
                    format!("valid enum value \"{}\"", member),
                    Value::from(member.as_str()),
                )
            })
            .collect())
    }

    fn invalid(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        let Schema::Enum(enumeration) = schema else {
            return Err(ctx.mismatch("enum", schema));
        };
        // Terminates for any finite member list.
        let outsider = loop {
            let candidate = ctx.rng.lowercase(10);
            if !enumeration.values.contains(&candidate) {
                break candidate;
            }
        };
        let candidates = [
            ("invalid enum value", Value::from("invalid_enum_value")),
            ("number instead of enum", Value::from(123i64)),
            ("boolean instead of enum", Value::Bool(true)),
            ("object instead of enum", Value::Object(Fields::new())),
            ("array instead of enum", Value::Array(Vec::new())),
            ("random non-member string", Value::String(outsider)),
        ];
        Ok(candidates
            .into_iter()
            .map(|(desc, value)| case(schema, desc, value))
            .collect())
    }
}
