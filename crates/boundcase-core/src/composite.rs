//! Whole-object fixtures built from per-field cases.
//!
//! Every fixture starts from a baseline where each field holds its default
//! value: the first valid case of the field's declared schema. One field at a
//! time is then replaced with each of its own cases. Nested objects recurse
//! with the field appended to the path, and their fixtures are spliced into
//! the parent's slot. Optional fields are omitted one at a time, never in
//! combination.

use tracing::debug;

use crate::error::GenerateError;
use crate::generator::TestCaseGenerator;
use crate::generators::GenContext;
use crate::oracle::{case, retain_bucket, TestCase};
use crate::schema::{ObjectSchema, Schema};
use crate::value::{Fields, Value};

/// Prefix a description with the dotted path it applies to.
fn describe(path: &str, text: &str) -> String {
    if path.is_empty() {
        text.to_string()
    } else {
        format!("{}: {}", path, text)
    }
}

fn with_field(baseline: &Value, name: &str, value: Value) -> Value {
    let mut fixture = baseline.clone();
    fixture.set_field(name, value);
    fixture
}

impl TestCaseGenerator<'_> {
    /// The baseline object: every field at its default value.
    fn baseline(&self, object: &ObjectSchema, ctx: &mut GenContext) -> Result<Value, GenerateError> {
        let mut baseline = Value::Object(Fields::new());
        for (name, field) in object.fields() {
            let default = ctx.scoped(name, |ctx| self.default_value(field, ctx))?;
            baseline.set_field(name, default);
        }
        Ok(baseline)
    }

    /// First valid case of the declared schema, `undefined` when there is none.
    fn default_value(&self, field: &Schema, ctx: &mut GenContext) -> Result<Value, GenerateError> {
        Ok(match field {
            Schema::Optional { .. } => Value::Undefined,
            Schema::Nullable { .. } => Value::Null,
            other => self
                .valid_cases(other, ctx)?
                .into_iter()
                .next()
                .map(|c| c.value)
                .unwrap_or_default(),
        })
    }

    pub(crate) fn valid_object(
        &self,
        schema: &Schema,
        object: &ObjectSchema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        let baseline = self.baseline(object, ctx)?;
        let mut fixtures: Vec<(String, Value)> = Vec::new();

        for (name, field) in object.fields() {
            ctx.scoped(name, |ctx| -> Result<(), GenerateError> {
                let path = ctx.path();
                let inner = field.unwrap_modifiers();
                if let Schema::Object(nested) = inner {
                    for nested_case in self.valid_object(inner, nested, ctx)? {
                        fixtures.push((
                            nested_case.description,
                            with_field(&baseline, name, nested_case.value),
                        ));
                    }
                    if field.is_optional() {
                        fixtures.push((
                            describe(&path, "undefined for optional object"),
                            with_field(&baseline, name, Value::Undefined),
                        ));
                    }
                    if field.is_nullable() {
                        fixtures.push((
                            describe(&path, "null for nullable object"),
                            with_field(&baseline, name, Value::Null),
                        ));
                    }
                } else {
                    for leaf in self.valid_cases(inner, ctx)? {
                        fixtures.push((
                            describe(&path, &leaf.description),
                            with_field(&baseline, name, leaf.value),
                        ));
                    }
                }
                Ok(())
            })?;
        }

        fixtures.push((
            describe(&ctx.path(), "all fields with valid values"),
            baseline,
        ));

        let cases = fixtures
            .into_iter()
            .map(|(desc, value)| case(schema, desc, value))
            .collect();
        Ok(retain_bucket(cases, true))
    }

    pub(crate) fn invalid_object(
        &self,
        schema: &Schema,
        object: &ObjectSchema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        let baseline = self.baseline(object, ctx)?;
        let mut fixtures: Vec<(String, Value)> = Vec::new();

        for (name, field) in object.fields() {
            ctx.scoped(name, |ctx| -> Result<(), GenerateError> {
                let path = ctx.path();
                let inner = field.unwrap_modifiers();
                if let Schema::Object(nested) = inner {
                    fixtures.push((
                        describe(&path, "non-object value for object field"),
                        with_field(&baseline, name, Value::from("not-an-object")),
                    ));
                    for nested_case in self.invalid_object(inner, nested, ctx)? {
                        fixtures.push((
                            nested_case.description,
                            with_field(&baseline, name, nested_case.value),
                        ));
                    }
                } else {
                    for leaf in self.invalid_cases(field, ctx)? {
                        fixtures.push((
                            describe(&path, &leaf.description),
                            with_field(&baseline, name, leaf.value),
                        ));
                    }
                    if !field.is_optional() {
                        fixtures.push((
                            describe(&path, "missing required field"),
                            with_field(&baseline, name, Value::Undefined),
                        ));
                    }
                }
                Ok(())
            })?;
        }

        let path = ctx.path();
        fixtures.push((describe(&path, "null instead of object"), Value::Null));
        fixtures.push((describe(&path, "undefined instead of object"), Value::Undefined));
        fixtures.push((
            describe(&path, "array instead of object"),
            Value::Array(vec![baseline.clone()]),
        ));
        fixtures.push((
            describe(&path, "string instead of object"),
            Value::from("not-an-object"),
        ));
        fixtures.push((
            describe(&path, "unexpected isAdmin property"),
            with_field(&baseline, "isAdmin", Value::Bool(true)),
        ));

        let cases: Vec<TestCase> = fixtures
            .into_iter()
            .map(|(desc, value)| case(schema, desc, value))
            .collect();
        let total = cases.len();
        let kept = retain_bucket(cases, false);
        debug!(
            path = %path,
            total,
            kept = kept.len(),
            "invalid object fixtures classified"
        );
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{invalid, valid};
    use crate::schema::IntoSchema;
    use pretty_assertions::assert_eq;

    fn user_schema() -> Schema {
        Schema::object([
            ("name", Schema::from(Schema::string().min(2).max(50))),
            ("age", Schema::number().min(0.0).max(120.0).optional()),
        ])
        .into()
    }

    #[test]
    fn test_valid_count_is_field_sum_plus_baseline() {
        let schema = user_schema();
        let cases = valid(&schema).unwrap();
        let name_cases = valid(&Schema::string().min(2).max(50).into()).unwrap();
        let age_cases = valid(&Schema::number().min(0.0).max(120.0).into()).unwrap();

        assert_eq!(cases.len(), name_cases.len() + age_cases.len() + 1);
        assert!(cases.iter().all(|c| c.is_valid));
        assert!(cases.iter().any(|c| c.value.field("age").is_undefined()));
        assert_eq!(
            cases.last().map(|c| c.description.as_str()),
            Some("all fields with valid values")
        );
    }

    #[test]
    fn test_invalid_required_field_adds_missing_and_structural() {
        let schema: Schema = Schema::object([("name", Schema::string().min(2))]).into();
        let cases = invalid(&schema).unwrap();
        let leaf = invalid(&Schema::string().min(2).into()).unwrap();

        assert_eq!(cases.len(), leaf.len() + 5);
        assert!(cases.iter().all(|c| !c.is_valid));
        assert!(cases
            .iter()
            .any(|c| c.description == "name: missing required field"));
        assert!(!cases.iter().any(|c| c.description.contains("isAdmin")));
    }

    #[test]
    fn test_invalid_optional_field_skips_missing_case() {
        let schema: Schema = Schema::object([("flag", Schema::boolean().optional())]).into();
        let cases = invalid(&schema).unwrap();
        let leaf = invalid(&Schema::boolean().optional()).unwrap();
        assert_eq!(cases.len(), leaf.len() + 4);
    }

    #[test]
    fn test_strict_object_keeps_security_fixture() {
        let schema: Schema = Schema::object([("flag", Schema::boolean())])
            .strict()
            .into();
        let cases = invalid(&schema).unwrap();
        let security = cases
            .iter()
            .find(|c| c.description == "unexpected isAdmin property")
            .unwrap();
        assert_eq!(
            security.expected_message.as_deref(),
            Some("Unrecognized key(s) in object: 'isAdmin'")
        );
    }

    #[test]
    fn test_nested_optional_omission_carries_path() {
        let address = Schema::object([("city", Schema::string())]).optional();
        let profile = Schema::object([("address", address)]);
        let user = Schema::object([("profile", Schema::from(profile))]);
        let schema: Schema = Schema::object([("user", Schema::from(user))]).into();

        let cases = valid(&schema).unwrap();
        assert!(cases
            .iter()
            .any(|c| c.description == "user.profile.address: undefined for optional object"));
        let city = cases
            .iter()
            .find(|c| c.description.starts_with("user.profile.address.city: "))
            .unwrap();
        assert!(city.value.pointer("user.profile.address.city").as_str().is_some());
    }

    #[test]
    fn test_nested_invalid_fixtures_are_spliced() {
        let inner = Schema::object([("zip", Schema::string().length(5))]);
        let schema: Schema = Schema::object([("address", Schema::from(inner))]).into();
        let cases = invalid(&schema).unwrap();

        assert!(cases
            .iter()
            .any(|c| c.description == "address: non-object value for object field"));
        let too_short = cases
            .iter()
            .find(|c| c.description.starts_with("address.zip: string too short"))
            .unwrap();
        assert_eq!(
            too_short.value.pointer("address.zip").as_str().map(str::len),
            Some(4)
        );
        assert!(cases.iter().all(|c| !c.is_valid));
    }

    #[test]
    fn test_nullable_nested_object_gets_null_fixture() {
        let profile = Schema::object([("bio", Schema::string().max(20))]).nullable();
        let schema: Schema = Schema::object([("profile", profile)]).into();
        let cases = valid(&schema).unwrap();

        let null_case = cases
            .iter()
            .find(|c| c.description == "profile: null for nullable object")
            .unwrap();
        assert!(null_case.is_valid);
        assert!(null_case.value.field("profile").is_null());
        assert!(!cases
            .iter()
            .any(|c| c.description == "profile: undefined for optional object"));
    }

    #[test]
    fn test_root_structural_negatives_by_description() {
        let schema: Schema = Schema::object([("flag", Schema::boolean())]).into();
        let cases = invalid(&schema).unwrap();
        let value_of = |desc: &str| {
            cases
                .iter()
                .find(|c| c.description == desc)
                .map(|c| c.value.clone())
                .unwrap()
        };

        assert_eq!(value_of("null instead of object"), Value::Null);
        assert_eq!(value_of("undefined instead of object"), Value::Undefined);
        assert_eq!(value_of("string instead of object"), Value::from("not-an-object"));
        match value_of("array instead of object") {
            Value::Array(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].field("flag"), &Value::Bool(true));
            }
            other => panic!("expected an array, got {other:?}"),
        }
    }

    #[test]
    fn test_fixture_keys_follow_declaration_order() {
        let schema: Schema = Schema::object([
            ("zeta", Schema::from(Schema::boolean())),
            ("alpha", Schema::from(Schema::string().min(1).max(4))),
            ("mid", Schema::from(Schema::boolean())),
        ])
        .into();
        let cases = valid(&schema).unwrap();
        let baseline = cases.last().unwrap();
        let keys: Vec<&str> = baseline
            .value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }
}
