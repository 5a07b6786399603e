//! Entry point: dispatch a schema node to the right generator.
//!
//! Wrappers are handled here and objects by the composite builder;
//! every other supported kind is looked up in the [`GeneratorRegistry`].
//! Whatever a generator returns is filtered to the requested bucket by the
//! oracle before it leaves this module.

use serde::Serialize;
use tracing::debug;

use crate::config::GenerateOptions;
use crate::error::GenerateError;
use crate::generators::{GenContext, LeafGenerator};
use crate::oracle::{case, reclassify, retain_bucket, TestCase};
use crate::registry::{default_registry, GeneratorRegistry};
use crate::schema::Schema;
use crate::value::Value;
use crate::warning::Warning;

/// Valid and invalid cases for one schema, plus any degradation warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    pub valid: Vec<TestCase>,
    pub invalid: Vec<TestCase>,
    pub warnings: Vec<Warning>,
}

/// Generates test cases against a registry with fixed options.
#[derive(Debug, Clone)]
pub struct TestCaseGenerator<'r> {
    registry: &'r GeneratorRegistry,
    options: GenerateOptions,
}

impl Default for TestCaseGenerator<'static> {
    fn default() -> Self {
        Self::new(default_registry(), GenerateOptions::default())
    }
}

impl<'r> TestCaseGenerator<'r> {
    pub fn new(registry: &'r GeneratorRegistry, options: GenerateOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Cases the oracle accepts.
    pub fn valid(&self, schema: &Schema) -> Result<Vec<TestCase>, GenerateError> {
        let mut ctx = self.context(schema, "valid");
        self.valid_cases(schema, &mut ctx)
    }

    /// Cases the oracle rejects.
    pub fn invalid(&self, schema: &Schema) -> Result<Vec<TestCase>, GenerateError> {
        let mut ctx = self.context(schema, "invalid");
        self.invalid_cases(schema, &mut ctx)
    }

    /// Both buckets. Each side starts from the configured seed, so the result
    /// equals separate [`valid`](Self::valid) and [`invalid`](Self::invalid) calls.
    pub fn generate(&self, schema: &Schema) -> Result<Generated, GenerateError> {
        let mut valid_ctx = self.context(schema, "valid");
        let valid = self.valid_cases(schema, &mut valid_ctx)?;
        let mut invalid_ctx = self.context(schema, "invalid");
        let invalid = self.invalid_cases(schema, &mut invalid_ctx)?;

        let mut warnings = valid_ctx.into_warnings();
        warnings.extend(invalid_ctx.into_warnings());
        Ok(Generated {
            valid,
            invalid,
            warnings,
        })
    }

    fn context(&self, schema: &Schema, bucket: &str) -> GenContext {
        debug!(
            seed = self.options.seed,
            kind = schema.kind_name(),
            bucket,
            "generating cases"
        );
        GenContext::new(&self.options)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    pub(crate) fn valid_cases(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        match schema {
            Schema::Optional { inner } => {
                let mut cases = vec![case(
                    schema,
                    format!("undefined for optional {}", inner.unwrap_modifiers().kind_name()),
                    Value::Undefined,
                )];
                cases.extend(self.valid_cases(inner, ctx)?);
                Ok(retain_bucket(reclassify(schema, cases), true))
            }
            Schema::Nullable { inner } => {
                let mut cases = vec![case(
                    schema,
                    format!("null for nullable {}", inner.unwrap_modifiers().kind_name()),
                    Value::Null,
                )];
                cases.extend(self.valid_cases(inner, ctx)?);
                Ok(retain_bucket(reclassify(schema, cases), true))
            }
            Schema::Object(object) => self.valid_object(schema, object, ctx),
            leaf => {
                let generator = self.leaf_generator(leaf, ctx)?;
                Ok(retain_bucket(generator.valid(leaf, ctx)?, true))
            }
        }
    }

    pub(crate) fn invalid_cases(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        match schema {
            Schema::Optional { inner } | Schema::Nullable { inner } => {
                let cases = self.invalid_cases(inner, ctx)?;
                Ok(retain_bucket(reclassify(schema, cases), false))
            }
            Schema::Object(object) => self.invalid_object(schema, object, ctx),
            leaf => {
                let generator = self.leaf_generator(leaf, ctx)?;
                Ok(retain_bucket(generator.invalid(leaf, ctx)?, false))
            }
        }
    }

    fn leaf_generator(
        &self,
        schema: &Schema,
        ctx: &GenContext,
    ) -> Result<&'r dyn LeafGenerator, GenerateError> {
        let no_generator = || GenerateError::NoGenerator {
            kind: schema.kind_name().to_string(),
            path: ctx.location(),
        };
        if matches!(schema, Schema::Unsupported { .. }) {
            return Err(no_generator());
        }
        self.registry.get(schema.kind()).ok_or_else(no_generator)
    }
}

/// Valid cases for `schema` from the default registry and options.
pub fn valid(schema: &Schema) -> Result<Vec<TestCase>, GenerateError> {
    TestCaseGenerator::default().valid(schema)
}

/// Invalid cases for `schema` from the default registry and options.
pub fn invalid(schema: &Schema) -> Result<Vec<TestCase>, GenerateError> {
    TestCaseGenerator::default().invalid(schema)
}

/// Both buckets from the default registry.
pub fn generate(schema: &Schema, options: &GenerateOptions) -> Result<Generated, GenerateError> {
    TestCaseGenerator::new(default_registry(), options.clone()).generate(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::BooleanGenerator;
    use crate::schema::{IntoSchema, SchemaKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_optional_prepends_undefined() {
        let cases = valid(&Schema::boolean().optional()).unwrap();
        let values: Vec<Value> = cases.into_iter().map(|c| c.value).collect();
        assert_eq!(
            values,
            vec![Value::Undefined, Value::Bool(true), Value::Bool(false)]
        );
    }

    #[test]
    fn test_nullable_drops_accepted_null_from_invalid() {
        let plain = invalid(&Schema::boolean()).unwrap();
        let nullable = invalid(&Schema::boolean().nullable()).unwrap();
        assert_eq!(nullable.len(), plain.len() - 1);
        assert!(nullable.iter().all(|c| !c.value.is_null()));
    }

    #[test]
    fn test_stacked_modifiers_terminate() {
        let cases = valid(&Schema::boolean().nullable().optional()).unwrap();
        let values: Vec<Value> = cases.into_iter().map(|c| c.value).collect();
        assert_eq!(
            values,
            vec![Value::Undefined, Value::Null, Value::Bool(true), Value::Bool(false)]
        );
    }

    #[test]
    fn test_unsupported_kind_fails_fast() {
        let err = valid(&Schema::unsupported("array")).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::NoGenerator { ref kind, ref path } if kind == "array" && path == "(root)"
        ));
    }

    #[test]
    fn test_custom_registry_without_kind() {
        let registry = GeneratorRegistry::builder()
            .register(SchemaKind::Boolean, BooleanGenerator)
            .build();
        let generator = TestCaseGenerator::new(&registry, GenerateOptions::default());
        assert_eq!(generator.valid(&Schema::boolean()).unwrap().len(), 2);
        assert!(generator.valid(&Schema::string().into()).is_err());
    }

    #[test]
    fn test_generate_matches_separate_calls() {
        let schema: Schema = Schema::number().min(0.0).max(3.0).into();
        let options = GenerateOptions::default().with_seed(99);
        let generator = TestCaseGenerator::new(default_registry(), options.clone());
        let both = generate(&schema, &options).unwrap();
        assert_eq!(both.valid, generator.valid(&schema).unwrap());
        assert_eq!(both.invalid, generator.invalid(&schema).unwrap());
    }
}
