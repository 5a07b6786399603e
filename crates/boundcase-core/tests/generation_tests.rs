//! End-to-end generation against fixture schemas and hand-built leaves.

use boundcase_core::{
    classify, generate, invalid, valid, ErrorCode, GenerateError, GenerateOptions, IntoSchema,
    Schema, TestCase, TestCaseGenerator, Value, WarningKind,
};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

// ── Helpers ─────────────────────────────────────────────────────────────────

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/schemas");

fn load_fixture(name: &str) -> Schema {
    let path = Path::new(FIXTURES_DIR).join(format!("{name}.json"));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}.json: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {name}.json: {e}"))
}

fn pinned_options(seed: u64) -> GenerateOptions {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 30, 45).unwrap();
    GenerateOptions::default().with_seed(seed).with_now(now)
}

fn descriptions(cases: &[TestCase]) -> Vec<&str> {
    cases.iter().map(|c| c.description.as_str()).collect()
}

fn assert_buckets_agree_with_oracle(schema: &Schema, valid: &[TestCase], invalid: &[TestCase]) {
    for case in valid {
        assert!(case.is_valid, "valid bucket holds rejected case {:?}", case);
        assert!(classify(schema, &case.value).is_valid, "{:?}", case);
        assert_eq!(case.expected_message, None);
    }
    for case in invalid {
        assert!(!case.is_valid, "invalid bucket holds accepted case {:?}", case);
        assert!(!classify(schema, &case.value).is_valid, "{:?}", case);
        assert!(case.expected_message.is_some(), "{:?}", case);
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────────

#[test]
fn fixtures_partition_cleanly() {
    for name in ["user", "nested", "kitchen_sink"] {
        let schema = load_fixture(name);
        let generated = generate(&schema, &pinned_options(7))
            .unwrap_or_else(|e| panic!("{name}: generation failed: {e}"));
        assert!(!generated.valid.is_empty(), "{name}: no valid cases");
        assert!(!generated.invalid.is_empty(), "{name}: no invalid cases");
        assert_buckets_agree_with_oracle(&schema, &generated.valid, &generated.invalid);
    }
}

#[test]
fn user_fixture_valid_count_is_sum_of_fields_plus_baseline() {
    let schema = load_fixture("user");
    let Schema::Object(object) = &schema else {
        panic!("user fixture is not an object");
    };
    let per_field: usize = object
        .fields()
        .map(|(_, field)| valid(field.unwrap_modifiers()).unwrap().len())
        .sum();

    let cases = valid(&schema).unwrap();
    assert_eq!(cases.len(), per_field + 1);
    assert_eq!(
        cases.last().map(|c| c.description.as_str()),
        Some("all fields with valid values")
    );
}

#[test]
fn user_fixture_baseline_omits_optional_age() {
    let schema = load_fixture("user");
    let cases = valid(&schema).unwrap();
    let baseline = cases.last().unwrap();
    assert!(baseline.value.field("age").is_undefined());
    assert!(baseline.value.field("email").as_str().is_some());

    let json = serde_json::to_value(baseline).unwrap();
    assert!(json["value"].get("age").is_none());
    assert_eq!(json["isValid"], serde_json::json!(true));
}

#[test]
fn nested_fixture_descriptions_carry_dotted_paths() {
    let schema = load_fixture("nested");
    let generated = generate(&schema, &pinned_options(1)).unwrap();

    let valid = descriptions(&generated.valid);
    assert!(valid.contains(&"user.profile.address: undefined for optional object"));
    assert!(valid
        .iter()
        .any(|d| d.starts_with("user.profile.address.zip: valid string of length 5")));

    let invalid = descriptions(&generated.invalid);
    assert!(invalid.contains(&"user: non-object value for object field"));
    assert!(invalid.contains(&"user.profile: non-object value for object field"));
    assert!(invalid.contains(&"active: missing required field"));
    assert!(invalid.contains(&"unexpected isAdmin property"));
    assert!(invalid
        .iter()
        .any(|d| d.starts_with("user.profile.address.zip: string too long")));
}

#[test]
fn nested_fixture_splices_leaf_values_into_place() {
    let schema = load_fixture("nested");
    let cases = invalid(&schema).unwrap();
    let too_long = cases
        .iter()
        .find(|c| c.description.starts_with("user.profile.address.zip: string too long"))
        .unwrap();
    assert_eq!(
        too_long
            .value
            .pointer("user.profile.address.zip")
            .as_str()
            .map(str::len),
        Some(6)
    );
    assert_eq!(too_long.value.field("active").as_bool(), Some(true));
}

#[test]
fn unsupported_field_fails_with_its_path() {
    let schema = load_fixture("unsupported");
    let err = valid(&schema).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::NoGenerator);
    assert_eq!(err.path(), Some("tags"));
    assert_eq!(
        err.to_string(),
        "No generator registered for schema kind `array` at tags"
    );
}

// ── Leaves ──────────────────────────────────────────────────────────────────

#[test]
fn boolean_leaf_has_two_valid_and_eleven_invalid() {
    let schema = Schema::boolean();
    assert_eq!(descriptions(&valid(&schema).unwrap()), vec!["true", "false"]);
    assert_eq!(invalid(&schema).unwrap().len(), 11);
}

#[test]
fn enum_leaf_lists_members_then_outsiders() {
    let schema = Schema::enumeration(["Red", "Green", "Blue"]);
    let members: Vec<String> = valid(&schema)
        .unwrap()
        .into_iter()
        .filter_map(|c| c.value.as_str().map(str::to_string))
        .collect();
    assert_eq!(members, vec!["Red", "Green", "Blue"]);

    let bad = invalid(&schema).unwrap();
    assert_eq!(bad.len(), 6);
    assert_eq!(
        bad[0].expected_message.as_deref(),
        Some("Invalid enum value. Expected 'Red' | 'Green' | 'Blue', received 'invalid_enum_value'")
    );
}

#[test]
fn bounded_number_covers_edges_on_both_sides() {
    let schema: Schema = Schema::number().min(1.0).max(10.0).into();
    let generated = generate(&schema, &GenerateOptions::default()).unwrap();

    let good: Vec<f64> = generated.valid.iter().filter_map(|c| c.value.as_f64()).collect();
    for edge in [1.0, 10.0, 5.5, 1.01, 9.99] {
        assert!(good.contains(&edge), "missing {edge} in {good:?}");
    }
    let bad: Vec<f64> = generated.invalid.iter().filter_map(|c| c.value.as_f64()).collect();
    for edge in [0.0, 0.99, 11.0, 10.01] {
        assert!(bad.contains(&edge), "missing {edge} in {bad:?}");
    }
}

#[test]
fn extreme_number_bounds_do_not_abort() {
    let schema: Schema = Schema::number().min(-1e308).max(1e308).into();
    for seed in 0..8 {
        let generated = generate(&schema, &pinned_options(seed)).unwrap();
        assert!(!generated.valid.is_empty());
        assert_buckets_agree_with_oracle(&schema, &generated.valid, &generated.invalid);
    }
}

#[test]
fn length_capped_email_keeps_object_baseline() {
    let schema: Schema = Schema::object([("email", Schema::string().email().max(16))]).into();
    for seed in 0..40 {
        let generated = generate(&schema, &pinned_options(seed)).unwrap();
        assert!(
            generated
                .valid
                .iter()
                .any(|c| c.description == "email: valid email"),
            "seed {seed}: {:?}",
            descriptions(&generated.valid)
        );
        assert!(generated.warnings.is_empty(), "seed {seed}");
    }
}

#[test]
fn optional_string_leads_with_undefined() {
    let cases = valid(&Schema::string().min(1).optional()).unwrap();
    assert_eq!(cases[0].value, Value::Undefined);
    assert_eq!(cases[0].description, "undefined for optional string");
}

#[test]
fn unreachable_regex_warns_instead_of_failing() {
    let pattern = boundcase_core::schema::Pattern::new(r"^\bword\b$").unwrap();
    let schema: Schema = Schema::string().regex(pattern).into();
    let generated = generate(&schema, &GenerateOptions::default()).unwrap();

    assert!(generated.valid.iter().all(|c| c.is_valid));
    assert!(generated
        .warnings
        .iter()
        .any(|w| matches!(w.kind, WarningKind::RegexSynthesis { .. })));
}

// ── Determinism ─────────────────────────────────────────────────────────────

#[test]
fn same_seed_yields_identical_output() {
    let schema = load_fixture("kitchen_sink");
    let first = generate(&schema, &pinned_options(42)).unwrap();
    let second = generate(&schema, &pinned_options(42)).unwrap();
    // NaN cases never compare equal, so compare the rendered form.
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

#[test]
fn different_seeds_keep_shape_of_output() {
    let schema = load_fixture("user");
    let a = generate(&schema, &pinned_options(1)).unwrap();
    let b = generate(&schema, &pinned_options(2)).unwrap();

    assert_eq!(descriptions(&a.valid), descriptions(&b.valid));
    assert_eq!(descriptions(&a.invalid), descriptions(&b.invalid));
    let flags = |cases: &[TestCase]| cases.iter().map(|c| c.is_valid).collect::<Vec<_>>();
    assert_eq!(flags(&a.valid), flags(&b.valid));
    assert_eq!(flags(&a.invalid), flags(&b.invalid));
}

#[test]
fn generator_handle_reuses_options() {
    let options = pinned_options(5);
    let generator = TestCaseGenerator::new(boundcase_core::default_registry(), options.clone());
    let schema = load_fixture("user");
    assert_eq!(generator.options(), &options);
    assert_eq!(generator.valid(&schema).unwrap(), valid_with(&schema, &options));
}

fn valid_with(schema: &Schema, options: &GenerateOptions) -> Vec<TestCase> {
    generate(schema, options).unwrap().valid
}

// ── Schema files ────────────────────────────────────────────────────────────

#[test]
fn duplicate_object_keys_are_rejected() {
    let raw = r#"{"type":"object","shape":{"a":{"type":"boolean"},"a":{"type":"boolean"}}}"#;
    let err = Schema::from_json(raw).unwrap_err();
    assert!(matches!(err, GenerateError::JsonError(_)));
    assert_eq!(err.error_code(), ErrorCode::JsonParseError);
    assert_eq!(err.path(), None);
    assert_eq!(err.to_json()["code"], "json_parse_error");
}

#[test]
fn unknown_check_kinds_are_ignored() {
    let raw = r#"{"type":"string","checks":[{"kind":"toLowerCase"},{"kind":"min","value":3}]}"#;
    let schema: Schema = serde_json::from_str(raw).unwrap();
    let bad = invalid(&schema).unwrap();
    assert!(bad
        .iter()
        .any(|c| c.description == "string too short (length < 3)"));
}
