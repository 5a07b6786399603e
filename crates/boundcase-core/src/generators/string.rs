//! String boundary values.
//!
//! Branch selection, first match wins: format tag, then regex, then a plain
//! string shaped by the length and affix checks.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use super::{GenContext, LeafGenerator};
use crate::error::GenerateError;
use crate::extract::{extract, ConstraintSet};
use crate::oracle::{case, TestCase};
use crate::schema::{Schema, StringFormat};
use crate::value::Value;
use crate::warning::WarningKind;

const MALFORMED_DATETIMES: &[(&str, &str)] = &[
    ("missing timezone marker", "2024-01-15T10:30:00"),
    ("month out of range", "2024-13-15T10:30:00Z"),
    ("day out of range", "2024-01-32T10:30:00Z"),
    ("hour out of range", "2024-01-15T24:30:00Z"),
    ("minute out of range", "2024-01-15T10:60:00Z"),
    ("second out of range", "2024-01-15T10:30:60Z"),
    ("wrong date separator", "2024/01/15T10:30:00Z"),
    ("February 29 in a non-leap year", "2023-02-29T10:30:00Z"),
];

const MALFORMED_DATES: &[(&str, &str)] = &[
    ("month out of range", "2024-13-01"),
    ("day out of range", "2024-01-32"),
    ("wrong separator", "2024/01/15"),
    ("February 29 in a non-leap year", "2023-02-29"),
    ("day-first order", "15-01-2024"),
];

const MALFORMED_TIMES: &[(&str, &str)] = &[
    ("hour out of range", "24:00:00"),
    ("minute out of range", "12:60:00"),
    ("second out of range", "12:30:60"),
    ("wrong separator", "12.30.00"),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct StringGenerator;

impl LeafGenerator for StringGenerator {
    fn valid(&self, schema: &Schema, ctx: &mut GenContext) -> Result<Vec<TestCase>, GenerateError> {
        if !matches!(schema, Schema::String(_)) {
            return Err(ctx.mismatch("string", schema));
        }
        let cs = extract(schema);
        let mut cases = Vec::new();

        if let Some(format) = cs.format {
            if format.is_calendar() {
                cases.extend(
                    calendar_boundaries(format, ctx.now)
                        .into_iter()
                        .map(|(desc, text)| case(schema, desc, Value::String(text))),
                );
            } else {
                let (min, max) = (cs.min_length(), cs.max_length());
                let fits = |text: &str| {
                    let n = text.chars().count();
                    n >= min && max.map_or(true, |max| n <= max)
                };
                let attempts = ctx.options.sample_attempts;
                let found = (0..attempts).find_map(|_| {
                    let example = format_example(format, ctx);
                    fits(&example).then_some(example)
                });
                match found {
                    Some(example) => cases.push(case(
                        schema,
                        format!("valid {}", format_label(format)),
                        Value::String(example),
                    )),
                    None => ctx.warn(
                        WarningKind::SamplingExhausted {
                            target: format!("{} example", format.name()),
                        },
                        format!(
                            "no {} example within the length bounds found in {} attempts",
                            format_label(format),
                            attempts
                        ),
                    ),
                }
            }
        } else if let Some(pattern) = &cs.regex {
            let limit = length_cap(&cs, ctx);
            let attempts = ctx.options.sample_attempts;
            match ctx.rng.regex_match(pattern, limit, attempts) {
                Ok(text) => cases.push(case(
                    schema,
                    format!("valid regex match for {}", pattern),
                    Value::String(text),
                )),
                Err(reason) => ctx.warn(
                    WarningKind::RegexSynthesis {
                        pattern: pattern.as_str().to_string(),
                    },
                    format!("unable to generate a match for {}: {}", pattern, reason),
                ),
            }
        } else {
            let length = plain_length(&cs, ctx);
            let text = with_affixes(&cs, length, ctx);
            cases.push(case(
                schema,
                format!("valid string of length {}", text.chars().count()),
                Value::String(text),
            ));
        }

        Ok(cases)
    }

    fn invalid(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        if !matches!(schema, Schema::String(_)) {
            return Err(ctx.mismatch("string", schema));
        }
        let cs = extract(schema);
        let mut cases = Vec::new();

        if let Some(format) = cs.format {
            cases.push(case(
                schema,
                format!("invalid {}", format_label(format)),
                Value::from(known_bad(format)),
            ));
            let malformed = match format {
                StringFormat::Datetime => MALFORMED_DATETIMES,
                StringFormat::Date => MALFORMED_DATES,
                StringFormat::Time => MALFORMED_TIMES,
                _ => &[],
            };
            cases.extend(malformed.iter().map(|(desc, text)| {
                case(
                    schema,
                    format!("invalid {}: {}", format.name(), desc),
                    Value::from(*text),
                )
            }));
        } else if let Some(pattern) = &cs.regex {
            let low = cs.min_length();
            let high = length_cap(&cs, ctx).max(low);
            let attempts = ctx.options.sample_attempts;
            let found = (0..attempts).find_map(|_| {
                let length = ctx.rng.int_in(low as f64, high as f64).unwrap_or(low as f64) as usize;
                let sample = ctx.rng.alphanumeric(length);
                (!pattern.is_match(&sample)).then_some(sample)
            });
            match found {
                Some(text) => cases.push(case(
                    schema,
                    format!("invalid regex match for {}", pattern),
                    Value::String(text),
                )),
                None => ctx.warn(
                    WarningKind::SamplingExhausted {
                        target: "regex non-match".to_string(),
                    },
                    format!("no sample failing {} found in {} attempts", pattern, attempts),
                ),
            }
        } else {
            let min = cs.min_length();
            if min > 0 {
                // Affixes longer than the target length would pad it back up.
                let text = if affix_len(&cs) < min {
                    with_affixes(&cs, min - 1, ctx)
                } else {
                    ctx.rng.lowercase(min - 1)
                };
                cases.push(case(
                    schema,
                    format!("string too short (length < {})", min),
                    Value::String(text),
                ));
            }
            if let Some(max) = cs.max_length() {
                let text = with_affixes(&cs, max + 1, ctx);
                cases.push(case(
                    schema,
                    format!("string too long (length > {})", max),
                    Value::String(text),
                ));
            }
            let length = plain_length(&cs, ctx);
            if let Some(prefix) = &cs.starts_with {
                let text = with_affixes(&cs, length, ctx);
                let wrong = if prefix.starts_with('x') { "y" } else { "x" };
                let rest: String = text.chars().skip(prefix.chars().count()).collect();
                cases.push(case(
                    schema,
                    format!("string not starting with \"{}\"", prefix),
                    Value::String(format!("{}{}", wrong, rest)),
                ));
            }
            if let Some(suffix) = &cs.ends_with {
                let text = with_affixes(&cs, length, ctx);
                let wrong = if suffix.ends_with('x') { "y" } else { "x" };
                let keep = text.chars().count().saturating_sub(suffix.chars().count());
                let head: String = text.chars().take(keep).collect();
                cases.push(case(
                    schema,
                    format!("string not ending with \"{}\"", suffix),
                    Value::String(format!("{}{}", head, wrong)),
                ));
            }
        }

        cases.push(case(schema, "not a string", Value::from(123i64)));
        Ok(cases)
    }
}

/// Longest string worth synthesizing: the configured cap or `max`, whichever
/// is smaller.
fn length_cap(cs: &ConstraintSet, ctx: &GenContext) -> usize {
    let cap = ctx.options.max_synth_length;
    cs.max_length().map_or(cap, |max| max.min(cap))
}

/// Midpoint of `[min, min(max, cap)]`, never below `min`.
fn plain_length(cs: &ConstraintSet, ctx: &GenContext) -> usize {
    let min = cs.min_length();
    let high = length_cap(cs, ctx).max(min);
    (min + high) / 2
}

/// `prefix + filler + suffix`, with the filler sized so the whole string has
/// `length` characters when the affixes fit.
fn with_affixes(cs: &ConstraintSet, length: usize, ctx: &mut GenContext) -> String {
    let prefix = cs.starts_with.as_deref().unwrap_or_default();
    let suffix = cs.ends_with.as_deref().unwrap_or_default();
    let filler = ctx.rng.lowercase(length.saturating_sub(affix_len(cs)));
    format!("{}{}{}", prefix, filler, suffix)
}

fn affix_len(cs: &ConstraintSet) -> usize {
    let prefix = cs.starts_with.as_deref().unwrap_or_default();
    let suffix = cs.ends_with.as_deref().unwrap_or_default();
    prefix.chars().count() + suffix.chars().count()
}

fn format_label(format: StringFormat) -> &'static str {
    match format {
        StringFormat::Url => "URL",
        StringFormat::Uuid => "UUID",
        StringFormat::Ip => "IP",
        id if id.is_id_like() => "ID",
        other => other.name(),
    }
}

fn format_example(format: StringFormat, ctx: &mut GenContext) -> String {
    match format {
        StringFormat::Email => ctx.rng.email(),
        StringFormat::Url => ctx.rng.url(),
        StringFormat::Uuid => ctx.rng.uuid(),
        StringFormat::Emoji => ctx.rng.emoji(),
        StringFormat::Ip => ctx.rng.ip(),
        StringFormat::Cuid | StringFormat::Cuid2 | StringFormat::Ulid | StringFormat::Nanoid => {
            ctx.rng.id(format)
        }
        calendar => calendar_boundaries(calendar, ctx.now)
            .into_iter()
            .next()
            .map(|(_, text)| text)
            .unwrap_or_default(),
    }
}

fn known_bad(format: StringFormat) -> &'static str {
    match format {
        StringFormat::Email => "not-an-email",
        StringFormat::Url => "not-a-url",
        StringFormat::Uuid => "not-a-uuid",
        StringFormat::Emoji => "not-an-emoji",
        StringFormat::Cuid | StringFormat::Cuid2 | StringFormat::Ulid | StringFormat::Nanoid => {
            "invalid-id"
        }
        StringFormat::Ip => "999.999.999.999",
        StringFormat::Datetime => "not-a-datetime",
        StringFormat::Date => "not-a-date",
        StringFormat::Time => "not-a-time",
    }
}

/// Current instant, first and last moment of the year, and a sub-second
/// value (a leap day for plain dates, which carry no time).
fn calendar_boundaries(format: StringFormat, now: DateTime<Utc>) -> Vec<(String, String)> {
    let today = now.date_naive();
    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let year_end = NaiveDate::from_ymd_opt(today.year(), 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|dt| dt.and_utc());
    let sub_second = now.with_nanosecond(123_000_000);

    let render = |instant: DateTime<Utc>| match format {
        StringFormat::Date => instant.format("%Y-%m-%d").to_string(),
        StringFormat::Time => instant.format("%H:%M:%S").to_string(),
        _ => instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    };
    let name = format.name();

    let mut cases = vec![(format!("valid {} (current instant)", name), render(now))];
    if let Some(start) = year_start {
        cases.push((format!("valid {} (start of year)", name), render(start)));
    }
    if let Some(end) = year_end {
        cases.push((format!("valid {} (end of year)", name), render(end)));
    }
    match format {
        StringFormat::Date => cases.push((
            format!("valid {} (leap day)", name),
            "2024-02-29".to_string(),
        )),
        StringFormat::Time => {
            if let Some(instant) = sub_second {
                cases.push((
                    format!("valid {} (sub-second precision)", name),
                    instant.format("%H:%M:%S%.3f").to_string(),
                ));
            }
        }
        _ => {
            if let Some(instant) = sub_second {
                cases.push((
                    format!("valid {} (sub-second precision)", name),
                    render(instant),
                ));
            }
        }
    }
    cases
}
