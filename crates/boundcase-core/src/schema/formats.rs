//! Recognizers for the well-known string formats.

use std::net::IpAddr;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use super::StringFormat;

fn compile(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|e| panic!("invalid built-in pattern {source:?}: {e}"))
}

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$"));
static UUID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
});
static EMOJI: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\p{Extended_Pictographic}|\p{Emoji_Component})+$"));
static CUID: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^c[^\s-]{8,}$"));
static CUID2: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9a-z]+$"));
static ULID: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^[0-9A-HJKMNP-TV-Z]{26}$"));
static NANOID: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^[a-z0-9_-]{21}$"));
static DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})(\.\d+)?Z$")
});
static DATE: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\d{4})-(\d{2})-(\d{2})$"));
static TIME: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\d{2}):(\d{2}):(\d{2})(\.\d+)?$"));

/// Whether `text` is a well-formed instance of `format`.
pub(crate) fn matches(format: StringFormat, text: &str) -> bool {
    match format {
        StringFormat::Email => {
            EMAIL.is_match(text) && !text.starts_with('.') && !text.contains("..")
        }
        StringFormat::Url => url::Url::parse(text).is_ok(),
        StringFormat::Uuid => UUID.is_match(text),
        StringFormat::Emoji => EMOJI.is_match(text),
        StringFormat::Cuid => CUID.is_match(text),
        StringFormat::Cuid2 => CUID2.is_match(text),
        StringFormat::Ulid => ULID.is_match(text),
        StringFormat::Nanoid => NANOID.is_match(text),
        StringFormat::Ip => text.parse::<IpAddr>().is_ok(),
        StringFormat::Datetime => is_datetime(text),
        StringFormat::Date => is_date(text),
        StringFormat::Time => is_time(text),
    }
}

fn number(caps: &regex::Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn calendar_date(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let year = i32::try_from(number(caps, 1)?).ok()?;
    NaiveDate::from_ymd_opt(year, number(caps, 2)?, number(caps, 3)?)
}

fn clock_time(caps: &regex::Captures<'_>, first: usize) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(
        number(caps, first)?,
        number(caps, first + 1)?,
        number(caps, first + 2)?,
    )
}

fn is_datetime(text: &str) -> bool {
    DATETIME
        .captures(text)
        .is_some_and(|caps| calendar_date(&caps).is_some() && clock_time(&caps, 4).is_some())
}

fn is_date(text: &str) -> bool {
    DATE.captures(text)
        .is_some_and(|caps| calendar_date(&caps).is_some())
}

fn is_time(text: &str) -> bool {
    TIME.captures(text)
        .is_some_and(|caps| clock_time(&caps, 1).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(matches(StringFormat::Email, "ada.lovelace@example.com"));
        assert!(!matches(StringFormat::Email, "not-an-email"));
        assert!(!matches(StringFormat::Email, ".ada@example.com"));
        assert!(!matches(StringFormat::Email, "ada..l@example.com"));
    }

    #[test]
    fn test_ids_and_network() {
        assert!(matches(StringFormat::Uuid, "123e4567-e89b-42d3-a456-426614174000"));
        assert!(!matches(StringFormat::Uuid, "not-a-uuid"));
        assert!(matches(StringFormat::Url, "https://example.com/a?b=c"));
        assert!(!matches(StringFormat::Url, "not-a-url"));
        assert!(matches(StringFormat::Ip, "192.168.1.10"));
        assert!(matches(StringFormat::Ip, "::1"));
        assert!(!matches(StringFormat::Ip, "999.999.999.999"));
        for format in [
            StringFormat::Cuid,
            StringFormat::Cuid2,
            StringFormat::Ulid,
            StringFormat::Nanoid,
        ] {
            assert!(!matches(format, "invalid-id"), "{}", format.name());
        }
        assert!(matches(StringFormat::Ulid, "01ARZ3NDEKTSV4RRFFQ69G5FAV"));
    }

    #[test]
    fn test_emoji() {
        assert!(matches(StringFormat::Emoji, "🚀"));
        assert!(!matches(StringFormat::Emoji, "not-an-emoji"));
    }

    #[test]
    fn test_calendar_formats_check_ranges() {
        assert!(matches(StringFormat::Datetime, "2024-02-29T23:59:59.123Z"));
        assert!(!matches(StringFormat::Datetime, "2024-01-15T10:30:00"));
        assert!(!matches(StringFormat::Datetime, "2023-02-29T10:30:00Z"));
        assert!(!matches(StringFormat::Datetime, "2024-01-15T24:00:00Z"));

        assert!(matches(StringFormat::Date, "2024-01-15"));
        assert!(!matches(StringFormat::Date, "2024-13-01"));
        assert!(!matches(StringFormat::Date, "2024/01/15"));

        assert!(matches(StringFormat::Time, "23:59:59"));
        assert!(matches(StringFormat::Time, "10:30:45.500"));
        assert!(!matches(StringFormat::Time, "12:30:60"));
        assert!(!matches(StringFormat::Time, "12.30.00"));
    }
}
