//! Constraint checks attached to primitive schema nodes.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A compiled regular expression usable as a string check.
///
/// Matching is unanchored; anchor the pattern with `^`/`$` to constrain the
/// whole string.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.0.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Well-known string format tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFormat {
    Email,
    Url,
    Uuid,
    Emoji,
    Cuid,
    Cuid2,
    Ulid,
    Nanoid,
    Ip,
    Datetime,
    Date,
    Time,
}

impl StringFormat {
    /// Opaque identifier formats that share one invalid example.
    pub fn is_id_like(self) -> bool {
        matches!(
            self,
            StringFormat::Cuid | StringFormat::Cuid2 | StringFormat::Ulid | StringFormat::Nanoid
        )
    }

    /// Calendar formats that get boundary instants and malformed variants.
    pub fn is_calendar(self) -> bool {
        matches!(
            self,
            StringFormat::Datetime | StringFormat::Date | StringFormat::Time
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Url => "url",
            StringFormat::Uuid => "uuid",
            StringFormat::Emoji => "emoji",
            StringFormat::Cuid => "cuid",
            StringFormat::Cuid2 => "cuid2",
            StringFormat::Ulid => "ulid",
            StringFormat::Nanoid => "nanoid",
            StringFormat::Ip => "ip",
            StringFormat::Datetime => "datetime",
            StringFormat::Date => "date",
            StringFormat::Time => "time",
        }
    }
}

/// One check on a string schema, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StringCheck {
    Min { value: usize },
    Max { value: usize },
    Length { value: usize },
    Email,
    Url,
    Uuid,
    Emoji,
    Cuid,
    Cuid2,
    Ulid,
    Nanoid,
    Ip,
    Datetime,
    Date,
    Time,
    Regex { pattern: Pattern },
    StartsWith { value: String },
    EndsWith { value: String },
    /// Any check kind this crate does not understand. Ignored.
    #[serde(other)]
    Unknown,
}

impl StringCheck {
    pub fn format(&self) -> Option<StringFormat> {
        Some(match self {
            StringCheck::Email => StringFormat::Email,
            StringCheck::Url => StringFormat::Url,
            StringCheck::Uuid => StringFormat::Uuid,
            StringCheck::Emoji => StringFormat::Emoji,
            StringCheck::Cuid => StringFormat::Cuid,
            StringCheck::Cuid2 => StringFormat::Cuid2,
            StringCheck::Ulid => StringFormat::Ulid,
            StringCheck::Nanoid => StringFormat::Nanoid,
            StringCheck::Ip => StringFormat::Ip,
            StringCheck::Datetime => StringFormat::Datetime,
            StringCheck::Date => StringFormat::Date,
            StringCheck::Time => StringFormat::Time,
            _ => return None,
        })
    }

    fn from_format(format: StringFormat) -> Self {
        match format {
            StringFormat::Email => StringCheck::Email,
            StringFormat::Url => StringCheck::Url,
            StringFormat::Uuid => StringCheck::Uuid,
            StringFormat::Emoji => StringCheck::Emoji,
            StringFormat::Cuid => StringCheck::Cuid,
            StringFormat::Cuid2 => StringCheck::Cuid2,
            StringFormat::Ulid => StringCheck::Ulid,
            StringFormat::Nanoid => StringCheck::Nanoid,
            StringFormat::Ip => StringCheck::Ip,
            StringFormat::Datetime => StringCheck::Datetime,
            StringFormat::Date => StringCheck::Date,
            StringFormat::Time => StringCheck::Time,
        }
    }
}

impl From<StringFormat> for StringCheck {
    fn from(format: StringFormat) -> Self {
        StringCheck::from_format(format)
    }
}

/// One check on a number schema, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NumberCheck {
    Min { value: f64 },
    Max { value: f64 },
    Int,
    Finite,
    MultipleOf { value: f64 },
    #[serde(other)]
    Unknown,
}
