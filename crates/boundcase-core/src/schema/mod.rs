//! The schema model consumed by the generators.
//!
//! A [`Schema`] is a closed tree of nodes: primitives carrying ordered check
//! lists, objects with an ordered shape, the `optional`/`nullable` wrappers and
//! the date/time window domains. Schema files are JSON documents tagged by
//! `type`:
//!
//! ```json
//! {"type": "object", "shape": {
//!     "name": {"type": "string", "checks": [{"kind": "min", "value": 2}]},
//!     "age": {"type": "optional", "inner": {"type": "number"}}
//! }}
//! ```

mod checks;
mod formats;
mod object;
mod validate;
mod window;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

pub use checks::{NumberCheck, Pattern, StringCheck, StringFormat};
pub use object::{ObjectSchema, UnknownKeys};
pub use validate::{Issue, ValidationError};
pub(crate) use validate::{decimals, is_multiple_of};
pub use window::{DateWindow, Direction, TimeWindow};

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A schema node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    String(StringSchema),
    Number(NumberSchema),
    Boolean,
    Enum(EnumSchema),
    Object(ObjectSchema),
    Optional { inner: Box<Schema> },
    Nullable { inner: Box<Schema> },
    DateWindow(DateWindow),
    TimeWindow(TimeWindow),
    /// A kind this crate cannot generate for (arrays, unions, ...).
    Unsupported { kind: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StringSchema {
    #[serde(default)]
    pub checks: Vec<StringCheck>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NumberSchema {
    #[serde(default)]
    pub checks: Vec<NumberCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumSchema {
    pub values: Vec<String>,
}

/// Discriminant of a [`Schema`] node, used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Enum,
    Object,
    Optional,
    Nullable,
    DateWindow,
    TimeWindow,
    Unsupported,
}

impl SchemaKind {
    pub fn name(self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Enum => "enum",
            SchemaKind::Object => "object",
            SchemaKind::Optional => "optional",
            SchemaKind::Nullable => "nullable",
            SchemaKind::DateWindow => "date_window",
            SchemaKind::TimeWindow => "time_window",
            SchemaKind::Unsupported => "unsupported",
        }
    }
}

impl Schema {
    /// Parse a schema document.
    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn string() -> StringSchema {
        StringSchema::default()
    }

    pub fn number() -> NumberSchema {
        NumberSchema::default()
    }

    pub fn boolean() -> Schema {
        Schema::Boolean
    }

    pub fn enumeration<I, S>(values: I) -> Schema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Enum(EnumSchema {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn object<I, K, S>(fields: I) -> ObjectSchema
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        ObjectSchema::new(fields)
    }

    pub fn unsupported(kind: impl Into<String>) -> Schema {
        Schema::Unsupported { kind: kind.into() }
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::String(_) => SchemaKind::String,
            Schema::Number(_) => SchemaKind::Number,
            Schema::Boolean => SchemaKind::Boolean,
            Schema::Enum(_) => SchemaKind::Enum,
            Schema::Object(_) => SchemaKind::Object,
            Schema::Optional { .. } => SchemaKind::Optional,
            Schema::Nullable { .. } => SchemaKind::Nullable,
            Schema::DateWindow(_) => SchemaKind::DateWindow,
            Schema::TimeWindow(_) => SchemaKind::TimeWindow,
            Schema::Unsupported { .. } => SchemaKind::Unsupported,
        }
    }

    /// Kind name for diagnostics. Unsupported nodes report their own kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Schema::Unsupported { kind } => kind,
            other => other.kind().name(),
        }
    }

    /// The first node below any stack of `optional`/`nullable` wrappers.
    pub fn unwrap_modifiers(&self) -> &Schema {
        let mut current = self;
        while let Schema::Optional { inner } | Schema::Nullable { inner } = current {
            current = inner.as_ref();
        }
        current
    }

    /// True when any wrapper in the modifier stack is `optional`.
    pub fn is_optional(&self) -> bool {
        self.wrappers().any(|s| matches!(s, Schema::Optional { .. }))
    }

    /// True when any wrapper in the modifier stack is `nullable`.
    pub fn is_nullable(&self) -> bool {
        self.wrappers().any(|s| matches!(s, Schema::Nullable { .. }))
    }

    fn wrappers(&self) -> impl Iterator<Item = &Schema> {
        std::iter::successors(Some(self), |s| match s {
            Schema::Optional { inner } | Schema::Nullable { inner } => Some(inner.as_ref()),
            _ => None,
        })
    }
}

/// Wrapping builders for anything convertible into a [`Schema`].
pub trait IntoSchema: Into<Schema> + Sized {
    fn optional(self) -> Schema {
        Schema::Optional {
            inner: Box::new(self.into()),
        }
    }

    fn nullable(self) -> Schema {
        Schema::Nullable {
            inner: Box::new(self.into()),
        }
    }
}

impl<T: Into<Schema>> IntoSchema for T {}

// ---------------------------------------------------------------------------
// Primitive builders
// ---------------------------------------------------------------------------

impl StringSchema {
    fn check(mut self, check: StringCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn min(self, value: usize) -> Self {
        self.check(StringCheck::Min { value })
    }

    pub fn max(self, value: usize) -> Self {
        self.check(StringCheck::Max { value })
    }

    pub fn length(self, value: usize) -> Self {
        self.check(StringCheck::Length { value })
    }

    pub fn format(self, format: StringFormat) -> Self {
        self.check(format.into())
    }

    pub fn email(self) -> Self {
        self.format(StringFormat::Email)
    }

    pub fn url(self) -> Self {
        self.format(StringFormat::Url)
    }

    pub fn uuid(self) -> Self {
        self.format(StringFormat::Uuid)
    }

    pub fn emoji(self) -> Self {
        self.format(StringFormat::Emoji)
    }

    pub fn ip(self) -> Self {
        self.format(StringFormat::Ip)
    }

    pub fn datetime(self) -> Self {
        self.format(StringFormat::Datetime)
    }

    pub fn date(self) -> Self {
        self.format(StringFormat::Date)
    }

    pub fn time(self) -> Self {
        self.format(StringFormat::Time)
    }

    pub fn regex(self, pattern: Pattern) -> Self {
        self.check(StringCheck::Regex { pattern })
    }

    pub fn starts_with(self, value: impl Into<String>) -> Self {
        self.check(StringCheck::StartsWith {
            value: value.into(),
        })
    }

    pub fn ends_with(self, value: impl Into<String>) -> Self {
        self.check(StringCheck::EndsWith {
            value: value.into(),
        })
    }
}

impl NumberSchema {
    fn check(mut self, check: NumberCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn min(self, value: f64) -> Self {
        self.check(NumberCheck::Min { value })
    }

    pub fn max(self, value: f64) -> Self {
        self.check(NumberCheck::Max { value })
    }

    pub fn int(self) -> Self {
        self.check(NumberCheck::Int)
    }

    pub fn finite(self) -> Self {
        self.check(NumberCheck::Finite)
    }

    pub fn multiple_of(self, value: f64) -> Self {
        self.check(NumberCheck::MultipleOf { value })
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        Schema::String(schema)
    }
}

impl From<NumberSchema> for Schema {
    fn from(schema: NumberSchema) -> Self {
        Schema::Number(schema)
    }
}

impl From<EnumSchema> for Schema {
    fn from(schema: EnumSchema) -> Self {
        Schema::Enum(schema)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

impl From<DateWindow> for Schema {
    fn from(window: DateWindow) -> Self {
        Schema::DateWindow(window)
    }
}

impl From<TimeWindow> for Schema {
    fn from(window: TimeWindow) -> Self {
        Schema::TimeWindow(window)
    }
}
