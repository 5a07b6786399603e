//! Object schemas: an ordered field list plus an unknown-key policy.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Schema;

/// How an object treats keys that are not part of its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Accept and drop extra keys.
    #[default]
    Strip,
    /// Reject extra keys.
    Strict,
}

/// An object-shaped schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    /// Fields in declaration order.
    #[serde(with = "ordered_shape")]
    pub shape: Vec<(String, Schema)>,
    #[serde(default)]
    pub unknown_keys: UnknownKeys,
}

impl ObjectSchema {
    pub fn new<I, K, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        Self {
            shape: fields
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
            unknown_keys: UnknownKeys::Strip,
        }
    }

    /// Reject unknown keys.
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strict;
        self
    }

    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.shape.iter().find(|(k, _)| k == name).map(|(_, s)| s)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.shape.iter().map(|(k, s)| (k.as_str(), s))
    }
}

/// Serde adapter keeping `shape` in document order.
///
/// A JSON object deserialized through `MapAccess` yields entries in the order
/// they appear in the source, which a map type would lose.
mod ordered_shape {
    use super::*;

    pub fn serialize<S: Serializer>(
        shape: &[(String, Schema)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(shape.len()))?;
        for (name, schema) in shape {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, Schema)>, D::Error> {
        deserializer.deserialize_map(ShapeVisitor)
    }

    struct ShapeVisitor;

    impl<'de> Visitor<'de> for ShapeVisitor {
        type Value = Vec<(String, Schema)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of field names to schemas")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut shape = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, schema)) = access.next_entry::<String, Schema>()? {
                if shape.iter().any(|(existing, _): &(String, Schema)| *existing == name) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate field `{}` in object shape",
                        name
                    )));
                }
                shape.push((name, schema));
            }
            Ok(shape)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_shape_preserves_document_order() {
        let object: ObjectSchema = serde_json::from_str(
            r#"{"shape": {"zeta": {"type": "boolean"}, "alpha": {"type": "boolean"}, "mid": {"type": "boolean"}}}"#,
        )
        .unwrap();

        let names: Vec<&str> = object.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(object.unknown_keys, UnknownKeys::Strip);
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let result: Result<ObjectSchema, _> = serde_json::from_str(
            r#"{"shape": {"a": {"type": "boolean"}, "a": {"type": "boolean"}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_round_trips() {
        let object = ObjectSchema::new([("flag", Schema::boolean())]).strict();
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["unknownKeys"], json!("strict"));
        assert_eq!(json["shape"]["flag"]["type"], json!("boolean"));
    }
}
