use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::de::{self, DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::configuration::Configuration;
use crate::error::{ModelError, Result};

/// One declared field of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field name, also the key used by `ToMapping`.
    pub name: &'static str,
    /// Key used in the wire document.
    pub json_key: &'static str,
    /// Declared type, as named by the API schema.
    pub type_name: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, json_key: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            json_key,
            type_name,
        }
    }
}

// ── Mapping representation ──────────────────────────────────────────

/// Conversion into the plain mapping representation: objects, arrays and
/// primitives only, keyed by field name.
pub trait ToMapping {
    fn to_mapping(&self) -> Value;
}

macro_rules! scalar_to_mapping {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToMapping for $ty {
                fn to_mapping(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

scalar_to_mapping!(bool, i32, i64, u32, u64, f64, String);

impl ToMapping for str {
    fn to_mapping(&self) -> Value {
        Value::from(self)
    }
}

/// Already-plain data passes through unchanged.
impl ToMapping for Value {
    fn to_mapping(&self) -> Value {
        self.clone()
    }
}

impl<T: ToMapping> ToMapping for Option<T> {
    fn to_mapping(&self) -> Value {
        match self {
            Some(v) => v.to_mapping(),
            None => Value::Null,
        }
    }
}

impl<T: ToMapping> ToMapping for Vec<T> {
    fn to_mapping(&self) -> Value {
        Value::Array(self.iter().map(ToMapping::to_mapping).collect())
    }
}

impl<T: ToMapping> ToMapping for BTreeMap<String, T> {
    fn to_mapping(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_mapping()))
                .collect(),
        )
    }
}

impl<T: ToMapping> ToMapping for HashMap<String, T> {
    fn to_mapping(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_mapping()))
                .collect(),
        )
    }
}

/// Builds a mapping object from `(field name, value)` pairs.
pub(crate) fn mapping<const N: usize>(entries: [(&'static str, Value); N]) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    )
}

// ── Model contract ──────────────────────────────────────────────────

/// A schema-declared API object.
///
/// Implementors keep every field optional, expose plain accessor pairs and
/// carry the `Configuration` they were built with. Mapping, display and
/// equality never fail; only the wire codec and `validate` return errors.
pub trait Model: ToMapping + Serialize + DeserializeOwned + Any {
    /// Definition name in the API schema.
    const TYPE_NAME: &'static str;

    /// Declared fields, in declaration order.
    const FIELDS: &'static [FieldSpec];

    fn configuration(&self) -> &Arc<Configuration>;

    /// Attaches `configuration` to this model and every nested model.
    fn set_configuration(&mut self, configuration: Arc<Configuration>);

    /// Field name to declared type name.
    fn openapi_types() -> BTreeMap<&'static str, &'static str> {
        Self::FIELDS.iter().map(|f| (f.name, f.type_name)).collect()
    }

    /// Field name to wire key.
    fn attribute_map() -> BTreeMap<&'static str, &'static str> {
        Self::FIELDS.iter().map(|f| (f.name, f.json_key)).collect()
    }

    /// Pretty-printed mapping. Keys come out sorted, so the text is stable.
    fn to_display_string(&self) -> String {
        format!("{:#}", self.to_mapping())
    }

    /// True iff `other` is the same model type with an equal mapping.
    fn equals(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self.to_mapping() == other.to_mapping())
    }

    fn not_equals(&self, other: &dyn Any) -> bool {
        !self.equals(other)
    }

    /// Wire document: keyed by `json_key`, unset fields omitted.
    fn to_wire(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|source| ModelError::Encode {
            model: Self::TYPE_NAME,
            source,
        })
    }

    /// Decodes a wire document and attaches `configuration` throughout.
    ///
    /// Only JSON objects decode; arrays are not accepted as positional fields.
    fn from_wire(value: Value, configuration: Arc<Configuration>) -> Result<Self> {
        let decode_error = |source: serde_json::Error| ModelError::Decode {
            model: Self::TYPE_NAME,
            source,
        };
        if !value.is_object() {
            return Err(decode_error(de::Error::invalid_type(
                unexpected(&value),
                &"a JSON object",
            )));
        }
        let mut model: Self = serde_json::from_value(value).map_err(decode_error)?;
        model.set_configuration(configuration);
        tracing::debug!(model = Self::TYPE_NAME, "decoded wire document");
        Ok(model)
    }

    /// Client-side checks; a no-op unless the configuration enables them.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// `deserialize_with` for nested model fields: `null` or an object, never an array.
pub(crate) fn object_or_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(de::Error::custom),
        Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"a JSON object")),
    }
}

/// `PartialEq` through the mapping, plus `Display` through the display string.
macro_rules! mapping_eq_and_display {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::model::ToMapping::to_mapping(self)
                    == $crate::model::ToMapping::to_mapping(other)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::model::Model::to_display_string(self))
            }
        }
    };
}

pub(crate) use mapping_eq_and_display;
