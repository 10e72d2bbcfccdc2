use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ToMapping;

pub const TYPE_NAME: &str = "K8sIoApimachineryPkgUtilIntstrIntOrString";

/// Kubernetes `IntOrString`: a bare JSON number or a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i32),
    String(String),
}

impl IntOrString {
    /// Integer value. The string form counts only when it is bare ASCII digits.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(i64::from(*n)),
            Self::String(s) => {
                let s = s.trim();
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                s.parse().ok()
            }
        }
    }
}

impl From<i32> for IntOrString {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for IntOrString {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for IntOrString {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl ToMapping for IntOrString {
    fn to_mapping(&self) -> Value {
        match self {
            Self::Int(n) => Value::from(*n),
            Self::String(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decodes_either_form() {
        let n: IntOrString = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(n, IntOrString::Int(4));
        let s: IntOrString = serde_json::from_value(json!("auto")).unwrap();
        assert_eq!(s, IntOrString::from("auto"));
    }

    #[test]
    fn test_as_int() {
        assert_eq!(IntOrString::from(8).as_int(), Some(8));
        assert_eq!(IntOrString::from(" 2 ").as_int(), Some(2));
        assert_eq!(IntOrString::from("gpu").as_int(), None);
        assert_eq!(IntOrString::from("+3").as_int(), None);
        assert_eq!(IntOrString::from("-2").as_int(), None);
        assert_eq!(IntOrString::from("").as_int(), None);
    }

    #[test]
    fn test_mapping_is_a_bare_scalar() {
        assert_eq!(IntOrString::from(3).to_mapping(), json!(3));
        assert_eq!(IntOrString::from("cpu").to_mapping(), json!("cpu"));
    }
}
