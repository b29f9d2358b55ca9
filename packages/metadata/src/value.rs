use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// A loosely typed metadata value.
///
/// Values are never validated: the only two questions ever asked of a value are "is it truthy?" and "what
/// string does it become once assigned as the `content` of a `<meta>` element?".
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum MetaValue {
    /// A key that is present but carries no value.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<MetaValue>),
    Object(BTreeMap<String, MetaValue>),
    /// A host object kept only as the string it turns into when assigned. It stays truthy even when that
    /// string is empty.
    Stringified(String),
}

impl MetaValue {
    /// Returns `false` for `undefined`, `null`, `false`, `0`, `-0`, `NaN` and the empty string.
    ///
    /// Falsy values clear the tag they are keyed by. Every other value, including empty arrays and objects,
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            MetaValue::Undefined | MetaValue::Null => false,
            MetaValue::Bool(value) => *value,
            MetaValue::Number(value) => *value != 0.0 && !value.is_nan(),
            MetaValue::String(value) => !value.is_empty(),
            MetaValue::Array(_) | MetaValue::Object(_) | MetaValue::Stringified(_) => true,
        }
    }

    /// The string this value becomes when it is assigned to a `content` attribute.
    pub fn to_content(&self) -> String {
        match self {
            MetaValue::Undefined => "undefined".to_string(),
            MetaValue::Null => "null".to_string(),
            MetaValue::Bool(value) => value.to_string(),
            MetaValue::Number(value) => format_number(*value),
            MetaValue::String(value) | MetaValue::Stringified(value) => value.clone(),
            MetaValue::Array(items) => items
                .iter()
                .map(|item| match item {
                    MetaValue::Undefined | MetaValue::Null => String::new(),
                    item => item.to_content(),
                })
                .collect::<Vec<_>>()
                .join(","),
            MetaValue::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Borrow the string inside this value, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(value) => Some(value),
            _ => None,
        }
    }
}

// Number::prototype.toString
fn format_number(value: f64) -> String {
    ryu_js::Buffer::new().format(value).to_string()
}

impl From<serde_json::Value> for MetaValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => MetaValue::Null,
            serde_json::Value::Bool(value) => MetaValue::Bool(value),
            serde_json::Value::Number(number) => {
                MetaValue::Number(number.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(value) => MetaValue::String(value),
            serde_json::Value::Array(items) => {
                MetaValue::Array(items.into_iter().map(MetaValue::from).collect())
            }
            serde_json::Value::Object(entries) => MetaValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, MetaValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for MetaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetaValue::Undefined | MetaValue::Null => serializer.serialize_unit(),
            MetaValue::Bool(value) => serializer.serialize_bool(*value),
            MetaValue::Number(value) => serializer.serialize_f64(*value),
            MetaValue::String(value) | MetaValue::Stringified(value) => {
                serializer.serialize_str(value)
            }
            MetaValue::Array(items) => items.serialize(serializer),
            MetaValue::Object(entries) => entries.serialize(serializer),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::String(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Number(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        MetaValue::Number(value.into())
    }
}

impl<T: Into<MetaValue>> From<Option<T>> for MetaValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(MetaValue::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for value in [
            MetaValue::Undefined,
            MetaValue::Null,
            MetaValue::Bool(false),
            MetaValue::Number(0.0),
            MetaValue::Number(-0.0),
            MetaValue::Number(f64::NAN),
            MetaValue::String(String::new()),
        ] {
            assert!(!value.is_truthy(), "{value:?} should be falsy");
        }
    }

    #[test]
    fn truthy_values() {
        for value in [
            MetaValue::Bool(true),
            MetaValue::Number(-1.0),
            MetaValue::Number(f64::INFINITY),
            MetaValue::from("0"),
            MetaValue::from(" "),
            MetaValue::Array(Vec::new()),
            MetaValue::Object(BTreeMap::new()),
        ] {
            assert!(value.is_truthy(), "{value:?} should be truthy");
        }
    }

    #[test]
    fn content_coercion() {
        assert_eq!(MetaValue::from("Title").to_content(), "Title");
        assert_eq!(MetaValue::Number(1.0).to_content(), "1");
        assert_eq!(MetaValue::Number(1.5).to_content(), "1.5");
        assert_eq!(MetaValue::Number(-0.0).to_content(), "0");
        assert_eq!(MetaValue::Number(f64::NEG_INFINITY).to_content(), "-Infinity");
        assert_eq!(MetaValue::Bool(true).to_content(), "true");
        assert_eq!(
            MetaValue::from(json!(["a", null, 2, ["b", "c"]])).to_content(),
            "a,,2,b,c"
        );
        assert_eq!(
            MetaValue::from(json!({ "a": 1 })).to_content(),
            "[object Object]"
        );
    }

    #[test]
    fn numbers_switch_to_exponent_form_at_the_extremes() {
        assert_eq!(MetaValue::Number(1e21).to_content(), "1e+21");
        assert_eq!(MetaValue::Number(1.5e300).to_content(), "1.5e+300");
        assert_eq!(MetaValue::Number(-2e25).to_content(), "-2e+25");
        assert_eq!(MetaValue::Number(1e-7).to_content(), "1e-7");
        assert_eq!(MetaValue::Number(1.25e-10).to_content(), "1.25e-10");

        assert_eq!(MetaValue::Number(1e20).to_content(), "100000000000000000000");
        assert_eq!(MetaValue::Number(1e-6).to_content(), "0.000001");
        assert_eq!(MetaValue::Number(0.1 + 0.2).to_content(), "0.30000000000000004");
        assert_eq!(MetaValue::Number(f64::NAN).to_content(), "NaN");
    }

    #[test]
    fn stringified_objects_stay_truthy() {
        let empty = MetaValue::Stringified(String::new());
        assert!(empty.is_truthy());
        assert_eq!(empty.to_content(), "");

        let nested = MetaValue::Array(vec![MetaValue::from("a"), empty]);
        assert_eq!(nested.to_content(), "a,");
    }

    #[test]
    fn deserializes_through_json() {
        let value: MetaValue = serde_json::from_str(r#"{"nested": [1, "two"]}"#).unwrap();
        let MetaValue::Object(entries) = value else {
            panic!("expected an object");
        };
        assert_eq!(
            entries["nested"],
            MetaValue::Array(vec![MetaValue::Number(1.0), MetaValue::from("two")])
        );
    }
}
