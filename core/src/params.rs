//! Per-call parameter sets.
//!
//! # Design
//! `Params` is an insertion-ordered list rather than a hash map: optional
//! parameters are emitted in the order the caller supplied them, and callers
//! match the resulting URLs byte-for-byte in fixtures. Re-setting a name
//! keeps its original position.

use serde_json::Value;

use crate::error::ValidationError;

/// A single parameter value. The remote service only sees its path-segment
/// form (see `to_segment`).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    /// Whether the value counts as "present" for a required parameter.
    /// Empty text, zero, NaN and `false` do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::Text(s) => !s.is_empty(),
            ParamValue::Integer(n) => *n != 0,
            ParamValue::Float(f) => *f != 0.0 && !f.is_nan(),
            ParamValue::Bool(b) => *b,
        }
    }

    /// Path-segment form: text has spaces replaced by `_` and is lowercased,
    /// everything else uses its literal decimal or boolean form.
    pub fn to_segment(&self) -> String {
        match self {
            ParamValue::Text(s) => url_safe(s),
            ParamValue::Integer(n) => n.to_string(),
            ParamValue::Float(f) => format_float(*f),
            ParamValue::Bool(b) => b.to_string(),
        }
    }

    fn from_json(name: &str, value: &Value) -> Result<Option<Self>, ValidationError> {
        let converted = match value {
            Value::Null => return Ok(None),
            Value::Bool(b) => ParamValue::Bool(*b),
            Value::String(s) => ParamValue::Text(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Integer(i),
                None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::Array(_) | Value::Object(_) => {
                return Err(ValidationError::UnsupportedValue(name.to_string()))
            }
        };
        Ok(Some(converted))
    }
}

/// Spaces become underscores, then the whole string is lowercased. No
/// percent-encoding is applied.
pub fn url_safe(value: &str) -> String {
    value.replace(' ', "_").to_lowercase()
}

// Integral floats print without a fractional part (`1.0` -> `1`); magnitudes
// of at least 1e21 or below 1e-6 use exponent form (`1e+21`, `1.5e-7`).
fn format_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if f == f64::INFINITY {
        return "Infinity".to_string();
    }
    if f == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }
    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{f:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    f.to_string()
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Named arguments for one operation call, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a parameter. A replaced parameter keeps its slot.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert a loosely-typed JSON value.
    ///
    /// Only objects (and `null`, read as "no parameters") are accepted.
    /// `null` members are dropped; arrays and nested objects are rejected.
    /// Member order is kept as written.
    ///
    /// A top-level `null` behaves like `{}`: operations without required
    /// parameters succeed and the others report their first required
    /// parameter as missing. This is looser than strict object handling,
    /// where a `null` set fails even for operations that need no parameters.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::new()),
            _ => return Err(ValidationError::NotAnObject),
        };
        let mut params = Self::new();
        for (name, raw) in map {
            if let Some(value) = ParamValue::from_json(name, raw)? {
                params.set(name.as_str(), value);
            }
        }
        Ok(params)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_loose_semantics() {
        assert!(ParamValue::from("apple").is_truthy());
        assert!(!ParamValue::from("").is_truthy());
        assert!(ParamValue::from(1).is_truthy());
        assert!(!ParamValue::from(0).is_truthy());
        assert!(!ParamValue::from(0.0).is_truthy());
        assert!(!ParamValue::from(f64::NAN).is_truthy());
        assert!(ParamValue::from(-0.5).is_truthy());
        assert!(ParamValue::from(true).is_truthy());
        assert!(!ParamValue::from(false).is_truthy());
    }

    #[test]
    fn text_segments_replace_spaces_and_lowercase() {
        assert_eq!(ParamValue::from("auf Wiederschauen").to_segment(), "auf_wiederschauen");
        assert_eq!(ParamValue::from("New  York").to_segment(), "new__york");
        assert_eq!(ParamValue::from("Ärger").to_segment(), "ärger");
    }

    #[test]
    fn non_text_segments_use_literal_form() {
        assert_eq!(ParamValue::from(20).to_segment(), "20");
        assert_eq!(ParamValue::from(-3).to_segment(), "-3");
        assert_eq!(ParamValue::from(1.0).to_segment(), "1");
        assert_eq!(ParamValue::from(2.5).to_segment(), "2.5");
        assert_eq!(ParamValue::from(-0.0).to_segment(), "0");
        assert_eq!(ParamValue::from(f64::INFINITY).to_segment(), "Infinity");
        assert_eq!(ParamValue::from(f64::NAN).to_segment(), "NaN");
        assert_eq!(ParamValue::from(true).to_segment(), "true");
        assert_eq!(ParamValue::from(false).to_segment(), "false");
    }

    #[test]
    fn extreme_floats_use_exponent_form() {
        assert_eq!(ParamValue::from(1e21).to_segment(), "1e+21");
        assert_eq!(ParamValue::from(-1.5e22).to_segment(), "-1.5e+22");
        assert_eq!(ParamValue::from(1e-7).to_segment(), "1e-7");
        assert_eq!(ParamValue::from(2.5e-8).to_segment(), "2.5e-8");
        assert_eq!(ParamValue::from(1e20).to_segment(), "100000000000000000000");
        assert_eq!(ParamValue::from(0.000001).to_segment(), "0.000001");
    }

    #[test]
    fn set_replaces_in_place() {
        let params = Params::new()
            .with("word", "apple")
            .with("language", "en")
            .with("word", "pear");
        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["word", "language"]);
        assert_eq!(params.get("word"), Some(&ParamValue::from("pear")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn from_array_keeps_order() {
        let params = Params::from([("limit", 5), ("page", 2)]);
        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["limit", "page"]);
    }

    #[test]
    fn from_json_keeps_member_order() {
        let params = Params::from_json(&json!({"zeta": 1, "alpha": "a", "mid": true})).unwrap();
        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(params.get("zeta"), Some(&ParamValue::Integer(1)));
        assert_eq!(params.get("mid"), Some(&ParamValue::Bool(true)));
    }

    #[test]
    fn from_json_reads_floats() {
        let params = Params::from_json(&json!({"rate": 2.5})).unwrap();
        assert_eq!(params.get("rate"), Some(&ParamValue::Float(2.5)));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        for value in [json!("sadas"), json!(3), json!(true), json!(["word"])] {
            assert_eq!(Params::from_json(&value), Err(ValidationError::NotAnObject));
        }
    }

    #[test]
    fn from_json_null_is_empty() {
        assert!(Params::from_json(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn from_json_drops_null_members() {
        let params = Params::from_json(&json!({"word": null, "language": "de"})).unwrap();
        assert!(!params.contains("word"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn from_json_rejects_nested_values() {
        let err = Params::from_json(&json!({"word": "apple", "tags": ["a"]})).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedValue("tags".into()));
    }
}
