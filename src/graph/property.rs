//! Property value types for graph nodes and edges
//!
//! Only numeric properties take part in ranking; everything else rides
//! along untouched when an edge is rewritten.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Property value type supporting multiple data types
///
/// Serialized untagged, so a JSON snapshot holds plain values:
/// `{"weight": 1.5, "name": "run"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<PropertyValue>),
    Map(HashMap<String, PropertyValue>),
    Null,
}

impl PropertyValue {
    /// Numeric value of an integer or float
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(arr: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(arr)
    }
}

/// Property map for storing node and edge properties
pub type PropertyMap = HashMap<String, PropertyValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_view() {
        assert_eq!(PropertyValue::Integer(3).as_number(), Some(3.0));
        assert_eq!(PropertyValue::Float(0.5).as_number(), Some(0.5));
        assert_eq!(PropertyValue::from("x").as_number(), None);
        assert_eq!(PropertyValue::Boolean(true).as_number(), None);
    }

    #[test]
    fn test_untagged_json() {
        let props: PropertyMap =
            serde_json::from_str(r#"{"count": 2, "weight": 1.5, "name": "run", "done": false, "note": null}"#).unwrap();

        assert_eq!(props["count"], PropertyValue::Integer(2));
        assert_eq!(props["weight"], PropertyValue::Float(1.5));
        assert_eq!(props["name"], PropertyValue::String("run".into()));
        assert_eq!(props["done"], PropertyValue::Boolean(false));
        assert_eq!(props["note"], PropertyValue::Null);
    }
}
