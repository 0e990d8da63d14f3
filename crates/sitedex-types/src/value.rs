use chrono::{DateTime, Utc};
use serde::Serialize;

/// The declared value type of a [`crate::Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Boolean,
    Integer,
    Timestamp,
}

/// A value produced by an extractor. Single-valued or multivalued fields
/// both flow through here; `Multi` elements must each match the field's
/// declared [`FieldType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Boolean(bool),
    Integer(i64),
    Timestamp(DateTime<Utc>),
    Multi(Vec<Value>),
}

impl Value {
    /// The type's zero value, used to fill required fields when the bound
    /// extractor signals no-value.
    pub fn zero(ty: FieldType) -> Self {
        match ty {
            FieldType::Text => Value::Text(String::new()),
            FieldType::Boolean => Value::Boolean(false),
            FieldType::Integer => Value::Integer(0),
            FieldType::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    /// Whether this value (recursively, for `Multi`) matches `ty`.
    pub fn matches_type(&self, ty: FieldType) -> bool {
        match self {
            Value::Text(_) => matches!(ty, FieldType::Text),
            Value::Boolean(_) => matches!(ty, FieldType::Boolean),
            Value::Integer(_) => matches!(ty, FieldType::Integer),
            Value::Timestamp(_) => matches!(ty, FieldType::Timestamp),
            Value::Multi(items) => items.iter().all(|v| v.matches_type(ty)),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_by_type() {
        assert_eq!(Value::zero(FieldType::Text), Value::Text(String::new()));
        assert_eq!(Value::zero(FieldType::Boolean), Value::Boolean(false));
        assert_eq!(Value::zero(FieldType::Integer), Value::Integer(0));
        assert_eq!(
            Value::zero(FieldType::Timestamp),
            Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH)
        );
    }

    #[test]
    fn multivalued_requires_every_element_to_match() {
        let v = Value::Multi(vec![Value::Text("a".into()), Value::Text("b".into())]);
        assert!(v.matches_type(FieldType::Text));

        let mixed = Value::Multi(vec![Value::Text("a".into()), Value::Integer(1)]);
        assert!(!mixed.matches_type(FieldType::Text));
    }
}
