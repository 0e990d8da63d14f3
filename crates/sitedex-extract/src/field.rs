//! A configured, typed field and the extractor bound to it.

use sitedex_types::{FieldType, Value};

use crate::extractor::Extractor;

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub multivalued: bool,
    pub extractor: Extractor,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        required: bool,
        multivalued: bool,
        extractor: Extractor,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            multivalued,
            extractor,
        }
    }

    /// The value substituted when this field is required but its extractor
    /// signals no-value: the type's zero, or an empty list if multivalued.
    pub fn zero_value(&self) -> Value {
        if self.multivalued {
            Value::Multi(Vec::new())
        } else {
            Value::zero(self.field_type)
        }
    }
}
