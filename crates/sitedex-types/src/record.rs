use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};

use crate::Value;

/// One output document: a name -> value map whose keys are field names.
/// Iteration order follows insertion order (config order); a `BTreeMap`
/// would lose that order by name-sorting, so we keep plain
/// insertion-ordered `Vec` pairs instead.
#[derive(Debug, Clone, Default)]
pub struct IndexRecord {
    fields: Vec<(String, Value)>,
}

impl IndexRecord {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Serialize to the JSON object the index client submits, with
    /// timestamps encoded as UTC ISO-8601 with microseconds and `Z`.
    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value_to_json(value));
        }
        Json::Object(map)
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Text(s) => Json::String(s.clone()),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(i) => Json::Number((*i).into()),
        Value::Timestamp(dt) => Json::String(sitedex_util::time::to_iso_datetime(dt)),
        Value::Multi(items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}

/// A stable, name-sorted view used only for equality assertions in tests.
#[cfg(test)]
pub fn sorted_pairs(record: &IndexRecord) -> BTreeMap<String, Json> {
    record
        .iter()
        .map(|(n, v)| (n.clone(), value_to_json(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn preserves_insertion_order() {
        let mut rec = IndexRecord::new();
        rec.insert("b", Value::Text("2".into()));
        rec.insert("a", Value::Text("1".into()));
        let names: Vec<_> = rec.field_names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn timestamp_serializes_with_micros_and_z() {
        let mut rec = IndexRecord::new();
        let dt = Utc.with_ymd_and_hms(2014, 12, 31, 15, 45, 30).unwrap();
        rec.insert("modified", Value::Timestamp(dt));
        let json = rec.to_json();
        assert_eq!(
            json["modified"].as_str().unwrap(),
            "2014-12-31T15:45:30.000000Z"
        );
    }
}
