//! Drives the configured fields through their extractors in config order,
//! producing one [`IndexRecord`].

use sitedex_types::{CrawlError, IndexRecord, ResourceInfo};

use crate::field::Field;
use crate::lookup::FieldLookup;

/// Runs every field's extractor against `resource_info`, in the order
/// given, and assembles the resulting record.
pub fn extract_record(
    fields: &[Field],
    resource_info: &ResourceInfo,
    lookup: &dyn FieldLookup,
) -> Result<IndexRecord, CrawlError> {
    let mut record = IndexRecord::new();
    for field in fields {
        if let Some(value) = run_field(field, resource_info, lookup)? {
            record.insert(field.name.clone(), value);
        }
    }
    Ok(record)
}

/// Runs one field's extractor and applies the zero-substitution / omission
/// / type-check rules. Returns `None` when the field is absent from the
/// output (optional field, no-value signaled).
pub fn run_field(
    field: &Field,
    resource_info: &ResourceInfo,
    lookup: &dyn FieldLookup,
) -> Result<Option<sitedex_types::Value>, CrawlError> {
    let signal = field.extractor.extract_value(resource_info, lookup)?;

    let value = match signal {
        None if field.required => field.zero_value(),
        None => return Ok(None),
        Some(value) => value,
    };

    if !value.matches_type(field.field_type) {
        return Err(CrawlError::ExtractionError {
            field: field.name.clone(),
            detail: format!("value does not match declared type {:?}", field.field_type),
        });
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Extractor;
    use crate::lookup::NoLookup;
    use sitedex_types::{FieldType, Site, UrlInfo, Value};
    use std::sync::Arc;

    fn resource() -> ResourceInfo {
        let site = Arc::new(Site::new("http://ex.org"));
        ResourceInfo::new(site, UrlInfo::new("http://ex.org/a"))
    }

    #[test]
    fn required_field_gets_zero_value_on_no_value() {
        let field = Field::new("description", FieldType::Text, true, false, Extractor::Description);
        let value = run_field(&field, &resource(), &NoLookup).unwrap();
        assert_eq!(value, Some(Value::Text(String::new())));
    }

    #[test]
    fn optional_field_is_omitted_on_no_value() {
        let field = Field::new("description", FieldType::Text, false, false, Extractor::Description);
        let value = run_field(&field, &resource(), &NoLookup).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn type_mismatch_raises_extraction_error() {
        let field = Field::new(
            "title",
            FieldType::Integer,
            true,
            false,
            Extractor::Constant(Value::Text("x".to_string())),
        );
        let err = run_field(&field, &resource(), &NoLookup).unwrap_err();
        assert!(matches!(err, CrawlError::ExtractionError { .. }));
    }

    #[test]
    fn record_preserves_config_order() {
        let fields = vec![
            Field::new("b", FieldType::Text, true, false, Extractor::Url),
            Field::new("a", FieldType::Text, true, false, Extractor::Uid),
        ];
        let record = extract_record(&fields, &resource(), &NoLookup).unwrap();
        let names: Vec<_> = record.field_names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
