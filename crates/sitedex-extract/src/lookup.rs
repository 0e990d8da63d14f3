//! Cross-field lookups for extractors (chiefly [`crate::extractor::Extractor::FieldMapping`])
//! that need to read another field's raw extraction result.
//!
//! Fields do not hold an owning pointer back to their configuration — that
//! would make `sitedex-config` and `sitedex-extract` depend on each other.
//! Instead, the configuration implements this trait and is passed into
//! extraction at call time, so the lookup is a borrow, not an ownership
//! relation.

use sitedex_types::{CrawlError, ResourceInfo, Value};

pub trait FieldLookup {
    /// Runs the named field's extractor (not the full field-level engine —
    /// no zero-substitution, no type-check against the caller's field) and
    /// returns its raw signal: `Ok(None)` for no-value, `Ok(Some(v))` for a
    /// value, `Err` for an extraction or lookup failure.
    fn extract_raw(
        &self,
        field_name: &str,
        resource_info: &ResourceInfo,
    ) -> Result<Option<Value>, CrawlError>;
}

/// A [`FieldLookup`] with no peer fields, for extractors that run outside
/// of a full configuration (tests, or standalone extractor use).
pub struct NoLookup;

impl FieldLookup for NoLookup {
    fn extract_raw(
        &self,
        field_name: &str,
        _resource_info: &ResourceInfo,
    ) -> Result<Option<Value>, CrawlError> {
        Err(CrawlError::NoSuchField {
            name: field_name.to_string(),
        })
    }
}
