//! The closed set of extractor variants and their dispatch logic.

use std::collections::HashMap;

use chrono::Utc;

use sitedex_types::{CrawlError, ResourceInfo, Value};
use sitedex_util::content::{get_content_type, normalize_whitespace};

use crate::filename::filename_from_content_disposition;
use crate::lookup::FieldLookup;
use crate::slug::slug_for;
use crate::title;
use crate::uid::uid_for;

const XPATH_MIN_MATCHES: usize = 1;

/// A named, typed value producer. Every variant corresponds to one of the
/// contracts described for field extraction; `extract_value` returns
/// `Ok(None)` to signal no-value (the engine decides what to do with that),
/// and `Err` only for genuine extraction failures.
#[derive(Debug, Clone)]
pub enum Extractor {
    PlainText,
    Uid,
    Slug,
    Url,
    TargetUrl,
    Title,
    Description,
    Creator,
    Keywords,
    Filename,
    LastModified,
    IndexingTime,
    Constant(Value),
    SiteAttribute(String),
    HeaderMapping {
        header: String,
        map: HashMap<String, String>,
        default: Option<String>,
    },
    FieldMapping {
        other_field: String,
        map: HashMap<String, String>,
        default: Option<String>,
    },
    XPath(String),
    SnippetText,
}

impl Extractor {
    pub fn extract_value(
        &self,
        resource_info: &ResourceInfo,
        lookup: &dyn FieldLookup,
    ) -> Result<Option<Value>, CrawlError> {
        match self {
            Extractor::PlainText => Ok(resource_info
                .text
                .as_deref()
                .map(|t| Value::Text(normalize_whitespace(t)))),

            Extractor::Uid => Ok(Some(Value::Text(uid_for(&resource_info.url_info.loc)))),

            Extractor::Slug => Ok(Some(Value::Text(slug_for(&resource_info.url_info.loc)))),

            Extractor::Url => Ok(Some(Value::Text(resource_info.url_info.loc.clone()))),

            Extractor::TargetUrl => Ok(Some(Value::Text(
                resource_info.url_info.canonical_url().to_string(),
            ))),

            Extractor::Title => Ok(Some(Value::Text(title::resolve(
                resource_info,
                || filename_value(resource_info),
                || slug_for(&resource_info.url_info.loc),
            )))),

            Extractor::Description => {
                Ok(metadata_text(resource_info, "description").map(Value::Text))
            }

            Extractor::Creator => Ok(metadata_text(resource_info, "creator").map(Value::Text)),

            Extractor::Keywords => {
                let Some(raw) = metadata_text(resource_info, "keywords") else {
                    return Ok(None);
                };
                let parts: Vec<&str> = if raw.contains(',') {
                    raw.split(',').collect()
                } else {
                    raw.split_whitespace().collect()
                };
                let values = parts
                    .into_iter()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::Text(s.to_string()))
                    .collect();
                Ok(Some(Value::Multi(values)))
            }

            Extractor::Filename => Ok(filename_value(resource_info).map(Value::Text)),

            Extractor::LastModified => {
                if let Some(lastmod) = resource_info.url_info.lastmod {
                    return Ok(Some(Value::Timestamp(lastmod)));
                }
                if let Some(header) = resource_info.header("last-modified") {
                    if let Ok(dt) = sitedex_util::time::from_http_datetime(header) {
                        return Ok(Some(Value::Timestamp(dt)));
                    }
                }
                Ok(Some(Value::Timestamp(Utc::now())))
            }

            Extractor::IndexingTime => Ok(Some(Value::Timestamp(Utc::now()))),

            Extractor::Constant(value) => Ok(Some(normalize_constant(value))),

            Extractor::SiteAttribute(key) => {
                Ok(resource_info.site.attributes.get(key).cloned().map(Value::Text))
            }

            Extractor::HeaderMapping { header, map, default } => {
                let raw = resource_info.header(header).map(|v| {
                    if header.eq_ignore_ascii_case("content-type") {
                        get_content_type(v)
                    } else {
                        v.to_string()
                    }
                });
                Ok(apply_mapping(raw.as_deref(), map, default))
            }

            Extractor::FieldMapping { other_field, map, default } => {
                let raw = lookup.extract_raw(other_field, resource_info)?;
                let text = raw.as_ref().and_then(Value::as_text);
                Ok(apply_mapping(text, map, default))
            }

            Extractor::XPath(expression) => {
                let Some(content_type) = resource_info.content_type.as_deref() else {
                    return Ok(None);
                };
                if !sitedex_markup::SUPPORTED_MIME_TYPES.contains(&content_type) {
                    return Ok(None);
                }
                let Some(filename) = resource_info.filename.as_ref() else {
                    return Ok(None);
                };
                let bytes = std::fs::read(filename).map_err(|e| CrawlError::ExtractionError {
                    field: "xpath".to_string(),
                    detail: e.to_string(),
                })?;
                let tree = sitedex_markup::parse(content_type, &bytes, None).map_err(|e| {
                    CrawlError::ExtractionError {
                        field: "xpath".to_string(),
                        detail: e.to_string(),
                    }
                })?;
                let matches = sitedex_markup::query(&tree, expression).map_err(|e| {
                    CrawlError::ExtractionError {
                        field: "xpath".to_string(),
                        detail: e.to_string(),
                    }
                })?;
                if matches.len() < XPATH_MIN_MATCHES {
                    return Ok(None);
                }
                if matches.len() > 1 {
                    log::info!(
                        "xpath '{expression}' matched {} nodes, using the first",
                        matches.len()
                    );
                }
                Ok(Some(Value::Text(matches.into_iter().next().unwrap())))
            }

            Extractor::SnippetText => {
                let Some(text) = resource_info.text.as_deref() else {
                    return Ok(None);
                };
                let title = title::resolve(
                    resource_info,
                    || filename_value(resource_info),
                    || slug_for(&resource_info.url_info.loc),
                );
                let remainder = text.strip_prefix(title.as_str()).unwrap_or(text);
                Ok(Some(Value::Text(normalize_whitespace(remainder))))
            }
        }
    }
}

fn filename_value(resource_info: &ResourceInfo) -> Option<String> {
    resource_info
        .header("content-disposition")
        .and_then(filename_from_content_disposition)
}

fn metadata_text(resource_info: &ResourceInfo, key: &str) -> Option<String> {
    resource_info.metadata.get(key).cloned()
}

fn apply_mapping(
    raw: Option<&str>,
    map: &HashMap<String, String>,
    default: &Option<String>,
) -> Option<Value> {
    match raw.and_then(|r| map.get(r)) {
        Some(mapped) => Some(Value::Text(mapped.clone())),
        None => default.clone().map(Value::Text),
    }
}

fn normalize_constant(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(normalize_whitespace(s)),
        Value::Multi(items) => Value::Multi(items.iter().map(normalize_constant).collect()),
        other => other.clone(),
    }
}
