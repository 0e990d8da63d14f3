//! The resolved, immutable configuration: sites, fields, the three
//! distinguished field names, and the converter/index endpoints.

use std::sync::Arc;

use sitedex_extract::{Extractor, Field, FieldLookup};
use sitedex_types::{CrawlError, FieldType, ResourceInfo, Site, Value};

use crate::raw::{RawConfig, RawExtractor, RawFieldType};

pub struct Config {
    pub sites: Vec<Arc<Site>>,
    pub fields: Vec<Field>,
    pub unique_field: String,
    pub url_field: String,
    pub last_modified_field: String,
    pub tika_url: String,
    pub solr_url: String,
}

impl Config {
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get_site(&self, url: &str) -> Option<&Arc<Site>> {
        self.sites.iter().find(|s| s.owns(url))
    }

    /// Builds a [`Config`] from its raw deserialized form, validating the
    /// three distinguished field names and resolving the converter/index
    /// URLs from config or the given runtime overrides.
    pub fn from_raw(
        raw: RawConfig,
        tika_override: Option<String>,
        solr_override: Option<String>,
    ) -> Result<Self, CrawlError> {
        let sites = raw
            .sites
            .into_iter()
            .map(|s| {
                let mut site = Site::new(s.url).with_attributes(s.attributes);
                if let Some(ms) = s.sleeptime_ms {
                    site = site.with_sleeptime_ms(ms);
                }
                Arc::new(site)
            })
            .collect();

        let fields: Vec<Field> = raw
            .fields
            .into_iter()
            .map(|f| {
                Field::new(
                    f.name,
                    field_type_from_raw(f.field_type),
                    f.required,
                    f.multivalued,
                    extractor_from_raw(f.extractor),
                )
            })
            .collect();

        let tika_url = tika_override
            .or(raw.tika)
            .ok_or_else(|| CrawlError::ConfigError {
                detail: "no converter (tika) URL declared or supplied at runtime".to_string(),
            })?;
        let solr_url = solr_override
            .or(raw.solr)
            .ok_or_else(|| CrawlError::ConfigError {
                detail: "no index (solr) URL declared or supplied at runtime".to_string(),
            })?;

        let config = Config {
            sites,
            fields,
            unique_field: raw.unique_field,
            url_field: raw.url_field,
            last_modified_field: raw.last_modified_field,
            tika_url,
            solr_url,
        };

        for name in [&config.unique_field, &config.url_field, &config.last_modified_field] {
            if config.get_field(name).is_none() {
                return Err(CrawlError::ConfigError {
                    detail: format!("distinguished field '{name}' is not a defined field"),
                });
            }
        }

        Ok(config)
    }
}

impl FieldLookup for Config {
    fn extract_raw(
        &self,
        field_name: &str,
        resource_info: &ResourceInfo,
    ) -> Result<Option<Value>, CrawlError> {
        let field = self.get_field(field_name).ok_or_else(|| CrawlError::NoSuchField {
            name: field_name.to_string(),
        })?;
        field.extractor.extract_value(resource_info, self)
    }
}

fn field_type_from_raw(raw: RawFieldType) -> FieldType {
    match raw {
        RawFieldType::Text => FieldType::Text,
        RawFieldType::Boolean => FieldType::Boolean,
        RawFieldType::Integer => FieldType::Integer,
        RawFieldType::Timestamp => FieldType::Timestamp,
    }
}

fn extractor_from_raw(raw: RawExtractor) -> Extractor {
    match raw {
        RawExtractor::PlainText => Extractor::PlainText,
        RawExtractor::Uid => Extractor::Uid,
        RawExtractor::Slug => Extractor::Slug,
        RawExtractor::Url => Extractor::Url,
        RawExtractor::TargetUrl => Extractor::TargetUrl,
        RawExtractor::Title => Extractor::Title,
        RawExtractor::Description => Extractor::Description,
        RawExtractor::Creator => Extractor::Creator,
        RawExtractor::Keywords => Extractor::Keywords,
        RawExtractor::Filename => Extractor::Filename,
        RawExtractor::LastModified => Extractor::LastModified,
        RawExtractor::IndexingTime => Extractor::IndexingTime,
        RawExtractor::Constant { value, values } => {
            let constant = match (value, values) {
                (_, Some(values)) => Value::Multi(values.into_iter().map(Value::Text).collect()),
                (Some(value), None) => Value::Text(value),
                (None, None) => Value::Text(String::new()),
            };
            Extractor::Constant(constant)
        }
        RawExtractor::SiteAttribute { key } => Extractor::SiteAttribute(key),
        RawExtractor::HeaderMapping { header, map, default } => {
            Extractor::HeaderMapping { header, map, default }
        }
        RawExtractor::FieldMapping { other_field, map, default } => {
            Extractor::FieldMapping { other_field, map, default }
        }
        RawExtractor::XPath { expression } => Extractor::XPath(expression),
        RawExtractor::SnippetText => Extractor::SnippetText,
    }
}
