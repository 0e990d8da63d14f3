//! The declarative YAML shape a configuration source is parsed into,
//! before being resolved into the domain types in [`crate::config`].

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub sites: Vec<RawSite>,
    pub unique_field: String,
    pub url_field: String,
    pub last_modified_field: String,
    pub fields: Vec<RawField>,
    #[serde(default)]
    pub tika: Option<String>,
    #[serde(default)]
    pub solr: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSite {
    pub url: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub sleeptime_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RawField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: RawFieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub multivalued: bool,
    pub extractor: RawExtractor,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawFieldType {
    Text,
    Boolean,
    Integer,
    Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawExtractor {
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
    Constant {
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        values: Option<Vec<String>>,
    },
    SiteAttribute {
        key: String,
    },
    HeaderMapping {
        header: String,
        #[serde(default)]
        map: HashMap<String, String>,
        #[serde(default)]
        default: Option<String>,
    },
    FieldMapping {
        other_field: String,
        #[serde(default)]
        map: HashMap<String, String>,
        #[serde(default)]
        default: Option<String>,
    },
    XPath {
        expression: String,
    },
    SnippetText,
}
