//! The closed error taxonomy for the crawler.
//!
//! Every variant here corresponds 1:1 to a named error kind from the
//! design's error handling section. Call sites that need free-form context
//! still reach for `anyhow::Error` / `.context(...)`; this enum exists so
//! that the orchestrator can pattern-match on *kind* to decide whether a
//! failure is a per-URL skip, a per-site abort, or fatal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("fetch error for {url}: {detail}")]
    FetchError { url: String, detail: String },

    #[error("attempted redirect for {url} to {location}")]
    AttemptedRedirect { url: String, location: String },

    #[error("{url} has not been modified since last index")]
    NotModified { url: String },

    #[error("no sitemap found for site {site_url}")]
    NoSitemapFound { site_url: String },

    #[error("site not found: {url}")]
    SiteNotFound { url: String },

    #[error("no such field: {name}")]
    NoSuchField { name: String },

    #[error("extraction error for field {field}: {detail}")]
    ExtractionError { field: String, detail: String },

    #[error("no value extracted")]
    NoValueExtracted,

    #[error("index error: {detail}")]
    IndexError { detail: String },

    #[error("converter error for {url}: {detail}")]
    ConverterError { url: String, detail: String },

    #[error("configuration error: {detail}")]
    ConfigError { detail: String },
}

impl CrawlError {
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            CrawlError::NotModified { .. } | CrawlError::AttemptedRedirect { .. }
        )
    }
}
