use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::HeaderMap;

use crate::{Site, UrlInfo};

/// A per-URL crawl record flowing through fetch -> extract -> index.
///
/// Created by the orchestrator, filled progressively by the fetcher and the
/// converter client, and torn down (its temp file unlinked) at the end of
/// per-URL processing.
#[derive(Debug)]
pub struct ResourceInfo {
    pub site: Arc<Site>,
    pub url_info: UrlInfo,
    pub last_indexed: Option<DateTime<Utc>>,

    /// Populated by the fetcher once the body has been written to disk.
    pub filename: Option<std::path::PathBuf>,
    /// MIME type with any `;charset=...` suffix already stripped.
    pub content_type: Option<String>,
    pub headers: HeaderMap,

    /// Populated after the converter has run.
    pub metadata: HashMap<String, String>,
    pub text: Option<String>,
}

impl ResourceInfo {
    pub fn new(site: Arc<Site>, url_info: UrlInfo) -> Self {
        Self {
            site,
            url_info,
            last_indexed: None,
            filename: None,
            content_type: None,
            headers: HeaderMap::new(),
            metadata: HashMap::new(),
            text: None,
        }
    }

    /// Case-insensitive header lookup (header names are already
    /// case-insensitive in `http::HeaderMap`, but this documents intent).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
