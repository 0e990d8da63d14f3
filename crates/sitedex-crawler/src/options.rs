//! Per-invocation runtime options, layered on top of the declarative
//! configuration (the CLI's `--force` flag and optional `url` filter).

/// Options that vary per crawl invocation without belonging in the
/// declarative configuration itself.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Ignore freshness checks and always re-fetch.
    pub force: bool,
    /// Restrict this run to a single URL within a configured site.
    pub url_filter: Option<String>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_url_filter(mut self, url: Option<String>) -> Self {
        self.url_filter = url;
        self
    }

    /// Whether `url` should be processed under this run's filter, if any.
    fn admits(&self, url: &str) -> bool {
        match &self.url_filter {
            Some(filter) => filter == url,
            None => true,
        }
    }

    /// Whether a `UrlInfo`'s fetch or canonical URL matches the filter.
    pub fn admits_url_info(&self, url_info: &sitedex_types::UrlInfo) -> bool {
        match &self.url_filter {
            Some(_) => self.admits(&url_info.loc) || self.admits(url_info.canonical_url()),
            None => true,
        }
    }
}
