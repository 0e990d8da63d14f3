use chrono::{DateTime, Utc};

/// One `<url>` entry parsed out of a sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlInfo {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: Option<String>,
    pub priority: Option<f64>,
    /// An alternate canonical URL distinct from the fetch URL (`<target>`).
    pub target: Option<String>,
}

impl UrlInfo {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
            target: None,
        }
    }

    /// The canonical URL callers should persist: `target` if present, else `loc`.
    pub fn canonical_url(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.loc)
    }
}

/// An ordered sequence of [`UrlInfo`] with case-insensitive membership
/// testing on `loc`.
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub url_infos: Vec<UrlInfo>,
}

impl Sitemap {
    pub fn new(url_infos: Vec<UrlInfo>) -> Self {
        Self { url_infos }
    }

    pub fn contains(&self, url: &str) -> bool {
        let needle = url.to_lowercase();
        self.url_infos
            .iter()
            .any(|ui| ui.loc.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_case_insensitive() {
        let sm = Sitemap::new(vec![UrlInfo::new("http://ex.org/A")]);
        assert!(sm.contains("http://ex.org/a"));
        assert!(sm.contains("HTTP://EX.ORG/A"));
        assert!(!sm.contains("http://ex.org/b"));
    }

    #[test]
    fn canonical_url_prefers_target() {
        let mut ui = UrlInfo::new("http://ex.org/a");
        assert_eq!(ui.canonical_url(), "http://ex.org/a");
        ui.target = Some("http://ex.org/canonical-a".to_string());
        assert_eq!(ui.canonical_url(), "http://ex.org/canonical-a");
    }
}
