use crate::Sitemap;

/// A sitemap index: an ordered sequence of sitemaps, built eagerly at fetch
/// time (per the redesign note replacing the original's lazy, memoizing
/// accessors — the values are small and used immediately).
///
/// When no real `<sitemapindex>` is discovered, callers construct this with
/// a single sitemap (`virtual_of`), so every consumer sees the same shape.
#[derive(Debug, Clone, Default)]
pub struct SitemapIndex {
    pub sitemaps: Vec<Sitemap>,
}

impl SitemapIndex {
    pub fn new(sitemaps: Vec<Sitemap>) -> Self {
        Self { sitemaps }
    }

    /// Wrap a single discovered sitemap in a synthetic index.
    pub fn virtual_of(sitemap: Sitemap) -> Self {
        Self {
            sitemaps: vec![sitemap],
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.sitemaps.iter().any(|sm| sm.contains(url))
    }

    pub fn url_infos(&self) -> impl Iterator<Item = &crate::UrlInfo> {
        self.sitemaps.iter().flat_map(|sm| sm.url_infos.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UrlInfo;

    #[test]
    fn contains_delegates_to_any_sitemap() {
        let idx = SitemapIndex::new(vec![
            Sitemap::new(vec![UrlInfo::new("http://ex.org/a")]),
            Sitemap::new(vec![UrlInfo::new("http://ex.org/b")]),
        ]);
        assert!(idx.contains("http://ex.org/a"));
        assert!(idx.contains("http://ex.org/b"));
        assert!(!idx.contains("http://ex.org/c"));
    }

    #[test]
    fn virtual_index_wraps_single_sitemap() {
        let sm = Sitemap::new(vec![UrlInfo::new("http://ex.org/a")]);
        let idx = SitemapIndex::virtual_of(sm);
        assert_eq!(idx.sitemaps.len(), 1);
        assert!(idx.contains("http://ex.org/a"));
    }
}
