//! Sitemap index and sitemap discovery, fetching, and XML parsing.

pub mod fetch;
pub mod parsing;

pub use fetch::{SitemapFetcher, SitemapIndexFetcher};
pub use parsing::{parse, ParsedSitemap, RootKind};
