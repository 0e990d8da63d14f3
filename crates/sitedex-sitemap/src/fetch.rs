//! Sitemap discovery and fetching. Mirrors the teacher's `download()` gzip
//! handling, generalized to the two-tier index/sitemap discovery this
//! component needs and built on top of a caller-supplied `reqwest::Client`
//! so every component shares one no-redirect HTTP client.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use url::Url;

use sitedex_types::{CrawlError, Site, Sitemap, SitemapIndex};
use sitedex_util::content::{get_content_type, gunzip, is_gzipped};

use crate::parsing::{self, RootKind};

const SITEMAP_INDEX_CANDIDATES: &[&str] = &["sitemap_index.xml", "sitemap_index.xml.gz"];
const SITEMAP_CANDIDATES: &[&str] = &["sitemap.xml", "sitemap.xml.gz"];

/// GETs `url` without following redirects, returning the decoded text body
/// on 200, or `None` for any other status (the caller moves on to the next
/// discovery candidate).
async fn try_fetch(http: &reqwest::Client, url: &str) -> Result<Option<String>> {
    let response = http.get(url).send().await?;
    if response.status() != reqwest::StatusCode::OK {
        return Ok(None);
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(get_content_type);

    let gzipped = is_gzipped(content_type.as_deref(), url);
    let bytes = response.bytes().await?;
    let text = if gzipped {
        gunzip(&bytes)?
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };
    Ok(Some(text))
}

fn candidate_url(base: &str, candidate: &str) -> Result<String> {
    let base = Url::parse(base).map_err(|e| anyhow!("invalid site URL '{base}': {e}"))?;
    Ok(base.join(candidate)?.to_string())
}

/// Discovers and fetches the sitemap index for a site, falling back to a
/// single discovered sitemap wrapped in a synthetic index when no real
/// `<sitemapindex>` is found.
pub struct SitemapIndexFetcher {
    site: Arc<Site>,
    http: reqwest::Client,
}

impl SitemapIndexFetcher {
    pub fn new(site: Arc<Site>, http: reqwest::Client) -> Self {
        Self { site, http }
    }

    pub async fn fetch(&self) -> Result<SitemapIndex, CrawlError> {
        let mut candidates = vec![self.site.url.clone()];
        for name in SITEMAP_INDEX_CANDIDATES {
            candidates.push(
                candidate_url(&self.site.url, name).map_err(|e| CrawlError::NoSitemapFound {
                    site_url: format!("{}: {e}", self.site.url),
                })?,
            );
        }

        for candidate in candidates {
            let body = try_fetch(&self.http, &candidate)
                .await
                .map_err(|e| CrawlError::FetchError {
                    url: candidate.clone(),
                    detail: e.to_string(),
                })?;
            let Some(body) = body else { continue };

            let parsed = match parsing::parse(&body) {
                Ok(parsed) => parsed,
                Err(e) => {
                    log::warn!("skipping unparseable candidate {candidate}: {e}");
                    continue;
                }
            };

            if parsed.kind != RootKind::SitemapIndex {
                continue;
            }

            log::info!(
                "found sitemap index at {candidate} with {} nested sitemaps",
                parsed.url_infos.len()
            );

            let mut sitemaps = Vec::with_capacity(parsed.url_infos.len());
            let sub_fetcher = SitemapFetcher::new(self.site.clone(), self.http.clone());
            for url_info in &parsed.url_infos {
                sitemaps.push(sub_fetcher.fetch(Some(&url_info.loc)).await?);
            }
            return Ok(SitemapIndex::new(sitemaps));
        }

        log::info!(
            "no sitemap index found for {}, falling back to single-sitemap discovery",
            self.site.url
        );
        let sitemap = SitemapFetcher::new(self.site.clone(), self.http.clone())
            .fetch(None)
            .await?;
        Ok(SitemapIndex::virtual_of(sitemap))
    }
}

/// Fetches a single sitemap, either at an explicit URL or via discovery
/// probing {base, `sitemap.xml`, `sitemap.xml.gz`}.
pub struct SitemapFetcher {
    site: Arc<Site>,
    http: reqwest::Client,
}

impl SitemapFetcher {
    pub fn new(site: Arc<Site>, http: reqwest::Client) -> Self {
        Self { site, http }
    }

    pub async fn fetch(&self, explicit_url: Option<&str>) -> Result<Sitemap, CrawlError> {
        if let Some(url) = explicit_url {
            let body = try_fetch(&self.http, url)
                .await
                .map_err(|e| CrawlError::FetchError {
                    url: url.to_string(),
                    detail: e.to_string(),
                })?
                .ok_or_else(|| CrawlError::NoSitemapFound {
                    site_url: url.to_string(),
                })?;
            let parsed = parsing::parse(&body).map_err(|e| CrawlError::NoSitemapFound {
                site_url: format!("{url}: {e}"),
            })?;
            return Ok(Sitemap::new(parsed.url_infos));
        }

        let mut candidates = vec![self.site.url.clone()];
        for name in SITEMAP_CANDIDATES {
            candidates.push(candidate_url(&self.site.url, name).map_err(|e| {
                CrawlError::NoSitemapFound {
                    site_url: format!("{}: {e}", self.site.url),
                }
            })?);
        }

        for candidate in candidates {
            let body = try_fetch(&self.http, &candidate)
                .await
                .map_err(|e| CrawlError::FetchError {
                    url: candidate.clone(),
                    detail: e.to_string(),
                })?;
            let Some(body) = body else { continue };

            match parsing::parse(&body) {
                Ok(parsed) if parsed.kind == RootKind::UrlSet => {
                    log::info!("discovered sitemap at {candidate}");
                    return Ok(Sitemap::new(parsed.url_infos));
                }
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("skipping unparseable candidate {candidate}: {e}");
                    continue;
                }
            }
        }

        Err(CrawlError::NoSitemapFound {
            site_url: self.site.url.clone(),
        })
    }
}
