//! The per-site crawl pipeline: sitemap discovery, reconciliation against
//! the index, then fetch -> extract -> index -> unlink for every URL.
//!
//! Generalizes the teacher's `crawler::crawl_site`, replacing its
//! scraper-trait/robots-throttle machinery (this design has no robots.txt
//! or general-crawl concept) with the sitemap-index-driven, single-worker
//! pipeline spec'd for a site-indexing crawler.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use sitedex_config::Config;
use sitedex_convert::ConverterClient;
use sitedex_extract::extract_record;
use sitedex_fetch::{freshness, Fetcher};
use sitedex_index::IndexClient;
use sitedex_sitemap::SitemapIndexFetcher;
use sitedex_types::{CrawlError, ResourceInfo, Site, SitemapIndex, UrlInfo};

use crate::options::RunOptions;

const REQUEST_TIMEOUT_SECS: u64 = 30;

fn build_http_client() -> Result<reqwest::Client, CrawlError> {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| CrawlError::ConfigError {
            detail: format!("building HTTP client: {e}"),
        })
}

/// Runs a full crawl over every configured site, in order. Creates a
/// scratch directory for the duration of the run and removes it
/// (via `TempDir`'s drop) on every exit path, including early returns.
pub async fn run(config: &Config, options: &RunOptions) -> Result<(), CrawlError> {
    if let Some(filter) = &options.url_filter {
        if config.get_site(filter).is_none() {
            return Err(CrawlError::SiteNotFound { url: filter.clone() });
        }
    }

    let http = build_http_client()?;
    let scratch_dir = tempfile::tempdir().map_err(|e| CrawlError::ConfigError {
        detail: format!("creating scratch directory: {e}"),
    })?;

    let fetcher = Fetcher::new(http.clone(), scratch_dir.path());
    let index_client = IndexClient::with_client(config.solr_url.as_str(), http.clone());
    let converter_client = ConverterClient::with_client(config.tika_url.as_str(), http.clone());

    for site in &config.sites {
        if let Some(filter) = &options.url_filter {
            if !site.owns(filter) {
                continue;
            }
        }

        if let Err(e) = crawl_site(
            site,
            config,
            options,
            &http,
            &fetcher,
            &index_client,
            &converter_client,
        )
        .await
        {
            log::error!("aborting crawl of site {}: {e}", site.url);
        }
    }

    Ok(())
}

async fn crawl_site(
    site: &std::sync::Arc<Site>,
    config: &Config,
    options: &RunOptions,
    http: &reqwest::Client,
    fetcher: &Fetcher,
    index_client: &IndexClient,
    converter_client: &ConverterClient,
) -> Result<(), CrawlError> {
    log::info!("crawling site {}", site.url);

    let sitemap_index = SitemapIndexFetcher::new(site.clone(), http.clone())
        .fetch()
        .await?;

    let indexed = query_indexed_docs(config, index_client, site).await?;
    reconcile(index_client, site, &sitemap_index, &indexed).await;

    let total = sitemap_index
        .sitemaps
        .iter()
        .flat_map(|sm| sm.url_infos.iter())
        .filter(|url_info| options.admits_url_info(url_info))
        .count();
    let indexed_count = AtomicUsize::new(0);

    for sitemap in &sitemap_index.sitemaps {
        for url_info in &sitemap.url_infos {
            if !options.admits_url_info(url_info) {
                continue;
            }

            let last_indexed = indexed.get(&url_info.loc).map(|(_, lastmod)| *lastmod);
            process_url(
                site,
                config,
                options,
                http,
                fetcher,
                index_client,
                converter_client,
                url_info,
                last_indexed,
                &indexed_count,
                total,
            )
            .await;
        }
    }

    Ok(())
}

/// Searches the index for every record stored under `site`'s URL, keyed by
/// the distinguished `{unique_field, url_field, last_modified_field}`.
/// Returns a map from the stored URL to `(uid, last_modified)`, reused both
/// for reconciliation and for each URL's freshness lookup.
async fn query_indexed_docs(
    config: &Config,
    index_client: &IndexClient,
    site: &Site,
) -> Result<HashMap<String, (String, chrono::DateTime<chrono::Utc>)>, CrawlError> {
    let query = format!("{}:{}*", config.url_field, sitedex_index::escape(&site.url));
    let fl = [
        config.unique_field.as_str(),
        config.url_field.as_str(),
        config.last_modified_field.as_str(),
    ];
    let docs = index_client.search(&query, Some(&fl)).await?;

    let mut indexed = HashMap::with_capacity(docs.len());
    for doc in &docs {
        let (Some(uid), Some(url), Some(lastmod)) = (
            doc.get(config.unique_field.as_str()).and_then(|v| v.as_str()),
            doc.get(config.url_field.as_str()).and_then(|v| v.as_str()),
            doc.get(config.last_modified_field.as_str()).and_then(|v| v.as_str()),
        ) else {
            continue;
        };
        if let Ok(lastmod) = sitedex_util::time::from_iso_datetime(lastmod) {
            indexed.insert(url.to_string(), (uid.to_string(), lastmod));
        }
    }
    Ok(indexed)
}

/// Deletes every indexed record whose URL falls under `site` but no longer
/// appears in any sitemap of the freshly fetched index.
async fn reconcile(
    index_client: &IndexClient,
    site: &Site,
    sitemap_index: &SitemapIndex,
    indexed: &HashMap<String, (String, chrono::DateTime<chrono::Utc>)>,
) {
    for (url, (uid, _)) in indexed {
        if url.starts_with(&site.url) && !sitemap_index.contains(url) {
            log::info!("purging stale document {uid} ({url}) from index");
            index_client.delete(uid).await;
        }
    }
}

/// Runs the fetch -> extract -> index -> unlink pipeline for one URL.
/// Every failure is logged and absorbed here: a single bad URL must never
/// abort the rest of the site's crawl.
#[allow(clippy::too_many_arguments)]
async fn process_url(
    site: &std::sync::Arc<Site>,
    config: &Config,
    options: &RunOptions,
    http: &reqwest::Client,
    fetcher: &Fetcher,
    index_client: &IndexClient,
    converter_client: &ConverterClient,
    url_info: &UrlInfo,
    last_indexed: Option<chrono::DateTime<chrono::Utc>>,
    indexed_count: &AtomicUsize,
    total: usize,
) {
    let mut resource = ResourceInfo::new(site.clone(), url_info.clone());
    resource.last_indexed = last_indexed;

    if !options.force {
        match freshness::is_modified(&resource, http).await {
            Ok(freshness::Freshness::Unmodified) => {
                log::info!("{} has not been modified since last index, skipping", url_info.loc);
                return;
            }
            Ok(freshness::Freshness::Modified) => {}
            Err(e) => {
                log::warn!("freshness check failed for {}: {e}, fetching anyway", url_info.loc);
            }
        }
    }

    if let Err(e) = fetcher.fetch(&mut resource).await {
        match &e {
            CrawlError::AttemptedRedirect { .. } => {
                log::warn!("skipping redirecting URL {}: {e}", url_info.loc);
            }
            _ => log::warn!("fetch failed for {}: {e}", url_info.loc),
        }
        return;
    }

    let outcome = run_pipeline(config, converter_client, index_client, &mut resource).await;

    if let Some(filename) = &resource.filename {
        sitedex_fetch::cleanup(filename);
    }

    match outcome {
        Ok(()) => {
            let n = indexed_count.fetch_add(1, Ordering::SeqCst) + 1;
            log::info!("indexed {} [{n}/{total}]", url_info.loc);
        }
        Err(e) => log::warn!("failed to process {}: {e}", url_info.loc),
    }
}

async fn run_pipeline(
    config: &Config,
    converter_client: &ConverterClient,
    index_client: &IndexClient,
    resource: &mut ResourceInfo,
) -> Result<(), CrawlError> {
    resource.metadata = converter_client.extract_metadata(resource).await?;
    resource.text = Some(converter_client.extract_text(resource).await?);

    let record = extract_record(&config.fields, resource, config)?;
    index_client.index(&record).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitedex_config::{RawConfig, RawExtractor, RawField, RawFieldType, RawSite};

    fn minimal_config() -> Config {
        let raw = RawConfig {
            sites: vec![RawSite {
                url: "http://ex.org".to_string(),
                attributes: Default::default(),
                sleeptime_ms: None,
            }],
            unique_field: "uid".to_string(),
            url_field: "path_string".to_string(),
            last_modified_field: "modified".to_string(),
            fields: vec![
                RawField {
                    name: "uid".to_string(),
                    field_type: RawFieldType::Text,
                    required: true,
                    multivalued: false,
                    extractor: RawExtractor::Uid,
                },
                RawField {
                    name: "path_string".to_string(),
                    field_type: RawFieldType::Text,
                    required: true,
                    multivalued: false,
                    extractor: RawExtractor::Url,
                },
                RawField {
                    name: "modified".to_string(),
                    field_type: RawFieldType::Timestamp,
                    required: true,
                    multivalued: false,
                    extractor: RawExtractor::LastModified,
                },
            ],
            tika: Some("http://tika.local".to_string()),
            solr: Some("http://solr.local".to_string()),
        };
        Config::from_raw(raw, None, None).unwrap()
    }

    #[tokio::test]
    async fn url_filter_outside_every_site_is_site_not_found() {
        let config = minimal_config();
        let options = RunOptions::new().with_url_filter(Some("http://other.org/a".to_string()));
        let err = run(&config, &options).await.unwrap_err();
        assert!(matches!(err, CrawlError::SiteNotFound { .. }));
    }
}
