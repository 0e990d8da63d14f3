//! Decides whether a resource needs re-fetching, per the state machine
//! documented on the fetcher: prefer the sitemap's `lastmod`, fall back to
//! a HEAD request's `Last-Modified` header, and default to conservative
//! re-fetching when nothing tells us otherwise.

use chrono::{DateTime, Utc};
use sitedex_types::{CrawlError, ResourceInfo};
use sitedex_util::time::from_http_datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Modified,
    Unmodified,
}

pub async fn is_modified(
    resource_info: &ResourceInfo,
    http: &reqwest::Client,
) -> Result<Freshness, CrawlError> {
    let Some(last_indexed) = resource_info.last_indexed else {
        return Ok(Freshness::Modified);
    };

    if let Some(lastmod) = resource_info.url_info.lastmod {
        return Ok(compare(lastmod, last_indexed));
    }

    let url = resource_info.url_info.loc.as_str();
    let response = http
        .head(url)
        .send()
        .await
        .map_err(|e| CrawlError::FetchError {
            url: url.to_string(),
            detail: e.to_string(),
        })?;

    let header_modified = response
        .headers()
        .get(reqwest::header::LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| from_http_datetime(s).ok());

    match header_modified {
        Some(modified) => Ok(compare(modified, last_indexed)),
        None => Ok(Freshness::Modified),
    }
}

fn compare(candidate: DateTime<Utc>, last_indexed: DateTime<Utc>) -> Freshness {
    if candidate > last_indexed {
        Freshness::Modified
    } else {
        Freshness::Unmodified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sitedex_types::{Site, UrlInfo};
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resource(last_indexed: Option<DateTime<Utc>>, lastmod: Option<DateTime<Utc>>, url: String) -> ResourceInfo {
        let site = Arc::new(Site::new("http://ex.org"));
        let mut url_info = UrlInfo::new(url);
        url_info.lastmod = lastmod;
        let mut resource = ResourceInfo::new(site, url_info);
        resource.last_indexed = last_indexed;
        resource
    }

    #[tokio::test]
    async fn absent_last_indexed_is_always_modified() {
        let http = reqwest::Client::new();
        let resource = resource(None, None, "http://ex.org/a".to_string());
        assert_eq!(is_modified(&resource, &http).await.unwrap(), Freshness::Modified);
    }

    #[tokio::test]
    async fn sitemap_lastmod_newer_than_last_indexed_is_modified() {
        let http = reqwest::Client::new();
        let last_indexed = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let lastmod = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let resource = resource(Some(last_indexed), Some(lastmod), "http://ex.org/a".to_string());
        assert_eq!(is_modified(&resource, &http).await.unwrap(), Freshness::Modified);
    }

    #[tokio::test]
    async fn sitemap_lastmod_older_than_last_indexed_is_unmodified() {
        let http = reqwest::Client::new();
        let last_indexed = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let lastmod = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let resource = resource(Some(last_indexed), Some(lastmod), "http://ex.org/a".to_string());
        assert_eq!(is_modified(&resource, &http).await.unwrap(), Freshness::Unmodified);
    }

    #[tokio::test]
    async fn falls_back_to_head_last_modified_header() {
        let server = MockServer::start().await;
        let last_indexed = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        Mock::given(method("HEAD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Last-Modified", "Mon, 01 Jun 2020 00:00:00 GMT"),
            )
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let resource = resource(Some(last_indexed), None, format!("{}/a", server.uri()));
        assert_eq!(is_modified(&resource, &http).await.unwrap(), Freshness::Modified);
    }

    #[tokio::test]
    async fn defaults_to_modified_without_any_signal() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let last_indexed = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let resource = resource(Some(last_indexed), None, format!("{}/a", server.uri()));
        assert_eq!(is_modified(&resource, &http).await.unwrap(), Freshness::Modified);
    }
}
