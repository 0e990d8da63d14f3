//! Fetch state machine: GET without following redirects, back off on 429
//! by doubling the owning site's politeness delay, and on success write the
//! body to a temp file inside the orchestrator-owned scratch directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sitedex_types::{CrawlError, ResourceInfo};
use sitedex_util::content::get_content_type;

pub struct Fetcher {
    http: reqwest::Client,
    scratch_dir: PathBuf,
}

impl Fetcher {
    /// `http` must be built with `redirect::Policy::none()` — this state
    /// machine is itself responsible for rejecting redirects, not the
    /// transport.
    pub fn new(http: reqwest::Client, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub async fn fetch(&self, resource_info: &mut ResourceInfo) -> Result<(), CrawlError> {
        let url = resource_info.url_info.loc.clone();

        loop {
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| CrawlError::FetchError {
                    url: url.clone(),
                    detail: e.to_string(),
                })?;

            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("<unknown>")
                    .to_string();
                return Err(CrawlError::AttemptedRedirect { url, location });
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let sleeptime_ms = resource_info.site.sleeptime_ms();
                log::warn!(
                    "rate-limited fetching {url}, backing off for {sleeptime_ms}ms and retrying"
                );
                tokio::time::sleep(Duration::from_millis(sleeptime_ms)).await;
                resource_info.site.double_sleeptime();
                continue;
            }

            if !status.is_success() {
                return Err(CrawlError::FetchError {
                    url,
                    detail: format!("got status {status}"),
                });
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(get_content_type);
            let headers = response.headers().clone();
            let body = response.bytes().await.map_err(|e| CrawlError::FetchError {
                url: url.clone(),
                detail: e.to_string(),
            })?;

            let filename = self.write_temp_file(&body).await?;

            resource_info.filename = Some(filename);
            resource_info.content_type = content_type;
            resource_info.headers = headers;
            return Ok(());
        }
    }

    async fn write_temp_file(&self, body: &[u8]) -> Result<PathBuf, CrawlError> {
        use std::io::Write;

        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| CrawlError::FetchError {
                url: "<scratch dir>".to_string(),
                detail: format!("creating scratch directory: {e}"),
            })?;

        let mut file = tempfile::NamedTempFile::new_in(&self.scratch_dir).map_err(|e| {
            CrawlError::FetchError {
                url: "<scratch dir>".to_string(),
                detail: format!("creating temp file: {e}"),
            }
        })?;
        file.write_all(body).map_err(|e| CrawlError::FetchError {
            url: "<scratch dir>".to_string(),
            detail: format!("writing temp file: {e}"),
        })?;
        let (_file, path) = file.keep().map_err(|e| CrawlError::FetchError {
            url: "<scratch dir>".to_string(),
            detail: format!("persisting temp file: {e}"),
        })?;

        Ok(path)
    }
}

/// Unlinks a resource's temp file, if any. Called at the end of per-URL
/// processing, and on any early exit that must not leak scratch files.
pub fn cleanup(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("failed to remove temp file {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitedex_types::{Site, UrlInfo};
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_redirect_client() -> reqwest::Client {
        reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    fn resource(url: String) -> ResourceInfo {
        let site = Arc::new(Site::new("http://ex.org"));
        ResourceInfo::new(site, UrlInfo::new(url))
    }

    #[tokio::test]
    async fn fetch_writes_body_and_strips_charset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/html; charset=utf-8")
                    .set_body_string("<html></html>"),
            )
            .mount(&server)
            .await;

        let scratch = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(no_redirect_client(), scratch.path());
        let mut resource = resource(format!("{}/a", server.uri()));
        fetcher.fetch(&mut resource).await.unwrap();

        assert_eq!(resource.content_type.as_deref(), Some("text/html"));
        let filename = resource.filename.unwrap();
        let contents = std::fs::read_to_string(&filename).unwrap();
        assert_eq!(contents, "<html></html>");
        cleanup(&filename);
    }

    #[tokio::test]
    async fn redirect_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", "http://elsewhere.org/"),
            )
            .mount(&server)
            .await;

        let scratch = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(no_redirect_client(), scratch.path());
        let mut resource = resource(format!("{}/a", server.uri()));
        let err = fetcher.fetch(&mut resource).await.unwrap_err();
        assert!(matches!(err, CrawlError::AttemptedRedirect { .. }));
    }

    #[tokio::test]
    async fn non_200_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let scratch = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(no_redirect_client(), scratch.path());
        let mut resource = resource(format!("{}/a", server.uri()));
        let err = fetcher.fetch(&mut resource).await.unwrap_err();
        assert!(matches!(err, CrawlError::FetchError { .. }));
    }

    #[tokio::test]
    async fn rate_limit_doubles_sleeptime_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let scratch = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(no_redirect_client(), scratch.path());
        let mut resource = resource(format!("{}/a", server.uri()));
        let initial_sleeptime = resource.site.sleeptime_ms();
        fetcher.fetch(&mut resource).await.unwrap();
        assert!(resource.site.sleeptime_ms() > initial_sleeptime);
        cleanup(&resource.filename.unwrap());
    }
}
