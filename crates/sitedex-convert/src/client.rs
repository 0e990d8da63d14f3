//! PUTs a downloaded resource to the external converter service and
//! interprets its metadata/text responses.

use std::collections::HashMap;

use sitedex_types::{CrawlError, ResourceInfo};

use crate::metadata;

pub struct ConverterClient {
    base_url: String,
    http: reqwest::Client,
}

impl ConverterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn endpoint(&self, segment: &str) -> String {
        format!("{}/{segment}", self.base_url)
    }

    async fn read_body(resource_info: &ResourceInfo) -> Result<Vec<u8>, CrawlError> {
        let filename = resource_info.filename.as_ref().ok_or_else(|| CrawlError::ConverterError {
            url: resource_info.url_info.loc.clone(),
            detail: "resource has no downloaded body".to_string(),
        })?;
        tokio::fs::read(filename).await.map_err(|e| CrawlError::ConverterError {
            url: resource_info.url_info.loc.clone(),
            detail: format!("reading temp file: {e}"),
        })
    }

    /// PUTs the resource's bytes to `<base>/meta`. The response is a
    /// `key,value` CSV; values for a repeated key are joined with a single
    /// space. The resulting mapping is run through the metadata normalizer
    /// before being returned.
    pub async fn extract_metadata(
        &self,
        resource_info: &ResourceInfo,
    ) -> Result<HashMap<String, String>, CrawlError> {
        let url = resource_info.url_info.loc.clone();
        log::info!("extracting metadata from '{url}' via converter");

        let body = Self::read_body(resource_info).await?;
        let content_type = resource_info
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let response = self
            .http
            .put(self.endpoint("meta"))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| CrawlError::ConverterError {
                url: url.clone(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CrawlError::ConverterError {
                url,
                detail: format!("converter returned status {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| CrawlError::ConverterError {
            url: url.clone(),
            detail: e.to_string(),
        })?;

        let mut metadata = parse_metadata_csv(&bytes).map_err(|e| CrawlError::ConverterError {
            url: url.clone(),
            detail: format!("parsing converter CSV response: {e}"),
        })?;
        metadata::normalize(&mut metadata);
        Ok(metadata)
    }

    /// PUTs the resource's bytes to `<base>/tika` with `Accept: text/plain`.
    /// The body is decoded as UTF-8 regardless of any declared charset.
    pub async fn extract_text(&self, resource_info: &ResourceInfo) -> Result<String, CrawlError> {
        let url = resource_info.url_info.loc.clone();
        log::info!("extracting plain text from '{url}' via converter");

        let body = Self::read_body(resource_info).await?;
        let content_type = resource_info
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let response = self
            .http
            .put(self.endpoint("tika"))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::ACCEPT, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| CrawlError::ConverterError {
                url: url.clone(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CrawlError::ConverterError {
                url,
                detail: format!("converter returned status {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| CrawlError::ConverterError {
            url: url.clone(),
            detail: e.to_string(),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Parses a `key,value` CSV, joining repeated keys' values with a space, as
/// the response of a real converter service does for multivalued properties.
fn parse_metadata_csv(bytes: &[u8]) -> Result<HashMap<String, String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut metadata: HashMap<String, String> = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let Some(key) = record.get(0) else { continue };
        let value = record.iter().skip(1).collect::<Vec<_>>().join(",");
        metadata
            .entry(key.to_string())
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitedex_types::{Site, UrlInfo};
    use std::io::Write;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resource_with_file(content: &[u8]) -> (ResourceInfo, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        let site = Arc::new(Site::new("http://ex.org"));
        let mut resource = ResourceInfo::new(site, UrlInfo::new("http://ex.org/a"));
        resource.filename = Some(file.path().to_path_buf());
        resource.content_type = Some("text/html".to_string());
        (resource, file)
    }

    #[test]
    fn repeated_csv_keys_join_with_space() {
        let csv = b"keywords,alpha\nkeywords,beta\ntitle,Hello\n";
        let parsed = parse_metadata_csv(csv).unwrap();
        assert_eq!(parsed.get("keywords"), Some(&"alpha beta".to_string()));
        assert_eq!(parsed.get("title"), Some(&"Hello".to_string()));
    }

    #[tokio::test]
    async fn extract_metadata_normalizes_and_hits_meta_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/meta"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"dc:title,From DC\n".to_vec()))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let (resource, _guard) = resource_with_file(b"<html></html>");
        let metadata = client.extract_metadata(&resource).await.unwrap();
        assert_eq!(metadata.get("title"), Some(&"From DC".to_string()));
        assert_eq!(metadata.get("dc:title"), Some(&"From DC".to_string()));
    }

    #[tokio::test]
    async fn extract_text_hits_tika_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/tika"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Hello\nworld"))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let (resource, _guard) = resource_with_file(b"<html></html>");
        let text = client.extract_text(&resource).await.unwrap();
        assert_eq!(text, "Hello\nworld");
    }

    #[tokio::test]
    async fn non_success_status_surfaces_as_converter_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/meta"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let (resource, _guard) = resource_with_file(b"x");
        let err = client.extract_metadata(&resource).await.unwrap_err();
        assert!(matches!(err, CrawlError::ConverterError { .. }));
    }
}
