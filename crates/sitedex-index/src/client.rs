//! Client for the external search index (an Apache Solr-alike update/select
//! HTTP API).

use sitedex_types::{CrawlError, IndexRecord};

const UPDATE_HANDLER: &str = "update";

pub struct IndexClient {
    base_url: String,
    http: reqwest::Client,
}

impl IndexClient {
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

    fn update_url(&self) -> String {
        format!("{}/{UPDATE_HANDLER}?commit=true", self.base_url)
    }

    async fn post_update(&self, document: &serde_json::Value) {
        let result = self
            .http
            .post(self.update_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(document)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                log::warn!("index update returned status {}", response.status());
            }
            Ok(_) => {}
            Err(e) => log::warn!("index update request failed: {e}"),
        }
    }

    /// POSTs `[record]` to `<base>/update?commit=true`. Non-2xx responses
    /// and transport failures are logged, not raised: indexing one record
    /// failing should not abort the crawl.
    pub async fn index(&self, record: &IndexRecord) {
        let document = serde_json::Value::Array(vec![record.to_json()]);
        self.post_update(&document).await;
    }

    /// POSTs `{"delete":{"id": unique_id}}` to the same endpoint.
    pub async fn delete(&self, unique_id: &str) {
        let document = serde_json::json!({"delete": {"id": unique_id}});
        self.post_update(&document).await;
    }

    /// GETs `<base>/select?q=<query>&wt=json[&fl=<csv>]` and returns the
    /// `response.docs` array. Non-2xx raises an index-error.
    pub async fn search(
        &self,
        query: &str,
        fl: Option<&[&str]>,
    ) -> Result<Vec<serde_json::Value>, CrawlError> {
        let mut request = self
            .http
            .get(format!("{}/select", self.base_url))
            .query(&[("q", query), ("wt", "json")]);
        if let Some(fields) = fl {
            request = request.query(&[("fl", fields.join(","))]);
        }

        let response = request.send().await.map_err(|e| CrawlError::IndexError {
            detail: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(CrawlError::IndexError {
                detail: format!("search returned status {}", response.status()),
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| CrawlError::IndexError {
            detail: e.to_string(),
        })?;

        Ok(body
            .get("response")
            .and_then(|r| r.get("docs"))
            .and_then(|docs| docs.as_array())
            .cloned()
            .unwrap_or_default())
    }
}
