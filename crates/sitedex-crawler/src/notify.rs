//! Optional Slack error notification, gated behind the `notify` feature.
//!
//! Generalizes the original `slack.py`'s attachment shape onto a plain
//! incoming-webhook POST, since a full bot-token chat API is unnecessary
//! weight for a one-way error ping and webhooks need no extra dependency
//! beyond the `reqwest` client the rest of the crawler already uses.

use sitedex_types::{CrawlError, Site};

pub struct SlackNotifier {
    webhook_url: String,
    http: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            http,
        }
    }

    /// Posts a single attachment describing `error` while crawling `site`.
    /// Failure to notify is itself only logged: a broken webhook must never
    /// abort a crawl.
    pub async fn notify_error(&self, site: &Site, error: &CrawlError) {
        let payload = serde_json::json!({
            "text": "Error while crawling external site indexes!",
            "attachments": [{
                "color": "danger",
                "fields": [
                    {"title": "Site", "value": site.url},
                    {"title": "Error", "value": error.to_string()},
                ],
            }],
        });

        let result = self.http.post(&self.webhook_url).json(&payload).send().await;
        match result {
            Ok(response) if !response.status().is_success() => {
                log::warn!("slack notification returned status {}", response.status());
            }
            Ok(_) => {}
            Err(e) => log::warn!("slack notification request failed: {e}"),
        }
    }
}
