use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default adaptive politeness delay, in milliseconds, before a site has
/// ever been rate-limited.
pub const DEFAULT_SLEEPTIME_MS: u64 = 100;

/// A crawl target: a base URL plus an attribute bag exposed to extractors,
/// and the adaptive politeness delay the fetcher backs off with on 429s.
#[derive(Debug)]
pub struct Site {
    pub url: String,
    pub attributes: HashMap<String, String>,
    sleeptime_ms: AtomicU64,
}

impl Site {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attributes: HashMap::new(),
            sleeptime_ms: AtomicU64::new(DEFAULT_SLEEPTIME_MS),
        }
    }

    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_sleeptime_ms(self, ms: u64) -> Self {
        self.sleeptime_ms.store(ms, Ordering::SeqCst);
        self
    }

    /// Current politeness delay in milliseconds.
    pub fn sleeptime_ms(&self) -> u64 {
        self.sleeptime_ms.load(Ordering::SeqCst)
    }

    /// Double the politeness delay after a rate-limit response. Never
    /// resets below the default within a run.
    pub fn double_sleeptime(&self) -> u64 {
        let mut current = self.sleeptime_ms.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_mul(2);
            match self.sleeptime_ms.compare_exchange_weak(
                current,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    /// Whether `url` falls under this site's base URL.
    pub fn owns(&self, url: &str) -> bool {
        url.starts_with(&self.url)
    }
}

impl Clone for Site {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            attributes: self.attributes.clone(),
            sleeptime_ms: AtomicU64::new(self.sleeptime_ms()),
        }
    }
}
