//! Shared utilities: timestamp conversion, content-type/gzip handling, and
//! whitespace normalization used across the crawler's crates.

pub mod content;
pub mod time;

pub use content::{get_content_type, gunzip, is_gzipped, normalize_whitespace};
pub use time::{from_http_datetime, from_iso_datetime, to_http_datetime, to_iso_datetime, to_utc};
