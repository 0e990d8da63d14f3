//! Freshness decisions and redirect-rejecting resource fetching.

pub mod fetch;
pub mod freshness;

pub use fetch::{cleanup, Fetcher};
pub use freshness::{is_modified, Freshness};
