//! Orchestrates a full crawl run over a resolved [`sitedex_config::Config`]:
//! sitemap discovery, index reconciliation, and the per-URL
//! fetch/extract/index pipeline.

pub mod options;
pub mod orchestrator;

#[cfg(feature = "notify")]
pub mod notify;

pub use options::RunOptions;
pub use orchestrator::run;
