//! Declarative YAML configuration: the raw schema, its resolution into
//! domain types, and a file-loading entry point.

pub mod config;
pub mod loader;
pub mod raw;

pub use config::Config;
pub use loader::load;
pub use raw::{RawConfig, RawExtractor, RawField, RawFieldType, RawSite};
