//! Reads a YAML configuration file from disk and resolves it into a
//! [`Config`], mirroring how the teacher's CLI loads its own YAML config
//! and layers command-line overrides on top.

use std::fs::File;
use std::path::Path;

use sitedex_types::CrawlError;

use crate::config::Config;
use crate::raw::RawConfig;

/// Loads and resolves a configuration file, with optional runtime
/// overrides for the converter and index base URLs.
pub fn load(
    path: &Path,
    tika_override: Option<String>,
    solr_override: Option<String>,
) -> Result<Config, CrawlError> {
    let file = File::open(path).map_err(|e| CrawlError::ConfigError {
        detail: format!("could not open {}: {e}", path.display()),
    })?;
    let raw: RawConfig = serde_yaml::from_reader(file).map_err(|e| CrawlError::ConfigError {
        detail: format!("could not parse {}: {e}", path.display()),
    })?;
    Config::from_raw(raw, tika_override, solr_override)
}
