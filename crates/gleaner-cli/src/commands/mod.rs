//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod import;

use std::path::Path;

use gleaner_core::GleanerConfig;

/// Load the configuration named on the command line, or the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GleanerConfig> {
    let config = if let Some(path) = config_path {
        GleanerConfig::from_file(Path::new(path))?
    } else {
        GleanerConfig::default()
    };
    Ok(config)
}
