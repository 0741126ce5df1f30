//! Configuration module for the SearXNG MCP server
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are passed explicitly at construction; there is no process-wide
//! settings state.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;

/// Discover and load settings.
///
/// Order: `SEARXNG_MCP_CONFIG` env var, then well-known paths, then built-in
/// defaults. Environment overrides are merged in every case. Runs before
/// logging is initialized (the log level lives in the settings), so the
/// chosen path is returned for the caller to report.
pub fn load_settings() -> Result<(Settings, Option<PathBuf>)> {
    if let Ok(path) = std::env::var("SEARXNG_MCP_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok((settings, Some(path)));
        }
    }

    let paths = [
        PathBuf::from("config.yml"),
        PathBuf::from("config/searxng-mcp.yml"),
        dirs::config_dir()
            .map(|p| p.join("searxng-mcp/config.yml"))
            .unwrap_or_default(),
    ];

    for path in paths {
        if path.exists() {
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok((settings, Some(path)));
        }
    }

    let mut settings = Settings::default();
    settings.merge_env();
    Ok((settings, None))
}
