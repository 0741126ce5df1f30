//! Settings structures for the SearXNG MCP server

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, loaded from a YAML file with env overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub searxng: BackendSettings,
    pub search: SearchSettings,
    pub planner: PlannerSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SEARXNG_MCP_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SEARXNG_MCP_URL") {
            self.searxng.url = val;
        }
        if let Ok(val) = std::env::var("SEARXNG_MCP_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.searxng.timeout = secs;
            }
        }
        if let Ok(val) = std::env::var("SEARXNG_MCP_LOG_LEVEL") {
            self.logging.level = val;
        }
    }
}

/// SearXNG instance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the SearXNG instance
    pub url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Language code sent with every query
    pub language: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            timeout: 10,
            language: "en".to_string(),
        }
    }
}

/// Tool-level search bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Hard cap on results per tool call; requested bounds are clamped to this
    pub max_results: usize,
    /// Default result count when the caller does not ask for one
    pub default_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: 50,
            default_results: 10,
        }
    }
}

/// Sub-query variant policy for the research planner.
///
/// The planner's slot table draws on these groups in a fixed order, so the
/// engine subsets and phrasing variants are configurable while plan counts
/// and determinism stay invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// First engine subset tried for the literal topic
    pub primary_engines: Vec<String>,
    /// Alternate engine subset for the same topic
    pub secondary_engines: Vec<String>,
    /// Reference-oriented engines (encyclopedic sources)
    pub reference_engines: Vec<String>,
    /// Phrasing qualifiers appended to the topic for variant sub-queries
    pub qualifiers: Vec<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            primary_engines: vec!["google".to_string(), "bing".to_string()],
            secondary_engines: vec!["duckduckgo".to_string(), "brave".to_string()],
            reference_engines: vec!["wikipedia".to_string()],
            qualifiers: vec![
                "latest developments".to_string(),
                "overview".to_string(),
            ],
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.searxng.url, "http://localhost:8080");
        assert_eq!(settings.searxng.timeout, 10);
        assert_eq!(settings.search.max_results, 50);
        assert_eq!(settings.search.default_results, 10);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "searxng:\n  url: http://10.0.0.5:8888\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.searxng.url, "http://10.0.0.5:8888");
        assert_eq!(settings.searxng.timeout, 10);
        assert!(!settings.planner.primary_engines.is_empty());
    }

    #[test]
    fn test_default_planner_groups_are_disjoint() {
        let planner = PlannerSettings::default();
        for name in &planner.primary_engines {
            assert!(!planner.secondary_engines.contains(name));
            assert!(!planner.reference_engines.contains(name));
        }
    }
}
