//! Result type definitions

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search category understood by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    News,
    Images,
    Videos,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::News => "news",
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "news" => Ok(Self::News),
            "images" => Ok(Self::Images),
            "videos" => Ok(Self::Videos),
            other => Err(SearchError::invalid_argument(
                "category",
                format!("unrecognized category `{}`", other),
            )),
        }
    }
}

/// One discovered item, normalized from the backend's raw response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display title; falls back to the URL when the backend omits one
    pub title: String,
    /// Canonical resource identifier; dedup key source
    pub url: String,
    /// Descriptive text, when the backend provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Backend engine that produced this result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_engine: Option<String>,
    /// Category of the sub-query that found it
    pub category: Category,
    /// Publication date as reported by the backend (news/video results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// Direct media URL (image results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_src: Option<String>,
    /// Thumbnail URL (media results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl SearchResult {
    /// Create a new result with the required fields
    pub fn new(title: impl Into<String>, url: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: None,
            source_engine: None,
            category,
            published_date: None,
            media_src: None,
            thumbnail: None,
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.source_engine = Some(engine.into());
        self
    }
}

/// Ordered, deduplicated result set with aggregation metadata
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResultSet {
    /// Results in plan order, first-seen-wins deduplicated
    pub results: Vec<SearchResult>,
    /// Pre-dedup candidate count across all successful sub-queries
    pub total_considered: usize,
    /// Number of unique results kept; always `results.len()`
    pub unique_count: usize,
    /// Whether any unique candidate was dropped because the bound was hit
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for s in ["general", "news", "images", "videos"] {
            let cat: Category = s.parse().unwrap();
            assert_eq!(cat.as_str(), s);
        }
    }

    #[test]
    fn test_unknown_category_names_parameter() {
        let err = "shopping".parse::<Category>().unwrap_err();
        assert_eq!(err.parameter(), Some("category"));
        assert!(err.to_string().contains("shopping"));
    }

    #[test]
    fn test_result_builder() {
        let result = SearchResult::new("Rust Blog", "https://blog.rust-lang.org", Category::General)
            .with_snippet("Official Rust blog")
            .with_engine("duckduckgo");
        assert_eq!(result.source_engine.as_deref(), Some("duckduckgo"));
        assert!(result.media_src.is_none());
    }
}
