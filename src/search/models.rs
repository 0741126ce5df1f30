//! Plan and sub-query data models

use crate::error::SearchError;
use crate::results::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Research thoroughness level.
///
/// Depth is a hard table lookup driving the sub-query count, the aggregate
/// result bound, and the per-search request cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Quick,
    Standard,
    Deep,
}

impl Depth {
    /// Number of sub-queries planned at this depth
    pub fn sub_query_count(&self) -> usize {
        match self {
            Self::Quick => 2,
            Self::Standard => 4,
            Self::Deep => 6,
        }
    }

    /// Aggregate unique-result bound at this depth
    pub fn result_bound(&self) -> usize {
        match self {
            Self::Quick => 15,
            Self::Standard => 30,
            Self::Deep => 50,
        }
    }

    /// Result-count hint sent with each individual sub-query
    pub fn per_search_cap(&self) -> usize {
        match self {
            Self::Quick | Self::Standard => 10,
            Self::Deep => 15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Standard => "standard",
            Self::Deep => "deep",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Depth {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(Self::Quick),
            "standard" => Ok(Self::Standard),
            "deep" => Ok(Self::Deep),
            other => Err(SearchError::InvalidDepth(other.to_string())),
        }
    }
}

/// A single planned search invocation.
///
/// Created by the planner, consumed exactly once by the aggregator, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubQuery {
    /// Query string sent to the backend; may differ from the caller's phrasing
    pub query_text: String,
    /// Backend category to search
    pub category: Category,
    /// Explicit engine subset; `None` means the backend's default set
    pub engines: Option<Vec<String>>,
    /// Result-count hint for this sub-query, always >= 1
    pub max_results: usize,
}

impl SubQuery {
    pub fn new(query_text: impl Into<String>, category: Category, max_results: usize) -> Self {
        Self {
            query_text: query_text.into(),
            category,
            engines: None,
            max_results: max_results.max(1),
        }
    }

    pub fn with_engines(mut self, engines: Vec<String>) -> Self {
        if !engines.is_empty() {
            self.engines = Some(engines);
        }
        self
    }
}

/// Ordered sequence of sub-queries for one research request.
///
/// Immutable once produced; the aggregator merges results in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchPlan {
    topic: String,
    depth: Depth,
    sub_queries: Vec<SubQuery>,
}

impl ResearchPlan {
    pub(crate) fn new(topic: impl Into<String>, depth: Depth, sub_queries: Vec<SubQuery>) -> Self {
        Self {
            topic: topic.into(),
            depth,
            sub_queries,
        }
    }

    /// Plan of length 1 — plain search goes through the same aggregation path
    pub fn single(sub_query: SubQuery) -> Self {
        Self {
            topic: sub_query.query_text.clone(),
            depth: Depth::Quick,
            sub_queries: vec![sub_query],
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn sub_queries(&self) -> &[SubQuery] {
        &self.sub_queries
    }

    pub fn len(&self) -> usize {
        self.sub_queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_queries.is_empty()
    }
}
