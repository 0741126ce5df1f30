//! SearXNG-MCP: MCP server exposing SearXNG metasearch tools
//!
//! Exposes three search tools to LLM-driven clients over the Model Context
//! Protocol, delegating execution to a configured SearXNG instance: quick
//! web/news search, media search, and multi-pass research with cross-engine
//! deduplication.

pub mod config;
pub mod error;
pub mod network;
pub mod results;
pub mod search;
pub mod server;

pub use config::Settings;
pub use error::SearchError;
pub use network::{SearchBackend, SearchClient};
pub use results::{AggregatedResultSet, Category, SearchResult};
pub use search::{Aggregator, Depth, Planner, ResearchPlan, SubQuery};
pub use server::SearchService;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default backend request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Hard cap on results per tool call
pub const MAX_RESULTS: usize = 50;
