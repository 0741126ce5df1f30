//! HTTP networking module
//!
//! Client for the configured SearXNG instance and the backend trait seam
//! the aggregator dispatches through.

mod client;

pub use client::{SearchBackend, SearchClient};
