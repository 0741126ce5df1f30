//! Result types and URL deduplication
//!
//! Canonical result records and the normalized-URL key used to identify
//! duplicates across sub-queries.

mod dedup;
mod types;

pub use dedup::dedup_key;
pub use types::*;
