//! Research orchestration module
//!
//! Plans sub-queries for a topic, executes them through the backend and
//! assembles bounded, deduplicated result sets.

mod aggregator;
mod models;
mod planner;

pub use aggregator::Aggregator;
pub use models::{Depth, ResearchPlan, SubQuery};
pub use planner::Planner;
