//! Deterministic sub-query planning for research requests

use super::models::{Depth, ResearchPlan, SubQuery};
use crate::config::PlannerSettings;
use crate::results::Category;
use tracing::debug;

// Fallbacks when the configured qualifier list is too short.
const DEFAULT_QUALIFIERS: &[&str] = &["latest developments", "overview"];

/// Expands a topic into an ordered sequence of distinct sub-queries.
///
/// The slot table varies phrasing, category and engine subset so the
/// sub-queries are not near-duplicates of each other. For identical
/// `(topic, depth, category_hint)` the plan is always identical — no
/// randomness anywhere.
#[derive(Debug, Clone)]
pub struct Planner {
    settings: PlannerSettings,
}

impl Planner {
    pub fn new(settings: PlannerSettings) -> Self {
        Self { settings }
    }

    /// Build a plan of exactly `depth.sub_query_count()` sub-queries.
    ///
    /// `category_hint` seeds the first slot's category; the remaining slots
    /// keep their table categories to preserve source diversity.
    pub fn plan(&self, topic: &str, depth: Depth, category_hint: Option<Category>) -> ResearchPlan {
        let cap = depth.per_search_cap();
        let first_category = category_hint.unwrap_or(Category::General);

        let slots = [
            // Literal topic on the primary engine subset
            SubQuery::new(topic, first_category, cap)
                .with_engines(self.settings.primary_engines.clone()),
            // Literal topic against news on the backend's default engines
            SubQuery::new(topic, Category::News, cap),
            // Same topic, alternate engine subset
            SubQuery::new(topic, Category::General, cap)
                .with_engines(self.settings.secondary_engines.clone()),
            // Qualified phrasing against news
            SubQuery::new(self.qualified(topic, 0), Category::News, cap)
                .with_engines(self.settings.primary_engines.clone()),
            // Reference engines for background material
            SubQuery::new(topic, Category::General, cap)
                .with_engines(self.settings.reference_engines.clone()),
            // Qualified phrasing on the full default engine set
            SubQuery::new(self.qualified(topic, 1), Category::General, cap),
        ];

        let sub_queries: Vec<SubQuery> = slots
            .into_iter()
            .take(depth.sub_query_count())
            .collect();

        debug!(
            "Planned {} sub-queries for '{}' at depth {}",
            sub_queries.len(),
            topic,
            depth
        );

        ResearchPlan::new(topic, depth, sub_queries)
    }

    fn qualified(&self, topic: &str, index: usize) -> String {
        let qualifier = self
            .settings
            .qualifiers
            .get(index)
            .map(String::as_str)
            .unwrap_or(DEFAULT_QUALIFIERS[index % DEFAULT_QUALIFIERS.len()]);
        format!("{} {}", topic, qualifier)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerSettings::default())
    }
}
