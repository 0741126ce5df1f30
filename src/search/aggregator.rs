//! Plan execution, merging and deduplication

use super::models::ResearchPlan;
use crate::error::SearchError;
use crate::network::SearchBackend;
use crate::results::{dedup_key, AggregatedResultSet, SearchResult};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes every sub-query in a plan and assembles one bounded result set.
///
/// Dispatch is concurrent, but each sub-query's results are buffered and
/// merged in plan order afterwards, so the final ordering does not depend on
/// completion order. Within a sub-query the backend's relevance order is
/// preserved; no re-ranking happens here.
pub struct Aggregator {
    backend: Arc<dyn SearchBackend>,
    /// Hard cap any requested bound is clamped to
    max_bound: usize,
}

impl Aggregator {
    pub fn new(backend: Arc<dyn SearchBackend>, max_bound: usize) -> Self {
        Self {
            backend,
            max_bound: max_bound.max(1),
        }
    }

    /// Run the plan and merge results, deduplicated first-seen-wins by
    /// normalized URL and truncated to `result_bound`.
    ///
    /// Individual sub-query failures are tolerated; the call fails only when
    /// every sub-query fails.
    pub async fn aggregate(
        &self,
        plan: &ResearchPlan,
        result_bound: usize,
    ) -> Result<AggregatedResultSet, SearchError> {
        let bound = result_bound.clamp(1, self.max_bound);

        info!(
            "Dispatching {} sub-queries for '{}' (bound: {})",
            plan.len(),
            plan.topic(),
            bound
        );

        let futures: Vec<_> = plan
            .sub_queries()
            .iter()
            .map(|sub| self.backend.execute(sub))
            .collect();

        // join_all preserves plan order regardless of completion order.
        let outcomes = join_all(futures).await;

        let mut batches: Vec<Vec<SearchResult>> = Vec::with_capacity(outcomes.len());
        let mut failures = 0usize;
        for (sub, outcome) in plan.sub_queries().iter().zip(outcomes) {
            match outcome {
                Ok(results) => {
                    debug!(
                        "Sub-query '{}' ({}) returned {} results",
                        sub.query_text,
                        sub.category,
                        results.len()
                    );
                    batches.push(results);
                }
                Err(e) => {
                    warn!("Sub-query '{}' failed: {}", sub.query_text, e);
                    failures += 1;
                }
            }
        }

        if failures == plan.len() {
            return Err(SearchError::AllSourcesFailed {
                attempted: plan.len(),
            });
        }

        Ok(merge(batches, bound))
    }
}

/// Merge buffered batches in plan order, first-seen-wins on the dedup key.
fn merge(batches: Vec<Vec<SearchResult>>, bound: usize) -> AggregatedResultSet {
    let mut seen: HashSet<String> = HashSet::new();
    let mut results: Vec<SearchResult> = Vec::new();
    let mut total_considered = 0usize;
    let mut truncated = false;

    for batch in batches {
        for result in batch {
            total_considered += 1;
            let key = dedup_key(&result.url);
            if seen.contains(&key) {
                continue;
            }
            if results.len() >= bound {
                // A unique candidate dropped purely because of the bound.
                truncated = true;
                continue;
            }
            seen.insert(key);
            results.push(result);
        }
    }

    let unique_count = results.len();
    AggregatedResultSet {
        results,
        total_considered,
        unique_count,
        truncated,
    }
}
