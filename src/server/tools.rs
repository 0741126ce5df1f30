//! MCP tool facade
//!
//! Three entry points validate caller parameters, drive the planner and
//! aggregator, and shape the JSON payload returned to the calling agent.
//! Validation failures never reach the backend; they come back as structured
//! `ok: false` payloads naming the offending parameter.

use super::guidance::synthesis_guidance;
use crate::config::SearchSettings;
use crate::error::SearchError;
use crate::results::{AggregatedResultSet, Category};
use crate::search::{Aggregator, Depth, Planner, ResearchPlan, SubQuery};
use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// What to search for
    pub query: String,
    /// "general" for web search, "news" for news articles (default: general)
    pub category: Option<String>,
    /// Comma-separated engine list, e.g. "google,bing"
    pub engines: Option<String>,
    /// Number of results, 1 to 50 (default: 10)
    pub max_results: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchMediaArgs {
    /// What to find
    pub query: String,
    /// "images" or "videos" (default: images)
    pub media_type: Option<String>,
    /// Comma-separated engine list
    pub engines: Option<String>,
    /// Number of results, 1 to 50 (default: 10)
    pub max_results: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ResearchArgs {
    /// Research topic or question
    pub query: String,
    /// Research thoroughness: "quick" (2 searches), "standard" (4, default)
    /// or "deep" (6)
    pub depth: Option<String>,
}

/// The MCP service exposing the search tools
#[derive(Clone)]
pub struct SearchService {
    tool_router: ToolRouter<Self>,
    aggregator: Arc<Aggregator>,
    planner: Planner,
    limits: SearchSettings,
}

#[tool_router]
impl SearchService {
    pub fn new(aggregator: Arc<Aggregator>, planner: Planner, limits: SearchSettings) -> Self {
        Self {
            tool_router: Self::tool_router(),
            aggregator,
            planner,
            limits,
        }
    }

    #[tool(
        description = "Quick search for web or news content. Runs a SINGLE \
search and returns up to max_results (default 10). Use research_topic \
instead for comprehensive multi-source research. Parameters: query \
(required), category (general|news), engines (comma-separated), \
max_results (1-50)."
    )]
    async fn search(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        match self.run_search(args).await {
            Ok(payload) => Ok(tool_result(payload)),
            Err(err) => Ok(error_result(&err)),
        }
    }

    #[tool(
        description = "Search for images or videos. Parameters: query \
(required), media_type (images|videos), engines (comma-separated), \
max_results (1-50). Returns media URLs with thumbnails and source pages."
    )]
    async fn search_media(
        &self,
        Parameters(args): Parameters<SearchMediaArgs>,
    ) -> Result<CallToolResult, McpError> {
        match self.run_search_media(args).await {
            Ok(payload) => Ok(tool_result(payload)),
            Err(err) => Ok(error_result(&err)),
        }
    }

    #[tool(
        description = "Deep research with multiple searches and source \
deduplication. Runs 2-6 searches across different categories and engine \
subsets, merges and deduplicates the results, and returns 15-50 unique \
sources plus synthesis instructions. Parameters: query (required), depth \
(quick|standard|deep, default standard)."
    )]
    async fn research_topic(
        &self,
        Parameters(args): Parameters<ResearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        match self.run_research(args).await {
            Ok(payload) => Ok(tool_result(payload)),
            Err(err) => Ok(error_result(&err)),
        }
    }

    async fn run_search(&self, args: SearchArgs) -> Result<serde_json::Value, SearchError> {
        let query = validate_query(&args.query)?;
        let category = parse_web_category(args.category.as_deref())?;
        let bound = validate_max_results(args.max_results, &self.limits)?;

        let mut sub_query = SubQuery::new(query, category, bound);
        if let Some(engines) = parse_engines(args.engines.as_deref()) {
            sub_query = sub_query.with_engines(engines);
        }

        // Dedup is a no-op for a well-behaved backend here, but a plan of
        // length 1 still goes through the same merge path for safety.
        let plan = ResearchPlan::single(sub_query);
        let set = self.aggregator.aggregate(&plan, bound).await?;

        info!("search '{}' returned {} results", query, set.unique_count);
        Ok(result_payload(query, category, &set))
    }

    async fn run_search_media(
        &self,
        args: SearchMediaArgs,
    ) -> Result<serde_json::Value, SearchError> {
        let query = validate_query(&args.query)?;
        let category = parse_media_category(args.media_type.as_deref())?;
        let bound = validate_max_results(args.max_results, &self.limits)?;

        let mut sub_query = SubQuery::new(query, category, bound);
        if let Some(engines) = parse_engines(args.engines.as_deref()) {
            sub_query = sub_query.with_engines(engines);
        }

        let plan = ResearchPlan::single(sub_query);
        let set = self.aggregator.aggregate(&plan, bound).await?;

        info!(
            "search_media '{}' ({}) returned {} results",
            query, category, set.unique_count
        );
        Ok(result_payload(query, category, &set))
    }

    async fn run_research(&self, args: ResearchArgs) -> Result<serde_json::Value, SearchError> {
        let query = validate_query(&args.query)?;
        let depth: Depth = args.depth.as_deref().unwrap_or("standard").parse()?;

        let plan = self.planner.plan(query, depth, None);
        let bound = depth.result_bound().min(self.limits.max_results);
        let set = self.aggregator.aggregate(&plan, bound).await?;

        info!(
            "research_topic '{}' ({}): {} unique sources from {} searches",
            query,
            depth,
            set.unique_count,
            plan.len()
        );

        let mut payload = result_payload(query, Category::General, &set);
        payload["depth"] = json!(depth.as_str());
        payload["searches_run"] = json!(plan.len());
        payload["guidance"] = json!(synthesis_guidance(depth));
        Ok(payload)
    }
}

#[tool_handler]
impl rmcp::ServerHandler for SearchService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Search tools backed by a SearXNG metasearch instance. Use \
`search` for quick lookups, `search_media` for images and videos, and \
`research_topic` for multi-search research with deduplicated sources."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn validate_query(query: &str) -> Result<&str, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::invalid_argument(
            "query",
            "must be a non-empty string",
        ));
    }
    Ok(trimmed)
}

fn validate_max_results(
    requested: Option<usize>,
    limits: &SearchSettings,
) -> Result<usize, SearchError> {
    let bound = requested.unwrap_or(limits.default_results);
    if bound < 1 || bound > limits.max_results {
        return Err(SearchError::invalid_argument(
            "max_results",
            format!("must be between 1 and {}", limits.max_results),
        ));
    }
    Ok(bound)
}

fn parse_web_category(category: Option<&str>) -> Result<Category, SearchError> {
    match category.unwrap_or("general").parse::<Category>()? {
        c @ (Category::General | Category::News) => Ok(c),
        other => Err(SearchError::invalid_argument(
            "category",
            format!("`{}` is not searchable here; use search_media", other),
        )),
    }
}

fn parse_media_category(media_type: Option<&str>) -> Result<Category, SearchError> {
    match media_type.unwrap_or("images") {
        "images" => Ok(Category::Images),
        "videos" => Ok(Category::Videos),
        other => Err(SearchError::invalid_argument(
            "media_type",
            format!("unrecognized media type `{}`", other),
        )),
    }
}

fn parse_engines(engines: Option<&str>) -> Option<Vec<String>> {
    let list: Vec<String> = engines?
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from)
        .collect();
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

fn result_payload(query: &str, category: Category, set: &AggregatedResultSet) -> serde_json::Value {
    json!({
        "ok": true,
        "query": query,
        "category": category.as_str(),
        "results": set.results,
        "total_considered": set.total_considered,
        "unique_count": set.unique_count,
        "truncated": set.truncated,
    })
}

/// Structured content plus a text fallback for clients that only read
/// `content[0].text`.
fn tool_result(payload: serde_json::Value) -> CallToolResult {
    let mut result = CallToolResult::structured(payload.clone());
    result.content = vec![Content::text(payload.to_string())];
    result
}

fn error_result(err: &SearchError) -> CallToolResult {
    let mut error = json!({
        "kind": err.kind(),
        "message": err.to_string(),
    });
    if let Some(parameter) = err.parameter() {
        error["parameter"] = json!(parameter);
    }
    tool_result(json!({ "ok": false, "error": error }))
}
