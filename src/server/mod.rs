//! MCP server module
//!
//! Tool registration, parameter validation, payload shaping and stdio
//! serving.

mod guidance;
mod tools;

pub use guidance::synthesis_guidance;
pub use tools::SearchService;

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};

/// Serve the tool facade over stdio until the client disconnects.
pub async fn serve_stdio(service: SearchService) -> Result<()> {
    let running = service.serve(stdio()).await?;
    running.waiting().await?;
    Ok(())
}
