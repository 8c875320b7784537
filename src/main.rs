//! Run Calories
//!
//! An MCP server for running-record calorie estimation.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use run_calories::build_info;
use run_calories::config::CalorieConfig;
use run_calories::mcp::CalorieService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("run_calories=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = CalorieConfig::from_env()?;
    if config.has_api_key() {
        info!(models = ?config.models, "GEMINI_API_KEY is set");
    } else {
        warn!("GEMINI_API_KEY is not set; meal calorie estimation will report not configured");
    }

    eprintln!("Starting MCP server on stdio...");

    let service = CalorieService::from_config(config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
