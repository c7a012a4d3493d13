//! Print the catalog an MCP server exposes, as the model will see it.
//!
//! Run with: cargo run --example list_tools -- python example2_gmail.py

use runtime::{McpToolHost, ToolHost, render_catalog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "python".to_string());
    let server_args: Vec<String> = args.collect();

    println!("Spawning MCP server: {command} {server_args:?}");
    let host = McpToolHost::spawn(&command, &server_args).await?;

    let tools = host.list_tools().await?;
    println!("\nDiscovered {} tools:\n{}", tools.len(), render_catalog(&tools));

    host.shutdown().await?;
    Ok(())
}
