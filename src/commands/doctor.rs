//! Doctor command
//!
//! Prints the resolved configuration and probes the issue service's health
//! endpoint so connectivity problems are diagnosed before anything else.

use owo_colors::OwoColorize;
use serde_json::json;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::{HttpGateway, IssueGateway};

/// Check configuration and service connectivity.
///
/// Returns Ok(healthy); callers map an unhealthy result to a nonzero exit
/// code.
pub async fn cmd_doctor(config: &Config, output_json: bool) -> Result<bool> {
    let gateway = HttpGateway::new(config)?;
    let health = gateway.health().await;
    let healthy = health.is_ok();

    if output_json {
        let output = json!({
            "baseUrl": config.base_url,
            "timeoutSecs": config.timeout_secs,
            "healthy": healthy,
            "error": health.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(healthy);
    }

    println!("\n{}", "Doctor - Service Health Check".bold());
    println!("{}", "=============================".bold());
    println!();
    println!("  Service URL: {}", config.base_url.cyan());
    println!("  Timeout:     {}s", config.timeout_secs);
    println!();

    match health {
        Ok(()) => println!("{} service is reachable", "✓".green()),
        Err(e) => {
            println!("{} service is unreachable", "✗".red());
            println!("    {}", e.to_string().dimmed());
        }
    }

    Ok(healthy)
}
