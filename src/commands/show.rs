use owo_colors::OwoColorize;
use serde_json::json;

use crate::commands::{colored_priority, colored_status, short_date};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{HttpGateway, IssueGateway};

/// Display a single issue
pub async fn cmd_show(config: &Config, id: u64, output_json: bool) -> Result<()> {
    let gateway = HttpGateway::new(config)?;
    let issue = gateway.get(id).await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&json!(issue))?);
        return Ok(());
    }

    println!("{} {}", format!("#{}", issue.id).dimmed(), issue.title.bold());
    println!();
    println!("  Status:   {}", colored_status(issue.status));
    println!("  Priority: {}", colored_priority(issue.priority));
    if let Some(assignee) = &issue.assignee {
        println!("  Assignee: {}", assignee.cyan());
    }
    println!("  Created:  {}", short_date(&issue.created_at).dimmed());
    println!("  Updated:  {}", short_date(&issue.updated_at).dimmed());

    if let Some(description) = &issue.description
        && !description.is_empty()
    {
        println!();
        println!("{description}");
    }

    Ok(())
}
