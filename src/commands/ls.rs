use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::commands::{colored_priority, colored_status, short_date};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::HttpGateway;
use crate::list::ListController;
use crate::query::QueryState;
use crate::types::Issue;

/// A row in the issue list table
#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl IssueRow {
    fn from_issue(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            title: issue.title.clone(),
            status: colored_status(issue.status),
            priority: colored_priority(issue.priority),
            assignee: issue.assignee.clone().unwrap_or_default(),
            updated: short_date(&issue.updated_at),
        }
    }
}

/// List issues matching the query
pub async fn cmd_ls(config: &Config, query: QueryState, output_json: bool) -> Result<()> {
    let gateway = Arc::new(HttpGateway::new(config)?);
    let controller = ListController::with_query(gateway, query);
    controller.refresh().await;

    let snapshot = controller.snapshot();
    if let Some(error) = snapshot.error {
        return Err(error.into());
    }

    if output_json {
        let output = serde_json::json!({
            "items": snapshot.items,
            "total": snapshot.total,
            "page": snapshot.query.page,
            "pageSize": snapshot.query.page_size,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if snapshot.items.is_empty() {
        println!("No issues match the current filters.");
        return Ok(());
    }

    let rows: Vec<IssueRow> = snapshot.items.iter().map(IssueRow::from_issue).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let pages = snapshot.total.div_ceil(snapshot.query.page_size as u64).max(1);
    println!(
        "Page {} of {} ({} issue(s) total)",
        snapshot.query.page,
        pages,
        snapshot.total.to_string().bold()
    );

    Ok(())
}
