use std::sync::Arc;

use owo_colors::OwoColorize;

use crate::commands::CliNavigator;
use crate::config::Config;
use crate::detail::{DetailController, SaveResult};
use crate::error::Result;
use crate::gateway::HttpGateway;
use crate::types::{IssuePriority, IssueStatus};

pub struct CreateOptions {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub assignee: Option<String>,
}

/// Create a new issue
pub async fn cmd_create(config: &Config, options: CreateOptions, output_json: bool) -> Result<()> {
    let gateway = Arc::new(HttpGateway::new(config)?);
    let controller = DetailController::open(gateway, CliNavigator, 0).await;

    controller.edit(|draft| {
        draft.title = options.title;
        if let Some(description) = options.description {
            draft.description = description;
        }
        if let Some(status) = options.status {
            draft.status = status;
        }
        if let Some(priority) = options.priority {
            draft.priority = priority;
        }
        if let Some(assignee) = options.assignee {
            draft.assignee = assignee;
        }
    });

    match controller.save().await {
        SaveResult::Saved(issue) => {
            if output_json {
                println!("{}", serde_json::to_string_pretty(&issue)?);
            } else {
                println!("{} created issue #{}: {}", "✓".green(), issue.id, issue.title);
            }
            Ok(())
        }
        SaveResult::Failed(error) => Err(error.into()),
        SaveResult::Ignored => Ok(()),
    }
}
