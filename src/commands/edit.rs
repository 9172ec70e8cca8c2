use std::sync::Arc;

use owo_colors::OwoColorize;

use crate::commands::CliNavigator;
use crate::config::Config;
use crate::detail::{DetailController, DetailMode, SaveResult};
use crate::error::{ArgusError, Result};
use crate::gateway::HttpGateway;
use crate::types::{IssuePriority, IssueStatus};

#[derive(Default)]
pub struct EditOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub assignee: Option<String>,
}

/// Edit an existing issue. Only the fields given on the command line
/// overwrite the loaded draft; everything else is sent back unchanged.
pub async fn cmd_edit(
    config: &Config,
    id: u64,
    options: EditOptions,
    output_json: bool,
) -> Result<()> {
    let gateway = Arc::new(HttpGateway::new(config)?);
    let controller = DetailController::open(gateway, CliNavigator, id).await;

    if let DetailMode::LoadFailed(error) = controller.snapshot().mode {
        return Err(ArgusError::Other(error.to_string()));
    }

    controller.edit(|draft| {
        if let Some(title) = options.title {
            draft.title = title;
        }
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
                println!("{} updated issue #{}", "✓".green(), issue.id);
            }
            Ok(())
        }
        SaveResult::Failed(error) => Err(error.into()),
        SaveResult::Ignored => Ok(()),
    }
}
