//! CLI command implementations. Thin glue over the controllers: each
//! command builds a gateway from the resolved config, drives a controller,
//! and renders its display model. No orchestration logic lives here.

mod create;
mod doctor;
mod edit;
mod ls;
mod show;

pub use create::{CreateOptions, cmd_create};
pub use doctor::cmd_doctor;
pub use edit::{EditOptions, cmd_edit};
pub use ls::cmd_ls;
pub use show::cmd_show;

use owo_colors::OwoColorize;

use crate::detail::Navigator;
use crate::types::{IssuePriority, IssueStatus};

/// CLI stand-in for the host navigation service. There is no route to
/// change in a one-shot command, so navigation is recorded at debug level.
pub(crate) struct CliNavigator;

impl Navigator for CliNavigator {
    fn go_to(&self, path: &str) {
        tracing::debug!(path, "navigation requested");
    }
}

/// Render an ISO 8601 wire timestamp as a short date for display.
/// Unparseable values are shown as-is rather than dropped.
pub(crate) fn short_date(timestamp: &str) -> String {
    timestamp
        .parse::<jiff::Timestamp>()
        .map(|t| t.strftime("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

pub(crate) fn colored_status(status: IssueStatus) -> String {
    match status {
        IssueStatus::Open => status.to_string().green().to_string(),
        IssueStatus::InProgress => status.to_string().yellow().to_string(),
        IssueStatus::Resolved => status.to_string().blue().to_string(),
        IssueStatus::Closed => status.to_string().dimmed().to_string(),
    }
}

pub(crate) fn colored_priority(priority: IssuePriority) -> String {
    match priority {
        IssuePriority::Low => priority.to_string().dimmed().to_string(),
        IssuePriority::Medium => priority.to_string(),
        IssuePriority::High => priority.to_string().yellow().to_string(),
        IssuePriority::Critical => priority.to_string().red().to_string(),
    }
}
