use clap::{Parser, Subcommand};
use std::process::ExitCode;

use argus::commands::{CreateOptions, EditOptions, cmd_create, cmd_doctor, cmd_edit, cmd_ls, cmd_show};
use argus::{
    Config, Filter, IssuePriority, IssueStatus, QueryState, SortDir, SortKey, VALID_PRIORITIES,
    VALID_SORT_KEYS, VALID_STATUSES,
};

#[derive(Parser)]
#[command(name = "argus")]
#[command(about = "Client for an HTTP issue-tracking service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List issues with search, filters, sorting, and pagination
    #[command(visible_alias = "l")]
    Ls {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (open, in_progress, resolved, closed)
        #[arg(long, value_parser = parse_status)]
        status: Option<IssueStatus>,

        /// Filter by priority (low, medium, high, critical)
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<IssuePriority>,

        /// Filter by assignee
        #[arg(short, long)]
        assignee: Option<String>,

        /// Sort key (default: updatedAt)
        #[arg(long, default_value = "updatedAt", value_parser = parse_sort_key)]
        sort: SortKey,

        /// Sort direction: asc or desc (default: desc)
        #[arg(long, default_value = "desc", value_parser = parse_sort_dir)]
        dir: SortDir,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Issues per page (default from config)
        #[arg(long)]
        page_size: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a single issue
    #[command(visible_alias = "s")]
    Show {
        /// Issue id
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new issue
    #[command(visible_alias = "c")]
    Create {
        /// Issue title
        title: String,

        /// Description text
        #[arg(short, long)]
        description: Option<String>,

        /// Status (default: open)
        #[arg(long, value_parser = parse_status)]
        status: Option<IssueStatus>,

        /// Priority (default: medium)
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<IssuePriority>,

        /// Assignee
        #[arg(short, long)]
        assignee: Option<String>,

        /// Output the created issue as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit an existing issue; only the given fields change
    Edit {
        /// Issue id
        id: u64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status
        #[arg(long, value_parser = parse_status)]
        status: Option<IssueStatus>,

        /// New priority
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<IssuePriority>,

        /// New assignee
        #[arg(short, long)]
        assignee: Option<String>,

        /// Output the updated issue as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check configuration and service connectivity
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_status(s: &str) -> Result<IssueStatus, String> {
    s.parse()
        .map_err(|_| format!("valid statuses: {}", VALID_STATUSES.join(", ")))
}

fn parse_priority(s: &str) -> Result<IssuePriority, String> {
    s.parse()
        .map_err(|_| format!("valid priorities: {}", VALID_PRIORITIES.join(", ")))
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse()
        .map_err(|_| format!("valid sort keys: {}", VALID_SORT_KEYS.join(", ")))
}

fn parse_sort_dir(s: &str) -> Result<SortDir, String> {
    s.parse().map_err(|_| "valid directions: asc, desc".to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Ls {
            search,
            status,
            priority,
            assignee,
            sort,
            dir,
            page,
            page_size,
            json,
        } => {
            let mut query = QueryState::with_page_size(page_size.unwrap_or(config.page_size));
            if let Some(search) = search {
                query.set_filter(Filter::Search(search));
            }
            if status.is_some() {
                query.set_filter(Filter::Status(status));
            }
            if priority.is_some() {
                query.set_filter(Filter::Priority(priority));
            }
            if let Some(assignee) = assignee {
                query.set_filter(Filter::Assignee(assignee));
            }
            query.sort_by = sort;
            query.sort_dir = dir;
            query.set_page(page);

            cmd_ls(&config, query, json).await
        }
        Commands::Show { id, json } => cmd_show(&config, id, json).await,
        Commands::Create {
            title,
            description,
            status,
            priority,
            assignee,
            json,
        } => {
            let options = CreateOptions {
                title,
                description,
                status,
                priority,
                assignee,
            };
            cmd_create(&config, options, json).await
        }
        Commands::Edit {
            id,
            title,
            description,
            status,
            priority,
            assignee,
            json,
        } => {
            let options = EditOptions {
                title,
                description,
                status,
                priority,
                assignee,
            };
            cmd_edit(&config, id, options, json).await
        }
        Commands::Doctor { json } => match cmd_doctor(&config, json).await {
            Ok(true) => Ok(()),
            Ok(false) => return ExitCode::FAILURE,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
