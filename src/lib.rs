pub mod commands;
pub mod config;
pub mod detail;
pub mod error;
pub mod gateway;
pub mod list;
pub mod query;
pub mod types;
pub mod validator;

pub use config::Config;
pub use detail::{
    DetailController, DetailMode, DetailSnapshot, IssueDraft, Navigator, SaveResult,
};
pub use error::{ArgusError, ErrorKind, Result};
pub use gateway::{HttpGateway, IssueGateway};
pub use list::{ListController, ListSnapshot};
pub use query::{Filter, QueryState, SortDir, SortKey, VALID_SORT_KEYS};
pub use types::{
    Issue, IssueCreate, IssuePriority, IssueStatus, IssueUpdate, PagedResult, VALID_PRIORITIES,
    VALID_STATUSES,
};
