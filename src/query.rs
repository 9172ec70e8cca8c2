//! Filter, sort, and pagination state for the issue list.
//!
//! `QueryState` is a value type owned by the list controller. Every mutator
//! encodes a UI-level rule (a filter change invalidates the current page
//! position, changing page size resets the offset) and leaves the state
//! complete and valid. `to_query_params` is the single projection into
//! wire-level request parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ArgusError;
use crate::types::{IssuePriority, IssueStatus};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Fields the list can be sorted by, rendered as their camelCase wire tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    Title,
    Status,
    Priority,
    Assignee,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::Title => write!(f, "title"),
            SortKey::Status => write!(f, "status"),
            SortKey::Priority => write!(f, "priority"),
            SortKey::Assignee => write!(f, "assignee"),
            SortKey::CreatedAt => write!(f, "createdAt"),
            SortKey::UpdatedAt => write!(f, "updatedAt"),
        }
    }
}

impl FromStr for SortKey {
    type Err = ArgusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "status" => Ok(SortKey::Status),
            "priority" => Ok(SortKey::Priority),
            "assignee" => Ok(SortKey::Assignee),
            "createdAt" => Ok(SortKey::CreatedAt),
            "updatedAt" => Ok(SortKey::UpdatedAt),
            _ => Err(ArgusError::InvalidSortKey(s.to_string())),
        }
    }
}

pub const VALID_SORT_KEYS: &[&str] = &[
    "id",
    "title",
    "status",
    "priority",
    "assignee",
    "createdAt",
    "updatedAt",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn flip(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDir::Asc => write!(f, "asc"),
            SortDir::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDir {
    type Err = ArgusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            _ => Err(ArgusError::InvalidSortKey(s.to_string())),
        }
    }
}

/// A single filter assignment. `None` on the enum-valued filters means
/// "any"; an empty string on the text filters means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Search(String),
    Status(Option<IssueStatus>),
    Priority(Option<IssuePriority>),
    Assignee(String),
}

/// Client-held filter/sort/pagination parameters for the list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub search: String,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub assignee: String,
    pub sort_by: SortKey,
    pub sort_dir: SortDir,
    pub page: u32,
    pub page_size: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            priority: None,
            assignee: String::new(),
            sort_by: SortKey::UpdatedAt,
            sort_dir: SortDir::Desc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Default::default()
        }
    }

    /// Apply a filter change. Any filter change resets to page 1: the old
    /// page index is meaningless against a different result set.
    pub fn set_filter(&mut self, filter: Filter) {
        match filter {
            Filter::Search(text) => self.search = text,
            Filter::Status(status) => self.status = status,
            Filter::Priority(priority) => self.priority = priority,
            Filter::Assignee(name) => self.assignee = name,
        }
        self.page = 1;
    }

    /// Sorting on the current key flips the direction; a new key starts
    /// ascending. The page index is kept.
    pub fn set_sort(&mut self, key: SortKey) {
        if self.sort_by == key {
            self.sort_dir = self.sort_dir.flip();
        } else {
            self.sort_by = key;
            self.sort_dir = SortDir::Asc;
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Restore all filters to defaults and go back to page 1. Sort order
    /// and page size survive a reset.
    pub fn reset(&mut self) {
        self.search.clear();
        self.status = None;
        self.priority = None;
        self.assignee.clear();
        self.page = 1;
    }

    /// Project into wire-level query parameters.
    ///
    /// A key is included iff its value is present and not the empty
    /// sentinel. Sort and paging keys always carry a concrete value and are
    /// always included. Rendering is locale-independent: base-10 integers,
    /// canonical enum tokens.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(8);
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.to_string()));
        }
        if !self.assignee.is_empty() {
            params.push(("assignee", self.assignee.clone()));
        }
        params.push(("sortBy", self.sort_by.to_string()));
        params.push(("sortDir", self.sort_dir.to_string()));
        params.push(("page", self.page.to_string()));
        params.push(("pageSize", self.page_size.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_state() {
        let q = QueryState::default();
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 10);
        assert_eq!(q.sort_by, SortKey::UpdatedAt);
        assert_eq!(q.sort_dir, SortDir::Desc);
        assert!(q.search.is_empty());
        assert!(q.status.is_none());
    }

    #[test]
    fn test_query_params_skip_empty_filters() {
        let mut q = QueryState::default();
        q.status = Some(IssueStatus::Open);
        let params = q.to_query_params();

        assert!(param(&params, "search").is_none());
        assert!(param(&params, "assignee").is_none());
        assert!(param(&params, "priority").is_none());
        assert_eq!(param(&params, "status"), Some("open"));
        assert_eq!(param(&params, "page"), Some("1"));
        assert_eq!(param(&params, "pageSize"), Some("10"));
    }

    #[test]
    fn test_query_params_always_include_sort_and_paging() {
        let params = QueryState::default().to_query_params();
        assert_eq!(param(&params, "sortBy"), Some("updatedAt"));
        assert_eq!(param(&params, "sortDir"), Some("desc"));
        assert_eq!(param(&params, "page"), Some("1"));
        assert_eq!(param(&params, "pageSize"), Some("10"));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_query_params_include_set_filters() {
        let mut q = QueryState::default();
        q.set_filter(Filter::Search("login".to_string()));
        q.set_filter(Filter::Priority(Some(IssuePriority::Critical)));
        q.set_filter(Filter::Assignee("sam".to_string()));
        let params = q.to_query_params();

        assert_eq!(param(&params, "search"), Some("login"));
        assert_eq!(param(&params, "priority"), Some("critical"));
        assert_eq!(param(&params, "assignee"), Some("sam"));
    }

    #[test]
    fn test_set_filter_resets_page() {
        for filter in [
            Filter::Search("x".to_string()),
            Filter::Status(Some(IssueStatus::Closed)),
            Filter::Priority(None),
            Filter::Assignee("kim".to_string()),
        ] {
            let mut q = QueryState::default();
            q.set_page(7);
            q.set_filter(filter);
            assert_eq!(q.page, 1);
        }
    }

    #[test]
    fn test_set_sort_new_key_starts_ascending() {
        let mut q = QueryState::default();
        assert_eq!(q.sort_by, SortKey::UpdatedAt);
        assert_eq!(q.sort_dir, SortDir::Desc);

        q.set_sort(SortKey::Priority);
        assert_eq!(q.sort_by, SortKey::Priority);
        assert_eq!(q.sort_dir, SortDir::Asc);

        q.set_sort(SortKey::Priority);
        assert_eq!(q.sort_dir, SortDir::Desc);

        q.set_sort(SortKey::Priority);
        assert_eq!(q.sort_dir, SortDir::Asc);
    }

    #[test]
    fn test_set_sort_keeps_page() {
        let mut q = QueryState::default();
        q.set_page(3);
        q.set_sort(SortKey::Title);
        assert_eq!(q.page, 3);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut q = QueryState::default();
        q.set_page(5);
        q.set_page_size(50);
        assert_eq!(q.page_size, 50);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let mut q = QueryState::default();
        q.set_page(0);
        assert_eq!(q.page, 1);
        q.set_page_size(0);
        assert_eq!(q.page_size, 1);
    }

    #[test]
    fn test_reset_keeps_sort_and_page_size() {
        let mut q = QueryState::default();
        q.set_filter(Filter::Search("bug".to_string()));
        q.set_filter(Filter::Status(Some(IssueStatus::Resolved)));
        q.set_sort(SortKey::Priority);
        q.set_page_size(25);
        q.set_page(4);

        q.reset();
        assert!(q.search.is_empty());
        assert!(q.status.is_none());
        assert!(q.priority.is_none());
        assert!(q.assignee.is_empty());
        assert_eq!(q.page, 1);
        assert_eq!(q.sort_by, SortKey::Priority);
        assert_eq!(q.sort_dir, SortDir::Asc);
        assert_eq!(q.page_size, 25);
    }

    #[test]
    fn test_sort_key_tokens() {
        assert_eq!(SortKey::UpdatedAt.to_string(), "updatedAt");
        assert_eq!("createdAt".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
        assert!("updated_at".parse::<SortKey>().is_err());
    }
}
