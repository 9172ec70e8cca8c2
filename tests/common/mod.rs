//! Shared fixtures for the controller integration tests.
//!
//! `InMemoryGateway` mirrors the remote service's semantics — server-side
//! filtering, sorting, 1-based pagination, server-assigned ids and
//! timestamps — so the controllers can be exercised end to end without a
//! network. Per-search delays make response-ordering tests deterministic
//! under tokio's paused clock.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use parking_lot::Mutex;

use argus::{
    ArgusError, Issue, IssueCreate, IssueGateway, IssuePriority, IssueStatus, IssueUpdate,
    Navigator, PagedResult, QueryState, Result, SortDir, SortKey,
};

struct StoreState {
    next_id: u64,
    issues: BTreeMap<u64, Issue>,
    clock: u64,
}

pub struct InMemoryGateway {
    state: Mutex<StoreState>,
    delays: Mutex<HashMap<String, Duration>>,
    create_delay: Mutex<Option<Duration>>,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self {
            state: Mutex::new(StoreState {
                next_id: 1,
                issues: BTreeMap::new(),
                clock: 0,
            }),
            delays: Mutex::new(HashMap::new()),
            create_delay: Mutex::new(None),
        }
    }
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay `list` responses whose search text equals `search`.
    pub fn delay_search(&self, search: &str, delay: Duration) {
        self.delays.lock().insert(search.to_string(), delay);
    }

    /// Delay every `create` call.
    pub fn delay_create(&self, delay: Duration) {
        *self.create_delay.lock() = Some(delay);
    }

    /// Seed `count` issues titled "Issue 01".."Issue NN".
    pub async fn seed(&self, count: usize) {
        for i in 1..=count {
            self.create(&IssueCreate {
                title: format!("Issue {i:02}"),
                ..Default::default()
            })
            .await
            .expect("seed create failed");
        }
    }
}

/// Strictly increasing, jiff-parseable timestamps off a logical clock.
fn tick(clock: &mut u64) -> String {
    *clock += 1;
    format!("2024-06-01T00:00:00.{:09}Z", *clock)
}

fn sort_items(items: &mut [Issue], key: SortKey, dir: SortDir) {
    items.sort_by(|a, b| {
        let ord = match key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Status => a.status.to_string().cmp(&b.status.to_string()),
            SortKey::Priority => a.priority.to_string().cmp(&b.priority.to_string()),
            SortKey::Assignee => {
                let left = a.assignee.clone().unwrap_or_default();
                let right = b.assignee.clone().unwrap_or_default();
                left.cmp(&right)
            }
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

impl IssueGateway for InMemoryGateway {
    async fn list(&self, query: &QueryState) -> Result<PagedResult<Issue>> {
        let delay = self.delays.lock().get(&query.search).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut items: Vec<Issue> = {
            let state = self.state.lock();
            state.issues.values().cloned().collect()
        };

        if !query.search.is_empty() {
            let needle = query.search.to_lowercase();
            items.retain(|i| i.title.to_lowercase().contains(&needle));
        }
        if let Some(status) = query.status {
            items.retain(|i| i.status == status);
        }
        if let Some(priority) = query.priority {
            items.retain(|i| i.priority == priority);
        }
        if !query.assignee.is_empty() {
            let needle = query.assignee.to_lowercase();
            items.retain(|i| {
                i.assignee
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase() == needle)
            });
        }

        let total = items.len() as u64;
        sort_items(&mut items, query.sort_by, query.sort_dir);

        let start = ((query.page - 1) as usize).saturating_mul(query.page_size as usize);
        let page_items: Vec<Issue> = items
            .into_iter()
            .skip(start)
            .take(query.page_size as usize)
            .collect();

        Ok(PagedResult {
            items: page_items,
            total,
            page: query.page,
            page_size: query.page_size,
        })
    }

    async fn get(&self, id: u64) -> Result<Issue> {
        self.state
            .lock()
            .issues
            .get(&id)
            .cloned()
            .ok_or(ArgusError::IssueNotFound(id))
    }

    async fn create(&self, payload: &IssueCreate) -> Result<Issue> {
        let delay = *self.create_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if payload.title.trim().is_empty() {
            return Err(ArgusError::Validation("title must not be empty".to_string()));
        }

        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let now = tick(&mut state.clock);
        let issue = Issue {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            status: payload.status.unwrap_or(IssueStatus::Open),
            priority: payload.priority.unwrap_or(IssuePriority::Medium),
            assignee: payload.assignee.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        state.issues.insert(id, issue.clone());
        Ok(issue)
    }

    async fn update(&self, id: u64, payload: &IssueUpdate) -> Result<Issue> {
        let mut state = self.state.lock();
        let mut issue = state
            .issues
            .get(&id)
            .cloned()
            .ok_or(ArgusError::IssueNotFound(id))?;

        if let Some(title) = &payload.title {
            if title.trim().is_empty() {
                return Err(ArgusError::Validation("title must not be empty".to_string()));
            }
            issue.title = title.clone();
        }
        if let Some(description) = &payload.description {
            issue.description = Some(description.clone());
        }
        if let Some(status) = payload.status {
            issue.status = status;
        }
        if let Some(priority) = payload.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = &payload.assignee {
            issue.assignee = Some(assignee.clone());
        }
        issue.updated_at = tick(&mut state.clock);

        state.issues.insert(id, issue.clone());
        Ok(issue)
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

/// Navigator that records every requested path.
#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.paths.lock().push(path.to_string());
    }
}
