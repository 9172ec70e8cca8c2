//! Detail/edit controller: a small state machine over a single issue.
//!
//! Opening with id 0 starts a new issue; any other id loads the existing
//! one. `save()` dispatches create vs update based on the mode, excludes
//! server-owned fields from outgoing payloads, and leaves the draft intact
//! on failure so no user input is lost.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::error::ErrorKind;
use crate::gateway::IssueGateway;
use crate::types::{Issue, IssueCreate, IssuePriority, IssueStatus, IssueUpdate};
use crate::validator::DraftValidator;

/// Where the UI goes after a successful save.
pub const LIST_PATH: &str = "/";

/// Navigation collaborator. The core calls `go_to` after a successful save;
/// what that means (route change, printing, nothing) is up to the host.
pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn go_to(&self, path: &str) {
        (**self).go_to(path)
    }
}

/// The editable subset of an issue. Server-owned fields (`id`,
/// `createdAt`, `updatedAt`) have no representation here, so they cannot
/// leak into outgoing payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub assignee: String,
}

impl Default for IssueDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: IssueStatus::Open,
            priority: IssuePriority::Medium,
            assignee: String::new(),
        }
    }
}

impl IssueDraft {
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            description: issue.description.clone().unwrap_or_default(),
            status: issue.status,
            priority: issue.priority,
            assignee: issue.assignee.clone().unwrap_or_default(),
        }
    }

    /// Build the create payload. Empty optional text maps to absent.
    pub fn to_create_payload(&self) -> IssueCreate {
        IssueCreate {
            title: self.title.clone(),
            description: none_if_empty(&self.description),
            status: Some(self.status),
            priority: Some(self.priority),
            assignee: none_if_empty(&self.assignee),
        }
    }

    /// Build the update payload: always the complete editable subset, even
    /// for unchanged fields. `id` and `createdAt` never appear here.
    pub fn to_update_payload(&self) -> IssueUpdate {
        IssueUpdate {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            status: Some(self.status),
            priority: Some(self.priority),
            assignee: Some(self.assignee.clone()),
        }
    }
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Mode of the detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailMode {
    /// Fetching an existing issue.
    Loading,
    /// Composing an issue that does not exist yet.
    EditingNew,
    /// Modifying a fetched issue. The original is kept for its
    /// server-owned fields.
    EditingExisting(Issue),
    /// The initial fetch failed; terminal.
    LoadFailed(ErrorKind),
}

/// Display model for the detail view.
#[derive(Debug, Clone)]
pub struct DetailSnapshot {
    pub mode: DetailMode,
    pub draft: IssueDraft,
    pub error: Option<ErrorKind>,
    pub saving: bool,
}

/// Outcome of a `save()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveResult {
    /// The service accepted the payload; navigation has happened.
    Saved(Issue),
    /// Validation or the service rejected it; the draft is preserved.
    Failed(ErrorKind),
    /// Nothing to do: a save is already in flight, or the controller is
    /// not in an editable state.
    Ignored,
}

struct DetailInner {
    mode: DetailMode,
    draft: IssueDraft,
    error: Option<ErrorKind>,
    saving: bool,
}

impl DetailInner {
    fn snapshot(&self) -> DetailSnapshot {
        DetailSnapshot {
            mode: self.mode.clone(),
            draft: self.draft.clone(),
            error: self.error.clone(),
            saving: self.saving,
        }
    }
}

pub struct DetailController<G, N> {
    gateway: Arc<G>,
    navigator: N,
    inner: Mutex<DetailInner>,
    tx: watch::Sender<DetailSnapshot>,
}

impl<G: IssueGateway, N: Navigator> DetailController<G, N> {
    /// Open the detail view. Id 0 means create mode; anything else loads
    /// the existing issue before editing starts.
    pub async fn open(gateway: Arc<G>, navigator: N, id: u64) -> Self {
        let mode = if id == 0 {
            DetailMode::EditingNew
        } else {
            DetailMode::Loading
        };
        let inner = DetailInner {
            mode,
            draft: IssueDraft::default(),
            error: None,
            saving: false,
        };
        let (tx, _) = watch::channel(inner.snapshot());
        let controller = Self {
            gateway,
            navigator,
            inner: Mutex::new(inner),
            tx,
        };

        if id != 0 {
            controller.load(id).await;
        }
        controller
    }

    async fn load(&self, id: u64) {
        match self.gateway.get(id).await {
            Ok(issue) => {
                let mut inner = self.inner.lock();
                inner.draft = IssueDraft::from_issue(&issue);
                inner.mode = DetailMode::EditingExisting(issue);
                self.tx.send_replace(inner.snapshot());
            }
            Err(err) => {
                tracing::warn!(id, "failed to load issue: {err}");
                let mut inner = self.inner.lock();
                inner.mode = DetailMode::LoadFailed(ErrorKind::from(&err));
                self.tx.send_replace(inner.snapshot());
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        self.inner.lock().snapshot()
    }

    /// Mutate the draft. Ignored outside the editing states.
    pub fn edit(&self, apply: impl FnOnce(&mut IssueDraft)) {
        let mut inner = self.inner.lock();
        match inner.mode {
            DetailMode::EditingNew | DetailMode::EditingExisting(_) => {
                apply(&mut inner.draft);
                self.tx.send_replace(inner.snapshot());
            }
            _ => tracing::debug!("edit ignored outside editing state"),
        }
    }

    /// Submit the draft. Create or update is chosen by mode; at most one
    /// save is in flight at a time.
    pub async fn save(&self) -> SaveResult {
        let (target, draft) = {
            let mut inner = self.inner.lock();
            if inner.saving {
                return SaveResult::Ignored;
            }
            let target = match &inner.mode {
                DetailMode::EditingNew => None,
                DetailMode::EditingExisting(issue) => Some(issue.id),
                DetailMode::Loading | DetailMode::LoadFailed(_) => return SaveResult::Ignored,
            };

            let validation = DraftValidator::validate(&inner.draft);
            if let Some(message) = validation.error {
                let kind = ErrorKind::Validation(message);
                inner.error = Some(kind.clone());
                self.tx.send_replace(inner.snapshot());
                return SaveResult::Failed(kind);
            }

            inner.saving = true;
            inner.error = None;
            self.tx.send_replace(inner.snapshot());
            (target, inner.draft.clone())
        };

        let result = match target {
            None => self.gateway.create(&draft.to_create_payload()).await,
            Some(id) => self.gateway.update(id, &draft.to_update_payload()).await,
        };

        let mut inner = self.inner.lock();
        inner.saving = false;
        match result {
            Ok(issue) => {
                self.tx.send_replace(inner.snapshot());
                drop(inner);
                self.navigator.go_to(LIST_PATH);
                SaveResult::Saved(issue)
            }
            Err(err) => {
                tracing::warn!("save failed: {err}");
                let kind = ErrorKind::from(&err);
                inner.error = Some(kind.clone());
                self.tx.send_replace(inner.snapshot());
                SaveResult::Failed(kind)
            }
        }
    }
}
