//! List view controller: orchestrates the query state and the gateway.
//!
//! Every query mutation funnels through [`ListController::mutate`], which
//! snapshots the state, issues a `list` request, and reconciles the
//! response. Responses are tagged with a monotonically increasing request
//! version; a response whose version is no longer the latest is discarded.
//! Without this, two rapidly issued requests (typing in a search box) can
//! resolve out of order and leave the display showing a stale filter's
//! results.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::error::ErrorKind;
use crate::gateway::IssueGateway;
use crate::query::{Filter, QueryState, SortKey};
use crate::types::Issue;

/// Display model published to the view on every state change.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    pub items: Vec<Issue>,
    pub total: u64,
    pub loading: bool,
    pub error: Option<ErrorKind>,
    pub query: QueryState,
}

struct ListInner {
    items: Vec<Issue>,
    total: u64,
    loading: bool,
    error: Option<ErrorKind>,
    query: QueryState,
    request_version: u64,
}

impl ListInner {
    fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            items: self.items.clone(),
            total: self.total,
            loading: self.loading,
            error: self.error.clone(),
            query: self.query.clone(),
        }
    }
}

pub struct ListController<G> {
    gateway: Arc<G>,
    inner: Mutex<ListInner>,
    tx: watch::Sender<ListSnapshot>,
}

impl<G: IssueGateway> ListController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_query(gateway, QueryState::default())
    }

    pub fn with_query(gateway: Arc<G>, query: QueryState) -> Self {
        let inner = ListInner {
            items: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            query,
            request_version: 0,
        };
        let (tx, _) = watch::channel(inner.snapshot());
        Self {
            gateway,
            inner: Mutex::new(inner),
            tx,
        }
    }

    /// Subscribe to display-model updates. The receiver always holds the
    /// latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.tx.subscribe()
    }

    /// Current display model.
    pub fn snapshot(&self) -> ListSnapshot {
        self.inner.lock().snapshot()
    }

    /// Apply a query mutation and reconcile the resulting `list` response.
    ///
    /// The lock is never held across the gateway call; the version check on
    /// re-acquisition is what keeps the observable result consistent with
    /// mutation order.
    pub async fn mutate(&self, apply: impl FnOnce(&mut QueryState)) {
        let (version, query) = {
            let mut inner = self.inner.lock();
            apply(&mut inner.query);
            inner.request_version += 1;
            inner.loading = true;
            inner.error = None;
            self.tx.send_replace(inner.snapshot());
            (inner.request_version, inner.query.clone())
        };

        let result = self.gateway.list(&query).await;

        let mut inner = self.inner.lock();
        if inner.request_version != version {
            tracing::debug!(
                version,
                latest = inner.request_version,
                "discarding superseded list response"
            );
            return;
        }
        match result {
            Ok(page) => {
                inner.items = page.items;
                inner.total = page.total;
                inner.loading = false;
            }
            Err(err) => {
                tracing::warn!("list request failed: {err}");
                inner.loading = false;
                inner.error = Some(ErrorKind::from(&err));
            }
        }
        self.tx.send_replace(inner.snapshot());
    }

    /// Re-run the current query without changing it. Used at initialization.
    pub async fn refresh(&self) {
        self.mutate(|_| {}).await;
    }

    pub async fn set_filter(&self, filter: Filter) {
        self.mutate(|q| q.set_filter(filter)).await;
    }

    pub async fn set_sort(&self, key: SortKey) {
        self.mutate(|q| q.set_sort(key)).await;
    }

    pub async fn set_page(&self, page: u32) {
        self.mutate(|q| q.set_page(page)).await;
    }

    pub async fn set_page_size(&self, page_size: u32) {
        self.mutate(|q| q.set_page_size(page_size)).await;
    }

    pub async fn reset_filters(&self) {
        self.mutate(|q| q.reset()).await;
    }
}
