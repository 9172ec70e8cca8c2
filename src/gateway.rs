//! Gateway to the remote issue-tracking service.
//!
//! Translates logical operations (list, get, create, update) into HTTP/JSON
//! requests and classifies failures into the crate error taxonomy. The
//! gateway holds no state beyond the shared HTTP client and is safe to use
//! from concurrent callers; it never recovers errors locally.

use std::future::Future;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ArgusError, Result};
use crate::query::QueryState;
use crate::types::{Issue, IssueCreate, IssueUpdate, PagedResult};

/// Operations the controllers need from the remote service.
///
/// The trait is the seam for tests: controllers are generic over it and the
/// integration suite substitutes an in-memory implementation.
pub trait IssueGateway: Send + Sync {
    /// Fetch one page of issues matching the query.
    fn list(
        &self,
        query: &QueryState,
    ) -> impl Future<Output = Result<PagedResult<Issue>>> + Send;

    /// Fetch a single issue by id.
    fn get(&self, id: u64) -> impl Future<Output = Result<Issue>> + Send;

    /// Create a new issue. The server assigns id and timestamps.
    fn create(&self, payload: &IssueCreate) -> impl Future<Output = Result<Issue>> + Send;

    /// Apply a partial update to an existing issue.
    fn update(
        &self,
        id: u64,
        payload: &IssueUpdate,
    ) -> impl Future<Output = Result<Issue>> + Send;

    /// Connectivity probe against the service's health endpoint.
    fn health(&self) -> impl Future<Output = Result<()>> + Send;
}

/// HTTP implementation of [`IssueGateway`] over reqwest.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: String,
}

impl HttpGateway {
    /// Build a gateway from resolved configuration. The base URL is
    /// validated here, once, rather than on every request.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ArgusError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn issues_url(&self) -> String {
        format!("{}/issues", self.base)
    }

    fn issue_url(&self, id: u64) -> String {
        format!("{}/issues/{}", self.base, id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(transport_error)
    }

    /// Read a successful JSON body, or classify the failure status.
    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(self.classify(status, response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ArgusError::Transport(format!("malformed response body: {e}")))
    }

    async fn classify(&self, status: StatusCode, response: Response) -> ArgusError {
        let body = response.text().await.unwrap_or_default();
        let err = classify_failure(status.as_u16(), extract_detail(&body));
        tracing::warn!("request failed: {err}");
        err
    }
}

impl IssueGateway for HttpGateway {
    async fn list(&self, query: &QueryState) -> Result<PagedResult<Issue>> {
        tracing::debug!(page = query.page, "listing issues");
        let response = self
            .send(
                self.client
                    .get(self.issues_url())
                    .query(&query.to_query_params()),
            )
            .await?;
        self.read_json(response).await
    }

    async fn get(&self, id: u64) -> Result<Issue> {
        tracing::debug!(id, "fetching issue");
        let response = self.send(self.client.get(self.issue_url(id))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ArgusError::IssueNotFound(id));
        }
        self.read_json(response).await
    }

    async fn create(&self, payload: &IssueCreate) -> Result<Issue> {
        tracing::debug!(title = %payload.title, "creating issue");
        let response = self
            .send(self.client.post(self.issues_url()).json(payload))
            .await?;
        self.read_json(response).await
    }

    async fn update(&self, id: u64, payload: &IssueUpdate) -> Result<Issue> {
        tracing::debug!(id, "updating issue");
        let response = self
            .send(self.client.put(self.issue_url(id)).json(payload))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ArgusError::IssueNotFound(id));
        }
        self.read_json(response).await
    }

    async fn health(&self) -> Result<()> {
        let response = self
            .send(self.client.get(format!("{}/health", self.base)))
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.classify(status, response).await)
        }
    }
}

fn transport_error(e: reqwest::Error) -> ArgusError {
    if e.is_timeout() {
        ArgusError::Transport(format!("request timed out: {e}"))
    } else {
        ArgusError::Transport(e.to_string())
    }
}

/// Map a non-success HTTP status to the error taxonomy. 404 is handled by
/// the callers that know which id was asked for; any other status that is
/// not a request-shape problem counts as a server failure.
fn classify_failure(status: u16, detail: String) -> ArgusError {
    match status {
        400 | 422 => ArgusError::Validation(detail),
        _ => ArgusError::Server(status, detail),
    }
}

/// Pull the human-readable message out of an error body. The service wraps
/// messages as `{"detail": "..."}`; anything else is passed through raw.
fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(detail) = value.get("detail").and_then(|d| d.as_str())
    {
        return detail.to_string();
    }
    if body.is_empty() {
        "no response body".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_validation_statuses() {
        assert!(matches!(
            classify_failure(422, "title required".to_string()),
            ArgusError::Validation(msg) if msg == "title required"
        ));
        assert!(matches!(
            classify_failure(400, "bad".to_string()),
            ArgusError::Validation(_)
        ));
    }

    #[test]
    fn test_classify_server_statuses() {
        assert!(matches!(
            classify_failure(500, "boom".to_string()),
            ArgusError::Server(500, _)
        ));
        assert!(matches!(
            classify_failure(503, String::new()),
            ArgusError::Server(503, _)
        ));
    }

    #[test]
    fn test_extract_detail_from_json_body() {
        assert_eq!(
            extract_detail(r#"{"detail": "Issue not found"}"#),
            "Issue not found"
        );
    }

    #[test]
    fn test_extract_detail_passthrough() {
        assert_eq!(extract_detail("plain text error"), "plain text error");
        assert_eq!(extract_detail(""), "no response body");
        // JSON without a detail key falls through to the raw body
        assert_eq!(extract_detail(r#"{"error": "x"}"#), r#"{"error": "x"}"#);
    }

    #[test]
    fn test_gateway_url_building() {
        let config = Config {
            base_url: "http://127.0.0.1:8000/".to_string(),
            ..Default::default()
        };
        let gateway = HttpGateway::new(&config).unwrap();
        assert_eq!(gateway.issues_url(), "http://127.0.0.1:8000/issues");
        assert_eq!(gateway.issue_url(7), "http://127.0.0.1:8000/issues/7");
    }

    #[test]
    fn test_gateway_rejects_invalid_base_url() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(HttpGateway::new(&config).is_err());
    }
}
