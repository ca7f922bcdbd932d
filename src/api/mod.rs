//! REST client for the `/tasks` resource.
//!
//! The editor only ever needs three calls against a single record, so the
//! surface is deliberately small: [`TaskApi::get_task`],
//! [`TaskApi::put_task`] and [`TaskApi::delete_task`]. [`HttpTaskApi`] is
//! the reqwest implementation; tests and other frontends can supply their
//! own.

use std::time::Duration;

use tracing::debug;

use crate::models::Task;

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

/// The task backend as seen by the editor.
#[async_trait::async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /tasks/{id}`
    async fn get_task(&self, id: &str) -> Result<Task, ApiError>;

    /// `PUT /tasks/{id}` with the full record as body.
    async fn put_task(&self, id: &str, task: &Task) -> Result<(), ApiError>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;
}

/// reqwest-backed [`TaskApi`].
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client with a request timeout. `None` keeps the transport default.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/tasks/{id}` with `id` encoded as a single path segment.
    fn task_url(&self, id: &str) -> Result<reqwest::Url, ApiError> {
        let invalid = |detail: String| ApiError::BaseUrl(format!("{}: {detail}", self.base_url));
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .push("tasks")
            .push(id);
        Ok(url)
    }
}

/// Turn a non-2xx response into [`ApiError::Server`].
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait::async_trait]
impl TaskApi for HttpTaskApi {
    async fn get_task(&self, id: &str) -> Result<Task, ApiError> {
        let url = self.task_url(id)?;
        debug!(%url, "GET task");
        let resp = check(self.http.get(url).send().await?).await?;
        resp.json::<Task>()
            .await
            .map_err(|e| ApiError::Decode(format!("task {id}: {e}")))
    }

    async fn put_task(&self, id: &str, task: &Task) -> Result<(), ApiError> {
        let url = self.task_url(id)?;
        debug!(%url, "PUT task");
        check(self.http.put(url).json(task).send().await?).await?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let url = self.task_url(id)?;
        debug!(%url, "DELETE task");
        check(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}
