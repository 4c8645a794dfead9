//! Todo API
//!
//! Abstract access to the remote todo store plus the REST implementation.
//! The trait is `?Send` because browser fetch futures are not `Send`.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::{NewTodo, Status, StatusUpdate, Todo, TodoId};

/// CRUD operations of the remote todo collection
#[async_trait(?Send)]
pub trait TodoApi {
    /// Fetch the whole collection
    async fn list(&self) -> ApiResult<Vec<Todo>>;

    /// Create an active todo; returns it with its server-assigned id
    async fn create(&self, text: &str) -> ApiResult<Todo>;

    /// Persist a new status for one todo
    async fn update_status(&self, id: &TodoId, status: Status) -> ApiResult<()>;

    /// Delete one todo
    async fn delete(&self, id: &TodoId) -> ApiResult<()>;
}

/// `TodoApi` over HTTP/JSON
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl RestClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send a request, turning non-success statuses into errors
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "request rejected");
            return Err(ApiError::from_status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait(?Send)]
impl TodoApi for RestClient {
    async fn list(&self) -> ApiResult<Vec<Todo>> {
        let url = self.config.collection_url()?;
        tracing::debug!(%url, "GET todos");
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, text: &str) -> ApiResult<Todo> {
        let url = self.config.collection_url()?;
        tracing::debug!(%url, "POST todo");
        let body = NewTodo { todo: text, status: Status::Active };
        let response = self.send(self.http.post(url).json(&body)).await?;
        Ok(response.json().await?)
    }

    async fn update_status(&self, id: &TodoId, status: Status) -> ApiResult<()> {
        let url = self.config.todo_url(id)?;
        tracing::debug!(%url, status = status.as_str(), "PUT todo status");
        self.send(self.http.put(url).json(&StatusUpdate { status })).await?;
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> ApiResult<()> {
        let url = self.config.todo_url(id)?;
        tracing::debug!(%url, "DELETE todo");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}
