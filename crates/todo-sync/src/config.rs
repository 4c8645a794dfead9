//! API Configuration
//!
//! Where the remote todo store lives and how requests to it are built.

use std::time::Duration;

use reqwest::Url;

use crate::error::{ApiError, ApiResult};
use crate::model::TodoId;

/// Remote origin used when no override is compiled in
pub const DEFAULT_BASE_URL: &str = "https://todo-app-react-lashasuxa.onrender.com";

/// Path of the todo collection, relative to the base URL
const COLLECTION_PATH: &str = "api/todos";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Origin (and optional path prefix) of the API, always ending in `/`
    pub base_url: Url,
    /// Per-request timeout. Ignored on wasm32, where fetch has none.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let mut url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base_url: url, timeout: None })
    }

    /// Base URL from `TODO_API_BASE_URL` at build time, else the default origin
    pub fn from_build_env() -> ApiResult<Self> {
        Self::new(option_env!("TODO_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `{base}/api/todos`
    pub fn collection_url(&self) -> ApiResult<Url> {
        self.base_url
            .join(COLLECTION_PATH)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// `{base}/api/todos/{id}`, with the id as one encoded path segment
    pub fn todo_url(&self, id: &TodoId) -> ApiResult<Url> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .push(id.as_str());
        Ok(url)
    }
}
