//! HTTP client for the todo API.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use deskboard_core::{NetworkError, ReqwestErrorExt};

use crate::todo::{Todo, TodoCreateRequest};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Error body returned by the API on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct TodoClient {
    client: reqwest::Client,
    base_url: String,
}

impl TodoClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://127.0.0.1:3001`).
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/todos`
    #[instrument(skip(self), level = "debug")]
    pub async fn list_todos(&self) -> Result<Vec<Todo>, NetworkError> {
        let url = format!("{}/api/todos", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        self.handle_response(response).await
    }

    /// `POST /api/todos`
    #[instrument(skip(self), level = "debug")]
    pub async fn create_todo(&self, request: &TodoCreateRequest) -> Result<Todo, NetworkError> {
        let url = format!("{}/api/todos", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        self.handle_response(response).await
    }

    /// `PUT /api/todos/:id/done`
    #[instrument(skip(self), level = "debug")]
    pub async fn mark_done(&self, id: u64) -> Result<Todo, NetworkError> {
        let url = format!("{}/api/todos/{}/done", self.base_url, id);

        let response = self
            .client
            .put(&url)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        self.handle_response(response).await
    }

    /// `DELETE /api/todos/:id`
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_todo(&self, id: u64) -> Result<(), NetworkError> {
        let url = format!("{}/api/todos/{}", self.base_url, id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        // 204 No Content on success
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NetworkError> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| NetworkError::InvalidResponse(format!("JSON parse error: {}", e)))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: reqwest::Response) -> NetworkError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        tracing::debug!("Todo API returned {}: {}", status, message);
        NetworkError::ServerError { status, message }
    }
}
