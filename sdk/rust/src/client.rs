//! HTTP client for the contact service.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields of the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Successful submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    /// Stored row; absent when the service runs without durable storage.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error status.
    #[error("service returned {status}: {error}")]
    Api { status: u16, error: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct ContactClient {
    client: Client,
    base_url: String,
    forwarded_for: Option<String>,
}

impl ContactClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            forwarded_for: None,
        }
    }

    /// Send `X-Forwarded-For` with every submission.
    pub fn forwarded_for(mut self, origin: &str) -> Self {
        self.forwarded_for = Some(origin.to_string());
        self
    }

    /// Submit the contact form.
    pub async fn submit(&self, form: &ContactForm) -> Result<SubmitResponse, ClientError> {
        let mut request = self
            .client
            .post(format!("{}/api/contact", self.base_url))
            .json(form);
        if let Some(origin) = &self.forwarded_for {
            request = request.header("x-forwarded-for", origin);
        }
        decode(request.send().await?).await
    }

    /// Query the health endpoint.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/contact", self.base_url))
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let error = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        return Err(ClientError::Api {
            status: status.as_u16(),
            error,
        });
    }

    Ok(serde_json::from_str(&text)?)
}
