//! Hosted row-store gateway speaking the PostgREST dialect.
//!
//! # Responsibilities
//! - Insert accepted submissions into `{url}/rest/v1/{table}`
//! - Read stored rows back by id
//! - Surface backend failures as typed errors
//!
//! Inserts ask for `return=representation` so the stored row, including the
//! generated `id` and `created_at`, comes back in the response.

use reqwest::header::HeaderName;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::config::PersistenceConfig;
use crate::contact::submission::{StoredContact, Submission};
use crate::persistence::{PersistenceError, PersistenceGateway, StoreReceipt};

const API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");
const PREFER_HEADER: HeaderName = HeaderName::from_static("prefer");

/// Durable gateway backed by a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Serialize)]
struct InsertRow<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl RestGateway {
    /// Build a gateway from configuration, or `None` in log-only mode.
    pub fn from_config(config: &PersistenceConfig) -> Result<Option<Self>, PersistenceError> {
        let Some((url, api_key)) = config.credentials() else {
            return Ok(None);
        };
        let endpoint = table_endpoint(url, &config.table)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PersistenceError::Transport)?;

        Ok(Some(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        }))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch a stored row by id.
    pub async fn fetch(&self, id: &str) -> Result<Option<StoredContact>, PersistenceError> {
        let response = self
            .authorized(self.client.get(self.endpoint.clone()))
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())])
            .send()
            .await
            .map_err(PersistenceError::Transport)?;

        let rows = decode_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

impl PersistenceGateway for RestGateway {
    async fn store(&self, submission: &Submission) -> Result<StoreReceipt, PersistenceError> {
        let rows = [InsertRow {
            name: submission.name(),
            email: submission.email(),
            subject: submission.subject(),
            message: submission.message(),
        }];

        let response = self
            .authorized(self.client.post(self.endpoint.clone()))
            .header(PREFER_HEADER, "return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(PersistenceError::Transport)?;

        let stored = decode_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or(PersistenceError::EmptyResponse)?;

        Ok(StoreReceipt::Stored(stored))
    }

    fn is_durable(&self) -> bool {
        true
    }
}

async fn decode_rows(response: Response) -> Result<Vec<StoredContact>, PersistenceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PersistenceError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response.json().await.map_err(PersistenceError::Decode)
}

/// `{base}/rest/v1/{table}`, keeping any path prefix on `base`.
fn table_endpoint(base: &str, table: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("rest/v1/")?.join(table)
}
