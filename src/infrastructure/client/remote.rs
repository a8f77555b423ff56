use crate::domain::entities::query_result::QueryResult;
use crate::domain::error::DomainError;
use crate::infrastructure::http::server::QueryRequest;
use reqwest::Client;

pub const DEFAULT_URL: &str = "http://127.0.0.1:1234";

/// Sends one query to a running server, the way an external caller would.
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub async fn query(
        &self,
        embedding: Vec<f32>,
        topk: Option<i64>,
        mode: Option<String>,
    ) -> Result<QueryResult, DomainError> {
        let url = format!("{}/query", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&QueryRequest {
                embedding,
                topk,
                mode,
            })
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Http(format!("Error {status}: {body}")));
        }

        resp.json::<QueryResult>()
            .await
            .map_err(|e| DomainError::Parse(format!("Failed to parse response: {e}")))
    }

    pub async fn health(&self) -> Result<bool, DomainError> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("Request to {url} failed: {e}")))?;
        Ok(resp.status().is_success())
    }
}
