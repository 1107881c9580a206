use crate::domain::model::{ContactSubmission, RemoteReply};
use crate::domain::ports::ContactTransport;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// reqwest-backed transport. Every request is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn post_json(&self, url: &str, submission: &ContactSubmission) -> Result<RemoteReply> {
        tracing::debug!("POST {}", url);

        // .json() 會自動加上 Content-Type: application/json
        let response = self.client.post(url).json(submission).send().await?;

        let status = response.status().as_u16();
        tracing::debug!("Remote response status: {}", status);

        let body = response.text().await?;
        Ok(RemoteReply { status, body })
    }
}
