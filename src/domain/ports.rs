use crate::domain::model::{ContactSubmission, RemoteReply};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Sends a submission as a JSON POST.
///
/// Any HTTP answer, including error statuses, comes back as `Ok`; only a
/// failure to complete the exchange is an `Err`.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn post_json(&self, url: &str, submission: &ContactSubmission) -> Result<RemoteReply>;
}

/// Opens a URL on the user's machine (the `mailto:` fallback).
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}
