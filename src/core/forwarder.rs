use crate::config::ServerConfig;
use crate::domain::model::{ContactSubmission, RelayResponse};
use crate::domain::ports::ContactTransport;
use crate::utils::error::{ContactError, ErrorCategory, Result};
use axum::http::StatusCode;

/// Terminal state of one relayed request.
///
/// `Received` leads to `MissingFields`, `NoEndpoint`, or a forward attempt,
/// and the forward attempt ends in `ForwardSucceeded`, `ForwardFailed`, or
/// `UnexpectedError`. Each variant maps to exactly one HTTP response.
#[derive(Debug)]
pub enum RelayOutcome {
    ForwardSucceeded,
    MissingFields(ContactError),
    NoEndpoint(ContactError),
    ForwardFailed(ContactError),
    UnexpectedError(ContactError),
}

impl RelayOutcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ForwardSucceeded => StatusCode::OK,
            Self::MissingFields(e)
            | Self::NoEndpoint(e)
            | Self::ForwardFailed(e)
            | Self::UnexpectedError(e) => e.status_code(),
        }
    }

    pub fn response(&self) -> RelayResponse {
        match self {
            Self::ForwardSucceeded => RelayResponse::success(),
            Self::MissingFields(e)
            | Self::NoEndpoint(e)
            | Self::ForwardFailed(e)
            | Self::UnexpectedError(e) => RelayResponse::failure(e.public_message()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::ForwardSucceeded)
    }
}

impl From<Result<()>> for RelayOutcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::ForwardSucceeded,
            Err(e) => match e.category() {
                ErrorCategory::Validation => Self::MissingFields(e),
                ErrorCategory::Configuration => Self::NoEndpoint(e),
                ErrorCategory::Downstream => Self::ForwardFailed(e),
                ErrorCategory::Transport | ErrorCategory::Unexpected => Self::UnexpectedError(e),
            },
        }
    }
}

/// Relays contact submissions to the downstream form service.
///
/// Holds no mutable state, so one instance can serve any number of
/// concurrent requests behind an `Arc`.
pub struct Forwarder<T: ContactTransport> {
    config: ServerConfig,
    transport: T,
}

impl<T: ContactTransport> Forwarder<T> {
    pub fn new(config: ServerConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.downstream_endpoint().is_some()
    }

    /// Run one request body through the relay. Never fails; every error is
    /// folded into the returned outcome.
    #[tracing::instrument(name = "Relaying contact submission", skip(self, body), fields(body_len = body.len()))]
    pub async fn handle(&self, body: &[u8]) -> RelayOutcome {
        let outcome = RelayOutcome::from(self.relay(body).await);

        match &outcome {
            RelayOutcome::ForwardSucceeded => tracing::info!("Contact submission forwarded"),
            RelayOutcome::MissingFields(e) => tracing::debug!("Rejected submission: {}", e),
            RelayOutcome::NoEndpoint(_) => {
                tracing::warn!("Submission dropped: no downstream endpoint configured")
            }
            RelayOutcome::ForwardFailed(e) => tracing::warn!("Downstream refused submission: {}", e),
            RelayOutcome::UnexpectedError(e) => tracing::error!("Relay failed: {}", e),
        }

        outcome
    }

    /// Parse, validate and forward a raw JSON body.
    pub async fn relay(&self, body: &[u8]) -> Result<()> {
        let payload: serde_json::Value = serde_json::from_slice(body)?;
        let submission = ContactSubmission::from_json(&payload)?;
        self.forward(&submission).await
    }

    /// Forward an already-validated submission. Exactly one downstream call.
    pub async fn forward(&self, submission: &ContactSubmission) -> Result<()> {
        let endpoint =
            self.config
                .downstream_endpoint()
                .ok_or_else(|| ContactError::MissingConfigError {
                    field: "downstream_endpoint".to_string(),
                })?;

        tracing::debug!(sender = %submission.name, "Forwarding submission downstream");
        let reply = self.transport.post_json(endpoint, submission).await?;

        if !reply.is_success() {
            return Err(ContactError::DownstreamError {
                status: reply.status,
                body: reply.body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RemoteReply;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockTransport {
        reply: RemoteReply,
        calls: Arc<Mutex<Vec<(String, ContactSubmission)>>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: RemoteReply {
                    status,
                    body: body.to_string(),
                },
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn calls(&self) -> Vec<(String, ContactSubmission)> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl ContactTransport for MockTransport {
        async fn post_json(
            &self,
            url: &str,
            submission: &ContactSubmission,
        ) -> Result<RemoteReply> {
            self.calls
                .lock()
                .await
                .push((url.to_string(), submission.clone()));
            Ok(self.reply.clone())
        }
    }

    fn configured() -> ServerConfig {
        ServerConfig {
            downstream_endpoint: Some("https://forms.test/f/abc".to_string()),
            ..ServerConfig::default()
        }
    }

    const VALID: &[u8] = br#"{"name":"Alice","email":"a@x.com","message":"Hi"}"#;

    #[tokio::test]
    async fn test_successful_forward() {
        let transport = MockTransport::replying(200, "{\"ok\":true}");
        let forwarder = Forwarder::new(configured(), transport.clone());

        let outcome = forwarder.handle(VALID).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.status_code(), StatusCode::OK);
        assert_eq!(outcome.response(), RelayResponse::success());

        let calls = transport.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://forms.test/f/abc");
        assert_eq!(
            calls[0].1,
            ContactSubmission::parse("Alice", "a@x.com", "Hi").unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_fields_skip_downstream() {
        let transport = MockTransport::replying(200, "");
        let forwarder = Forwarder::new(configured(), transport.clone());

        let bodies: [&[u8]; 4] = [
            br#"{"email":"a@x.com","message":"Hi"}"#,
            br#"{"name":"Alice","message":"Hi"}"#,
            br#"{"name":"Alice","email":"a@x.com","message":""}"#,
            br#"{}"#,
        ];

        for body in bodies {
            let outcome = forwarder.handle(body).await;
            assert!(matches!(outcome, RelayOutcome::MissingFields(_)));
            assert_eq!(outcome.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(outcome.response(), RelayResponse::failure("Missing fields"));
        }

        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_no_endpoint_configured() {
        let transport = MockTransport::replying(200, "");
        let forwarder = Forwarder::new(ServerConfig::default(), transport.clone());

        let outcome = forwarder.handle(VALID).await;

        assert!(matches!(outcome, RelayOutcome::NoEndpoint(_)));
        assert_eq!(outcome.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            outcome.response(),
            RelayResponse::failure("No endpoint configured")
        );
        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_downstream_failure_preserves_body() {
        let transport = MockTransport::replying(422, "{\"error\":\"Invalid email\"}");
        let forwarder = Forwarder::new(configured(), transport.clone());

        let outcome = forwarder.handle(VALID).await;

        assert!(matches!(outcome, RelayOutcome::ForwardFailed(_)));
        assert_eq!(outcome.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            outcome.response(),
            RelayResponse::failure("{\"error\":\"Invalid email\"}")
        );
        assert_eq!(transport.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_json_is_server_error() {
        let transport = MockTransport::replying(200, "");
        let forwarder = Forwarder::new(configured(), transport.clone());

        let outcome = forwarder.handle(b"name=Alice").await;

        assert!(matches!(outcome, RelayOutcome::UnexpectedError(_)));
        assert_eq!(outcome.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(outcome.response(), RelayResponse::failure("Server error"));
        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_checked_before_endpoint() {
        let forwarder = Forwarder::new(ServerConfig::default(), MockTransport::replying(200, ""));
        let outcome = forwarder.handle(br#"{"name":"Alice"}"#).await;
        assert_eq!(outcome.status_code(), StatusCode::BAD_REQUEST);
    }
}
