use crate::config::ClientConfig;
use crate::core::mailto::compose_mailto;
use crate::domain::model::{blank_fields, ContactSubmission};
use crate::domain::ports::{ContactTransport, Navigator};
use crate::utils::error::{ContactError, Result};

pub const STATUS_INCOMPLETE: &str = "Please complete all fields.";
pub const STATUS_SENT: &str = "Thanks! Your message has been sent.";
pub const STATUS_OPENING_MAIL_CLIENT: &str = "Opening your email client…";

pub fn failure_status(direct_address: &str) -> String {
    format!(
        "Sorry, something went wrong. Please email me directly at {}.",
        direct_address
    )
}

/// The contact form as the user sees it: three inputs and a status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            status: String::new(),
        }
    }

    pub fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&self.name, &self.email, &self.message)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// A field was blank; nothing was sent.
    Incomplete,
    Sent,
    MailClientOpened { link: String },
    Failed(ContactError),
}

/// Form-side half of the pipeline: validates the form, then either posts it
/// to the forwarding endpoint or falls back to a `mailto:` link.
pub struct SubmissionClient<T: ContactTransport, N: Navigator> {
    config: ClientConfig,
    transport: T,
    navigator: N,
}

impl<T: ContactTransport, N: Navigator> SubmissionClient<T, N> {
    pub fn new(config: ClientConfig, transport: T, navigator: N) -> Self {
        Self {
            config,
            transport,
            navigator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit the form once. Errors never escape: each outcome is written to
    /// `form.status` and also returned for the caller to inspect.
    pub async fn submit(&self, form: &mut ContactForm) -> SubmitOutcome {
        form.status.clear();

        let submission = match ContactSubmission::parse(
            form.name.as_str(),
            form.email.as_str(),
            form.message.as_str(),
        ) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::debug!("Form incomplete: {}", e);
                form.status = STATUS_INCOMPLETE.to_string();
                return SubmitOutcome::Incomplete;
            }
        };

        let result = match self.config.forward_endpoint() {
            Some(endpoint) => self.send(endpoint, &submission).await.map(|()| None),
            None => self.open_mail_client(&submission).map(Some),
        };

        match result {
            Ok(None) => {
                form.status = STATUS_SENT.to_string();
                form.clear_fields();
                SubmitOutcome::Sent
            }
            Ok(Some(link)) => {
                form.status = STATUS_OPENING_MAIL_CLIENT.to_string();
                SubmitOutcome::MailClientOpened { link }
            }
            Err(e) => {
                tracing::warn!("Contact submission failed ({:?}): {}", e.category(), e);
                form.status = failure_status(&self.config.direct_address);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn send(&self, endpoint: &str, submission: &ContactSubmission) -> Result<()> {
        tracing::debug!("Posting contact form to {}", endpoint);
        let reply = self.transport.post_json(endpoint, submission).await?;

        if !reply.is_success() {
            return Err(ContactError::DownstreamError {
                status: reply.status,
                body: reply.body,
            });
        }
        Ok(())
    }

    fn open_mail_client(&self, submission: &ContactSubmission) -> Result<String> {
        let link = compose_mailto(&self.config.recipient, submission);
        self.navigator.open(&link)?;
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RemoteReply;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CountingTransport {
        status: u16,
        calls: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl ContactTransport for CountingTransport {
        async fn post_json(
            &self,
            _url: &str,
            _submission: &ContactSubmission,
        ) -> Result<RemoteReply> {
            *self.calls.lock().unwrap() += 1;
            Ok(RemoteReply {
                status: self.status,
                body: String::new(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        opened: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Navigator for RecordingNavigator {
        fn open(&self, url: &str) -> Result<()> {
            if self.fail {
                return Err(ContactError::UnexpectedError {
                    message: "no handler for mailto".to_string(),
                });
            }
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn client_config(endpoint: Option<&str>) -> ClientConfig {
        ClientConfig {
            forward_endpoint: endpoint.map(str::to_string),
            recipient: "me@site.dev".to_string(),
            direct_address: "direct@site.dev".to_string(),
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn test_blank_field_stops_before_sending() {
        let transport = CountingTransport {
            status: 200,
            ..Default::default()
        };
        let navigator = RecordingNavigator::default();
        let client = SubmissionClient::new(
            client_config(Some("https://site.dev/api/contact")),
            transport.clone(),
            navigator.clone(),
        );

        let mut form = ContactForm::new("", "a@x.com", "Hi");
        let outcome = client.submit(&mut form).await;

        assert!(matches!(outcome, SubmitOutcome::Incomplete));
        assert_eq!(form.status, STATUS_INCOMPLETE);
        assert_eq!(*transport.calls.lock().unwrap(), 0);
        assert!(navigator.opened.lock().unwrap().is_empty());
        assert_eq!(form.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_mailto_fallback_without_endpoint() {
        let transport = CountingTransport::default();
        let navigator = RecordingNavigator::default();
        let client = SubmissionClient::new(client_config(None), transport.clone(), navigator.clone());

        let mut form = ContactForm::new("Alice Smith", "a@x.com", "Hi there");
        let outcome = client.submit(&mut form).await;

        let opened = navigator.opened.lock().unwrap().clone();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("mailto:me@site.dev?subject="));
        assert!(opened[0].contains("Alice%20Smith"));
        assert!(opened[0].contains("a%40x.com"));
        assert!(opened[0].contains("Hi%20there"));
        match outcome {
            SubmitOutcome::MailClientOpened { link } => assert_eq!(link, opened[0]),
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(form.status, STATUS_OPENING_MAIL_CLIENT);
        assert_eq!(*transport.calls.lock().unwrap(), 0);
        // 開啟郵件程式不代表已送出，欄位保留
        assert_eq!(form.name, "Alice Smith");
    }

    #[tokio::test]
    async fn test_rejected_post_reports_direct_address() {
        let transport = CountingTransport {
            status: 500,
            ..Default::default()
        };
        let client = SubmissionClient::new(
            client_config(Some("https://site.dev/api/contact")),
            transport.clone(),
            RecordingNavigator::default(),
        );

        let mut form = ContactForm::new("Alice", "a@x.com", "Hi");
        let outcome = client.submit(&mut form).await;

        match outcome {
            SubmitOutcome::Failed(ContactError::DownstreamError { status, .. }) => {
                assert_eq!(status, 500)
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(
            form.status,
            "Sorry, something went wrong. Please email me directly at direct@site.dev."
        );
        assert_eq!(form.message, "Hi");
        assert_eq!(*transport.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_navigator_failure_is_reported_not_raised() {
        let navigator = RecordingNavigator {
            fail: true,
            ..Default::default()
        };
        let client =
            SubmissionClient::new(client_config(None), CountingTransport::default(), navigator);

        let mut form = ContactForm::new("Alice", "a@x.com", "Hi");
        let outcome = client.submit(&mut form).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.status, failure_status("direct@site.dev"));
    }

    #[tokio::test]
    async fn test_status_is_reset_on_each_submit() {
        let client = SubmissionClient::new(
            client_config(Some("https://site.dev/api/contact")),
            CountingTransport {
                status: 200,
                ..Default::default()
            },
            RecordingNavigator::default(),
        );

        let mut form = ContactForm::new("Alice", "a@x.com", "Hi");
        client.submit(&mut form).await;
        assert_eq!(form.status, STATUS_SENT);
        assert!(form.is_empty());

        let outcome = client.submit(&mut form).await;
        assert!(matches!(outcome, SubmitOutcome::Incomplete));
        assert_eq!(form.status, STATUS_INCOMPLETE);
    }
}
