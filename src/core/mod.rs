pub mod forwarder;
pub mod mailto;
pub mod submission;

pub use crate::domain::model::{ContactSubmission, RelayResponse, RemoteReply};
pub use crate::domain::ports::{ContactTransport, Navigator};
pub use crate::utils::error::Result;
pub use forwarder::{Forwarder, RelayOutcome};
pub use submission::{ContactForm, SubmissionClient, SubmitOutcome};
