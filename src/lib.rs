pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{HttpTransport, PrintNavigator, SystemNavigator};
pub use config::{ClientConfig, ServerConfig};
pub use core::{ContactForm, Forwarder, RelayOutcome, SubmissionClient, SubmitOutcome};
pub use domain::model::{ContactSubmission, RelayResponse};
pub use utils::error::{ContactError, Result};
