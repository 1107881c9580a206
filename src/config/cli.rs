use crate::config::{ClientConfig, ServerConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "folio-contact")]
#[command(about = "Contact form relay for a personal portfolio site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Optional TOML config file
    #[arg(long, global = true, env = "FOLIO_CONTACT_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the forwarding endpoint (POST /api/contact)
    Serve(ServeArgs),
    /// Submit the contact form once from the terminal
    Submit(SubmitArgs),
    /// Load configuration, validate it and print the effective values
    CheckConfig,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Downstream form-processing service URL
    #[arg(long)]
    pub downstream: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(downstream) = &self.downstream {
            config.downstream_endpoint = Some(downstream.clone());
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub message: String,

    /// Forwarding endpoint; without one the form falls back to a mailto: link
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub recipient: Option<String>,

    /// Print the mailto: link instead of opening the mail client
    #[arg(long)]
    pub print_link: bool,
}

impl SubmitArgs {
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.forward_endpoint = Some(endpoint.clone());
        }
        if let Some(recipient) = &self.recipient {
            config.recipient = recipient.clone();
        }
    }
}
