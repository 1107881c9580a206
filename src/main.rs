use clap::Parser;
use folio_contact::config::cli::{Command, ServeArgs, SubmitArgs};
use folio_contact::utils::{logger, validation::Validate};
use folio_contact::{
    ClientConfig, Cli, ContactError, ContactForm, HttpTransport, PrintNavigator, ServerConfig,
    SubmissionClient, SubmitOutcome, SystemNavigator,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 先載入 .env，讓 FORMSPREE_ENDPOINT 等變數可以放在檔案裡
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    let config_path = cli.config.as_deref();

    let result = match &cli.command {
        Command::Serve(args) => serve(config_path, args).await,
        Command::Submit(args) => submit(config_path, args).await,
        Command::CheckConfig => check_config(config_path),
    };

    if let Err(e) = result {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(match e.category() {
            folio_contact::utils::error::ErrorCategory::Configuration => 2,
            _ => 1,
        });
    }

    Ok(())
}

async fn serve(config_path: Option<&Path>, args: &ServeArgs) -> Result<(), ContactError> {
    let mut config = ServerConfig::load(config_path)?;
    args.apply(&mut config);
    config.validate()?;

    tracing::info!("🚀 Starting contact relay on {}", config.bind_address());
    folio_contact::server::serve(config).await
}

async fn submit(config_path: Option<&Path>, args: &SubmitArgs) -> Result<(), ContactError> {
    let mut config = ClientConfig::load(config_path)?;
    args.apply(&mut config);
    config.validate()?;

    let transport = HttpTransport::new(config.timeout())?;
    let mut form = ContactForm::new(&args.name, &args.email, &args.message);

    let outcome = if args.print_link {
        SubmissionClient::new(config, transport, PrintNavigator)
            .submit(&mut form)
            .await
    } else {
        SubmissionClient::new(config, transport, SystemNavigator::new())
            .submit(&mut form)
            .await
    };

    println!("{}", form.status);
    match outcome {
        SubmitOutcome::Failed(e) => Err(e),
        SubmitOutcome::Incomplete => Err(ContactError::missing_fields(form.missing_fields())),
        SubmitOutcome::Sent | SubmitOutcome::MailClientOpened { .. } => Ok(()),
    }
}

fn check_config(config_path: Option<&Path>) -> Result<(), ContactError> {
    let server = ServerConfig::load(config_path)?;
    let client = ClientConfig::load(config_path)?;

    server.validate()?;
    client.validate()?;

    println!("✅ Configuration is valid");
    println!(
        "📡 Relay: {} -> {}",
        server.bind_address(),
        server.downstream_endpoint().unwrap_or("(not configured, answers 503)")
    );
    println!(
        "📝 Form: {}",
        client
            .forward_endpoint()
            .map(|e| format!("POST {}", e))
            .unwrap_or_else(|| format!("mailto:{}", client.recipient))
    );
    Ok(())
}
