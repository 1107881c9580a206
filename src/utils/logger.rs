use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset. `tower_http` carries the
/// per-request trace lines of the relay server.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "folio_contact=debug,tower_http=debug,info"
    } else {
        "folio_contact=info,tower_http=info,warn"
    }
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Human-readable output for `serve`, `submit` and `check-config`.
///
/// In verbose mode span closings are printed too, so each relayed request
/// shows how long the downstream round trip took.
pub fn init_cli_logger(verbose: bool) {
    let span_events = if verbose {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(env_filter(default_directives(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_span_events(span_events)
                .compact(),
        )
        .init();
}

/// JSON lines for CloudWatch. The runtime stamps its own time, and the
/// request span (with `body_len`) is attached to every event.
pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter("folio_contact=info,lambda_runtime=info,warn"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();
}
