//! Registry API binary

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mcpreg_api::{ApiConfig, ApiServer};

fn init_tracing() {
    // RUST_LOG takes precedence, with debug defaults for our crates.
    // Note: crate names use underscores in tracing (mcpreg-core → mcpreg_core).
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("mcpreg_core=debug".parse().expect("valid directive"))
            .add_directive("mcpreg_api=debug".parse().expect("valid directive"))
            .add_directive("tower_http=info".parse().expect("valid directive"))
    });

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (for development)
    dotenvy::dotenv().ok();

    init_tracing();

    let config = ApiConfig::from_env();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "starting MCP registry API"
    );

    ApiServer::new(config).run().await
}
