use signal_gateway::{Gateway, GatewayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Signal Gateway - webhook relay for trading alerts

USAGE:
    signal-gateway [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                Server host (default: 0.0.0.0)
    PORT                Server port (default: 8080)
    TP_CORE_URL         Core strategy forwarding endpoint
    TP_RUNNER_URL       Runner strategy forwarding endpoint
    TP_ALT_URL          Auto-trail (alt) forwarding endpoint
    RUST_LOG            Log level filter

EXAMPLES:
    # Run with defaults
    signal-gateway

    # Run with config file
    signal-gateway --config config.json

    # Run with custom port
    PORT=9000 signal-gateway
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signal_gateway=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = if let Some(path) = config_path {
        tracing::info!("Loading configuration from: {}", path);
        let mut config = GatewayConfig::from_file(&path)?;
        // Env still wins for deploy-time endpoint changes.
        config.apply_env_overrides();
        config
    } else {
        GatewayConfig::from_env()
    };

    tracing::info!("Starting Signal Gateway");
    tracing::info!("Webhook: http://{}/pine-entry", config.bind_addr());
    tracing::info!("Push channel: ws://{}/ws", config.bind_addr());
    for (route, url) in [
        (&config.routes.core_key, &config.routes.core_url),
        (&config.routes.runner_key, &config.routes.runner_url),
        (&config.routes.alt_key, &config.routes.alt_url),
    ] {
        match url {
            Some(url) => tracing::info!("Route {} -> {}", route, url),
            None => tracing::warn!("Route {} has no endpoint configured", route),
        }
    }

    let gateway = Gateway::new(config);
    gateway.run().await.map_err(|e| anyhow::anyhow!(e.to_string()))
}
