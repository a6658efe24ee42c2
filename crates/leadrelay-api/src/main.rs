//! Leadrelay entry point.
//!
//! Binary name: `leadrelay`
//!
//! Parses CLI arguments, loads `leadrelay.toml`, initializes tracing, then
//! either starts the relay server or opens the terminal chat widget.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use leadrelay_core::client::ClientSettings;
use leadrelay_infra::config::load_config;
use leadrelay_observe::{LogFormat, LogOptions};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "leadrelay", &mut std::io::stdout());
        return Ok(());
    }

    let log_options = LogOptions {
        default_filter: cli.log_filter().to_string(),
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        enable_otel: cli.otel,
        with_target: !matches!(cli.command, Commands::Chat { .. }),
    };
    leadrelay_observe::init_tracing(&log_options)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let mut config = load_config(&cli.config).await;

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            web_dir,
            base_url,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(web_dir) = web_dir {
                config.server.web_dir = web_dir;
            }
            if base_url.is_some() {
                config.relay.base_url = base_url;
            }
            serve(config).await
        }

        Commands::Chat { url } => {
            let relay_url = url.unwrap_or_else(|| config.client.relay_url.clone());
            let settings = ClientSettings::from(&config.client);
            cli::chat::loop_runner::run_chat_loop(&relay_url, settings).await
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    leadrelay_observe::shutdown_tracing();
    result
}

async fn serve(config: leadrelay_types::config::LeadrelayConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::init(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Leadrelay listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());
    tracing::info!(%addr, "relay server started");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
