//! Model Runner
//!
//! A small HTTP service that publishes every method of a loaded model as a
//! network-reachable endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                 MODEL RUNNER                    │
//!                      │                                                 │
//!   Client Request     │  ┌─────────┐   ┌─────────┐   ┌──────────────┐  │
//!   ──────────────────▶│  │  http   │──▶│ payload │──▶│ message codec│  │
//!                      │  │ server  │   │ extract │   │ (decode)     │  │
//!                      │  └─────────┘   └─────────┘   └──────┬───────┘  │
//!                      │                                     ▼          │
//!                      │                              ┌──────────────┐  │
//!                      │                              │ model method │  │
//!                      │                              │  invocation  │  │
//!                      │                              └──────┬───────┘  │
//!                      │                                     ▼          │
//!   Client Response    │  ┌─────────┐                 ┌──────────────┐  │
//!   ◀──────────────────│  │ 201 /   │◀────────────────│ message codec│  │
//!                      │  │ 400     │                 │ (encode)     │  │
//!                      │  └─────────┘                 └──────┬───────┘  │
//!                      │                                     ▼          │
//!                      │                              ┌──────────────┐  │    Subscriber
//!                      │                              │  downstream  │──┼──▶ Endpoints
//!                      │                              │  forwarder   │  │
//!                      │                              └──────────────┘  │
//!                      └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use model_runner::config::{self, RunnerConfig};
use model_runner::http::HttpServer;
use model_runner::model::{self, CodecMode};

#[derive(Parser)]
#[command(name = "model-runner")]
#[command(about = "Serve a model's methods over HTTP", long_about = None)]
struct Args {
    /// Listen port, overrides the config file (default 3330).
    #[arg(long)]
    port: Option<u16>,

    /// Built-in model to serve.
    #[arg(long, default_value = "doubler")]
    model: String,

    /// Input and output as rich JSON instead of the binary wire format.
    #[arg(long)]
    json_io: bool,

    /// Return output in the response instead of just downstream.
    #[arg(long)]
    return_output: bool,

    /// Optional TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Runtime settings artifact holding the downstream URL list.
    #[arg(long, default_value = "runtime.json")]
    runtime: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "model_runner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut runner_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => RunnerConfig::default(),
    };

    // CLI flags override the file.
    apply_overrides(&mut runner_config, &args);

    let downstream = config::load_downstream(&args.runtime);
    if !downstream.is_empty() {
        runner_config.downstream.targets = downstream;
    }

    tracing::info!(
        bind_address = %runner_config.listener.bind_address,
        codec_mode = %runner_config.codec.mode,
        echo_output = runner_config.codec.echo_output,
        downstream_targets = runner_config.downstream.targets.len(),
        "Configuration loaded"
    );

    // A model that fails to resolve is fatal before any route binds.
    let model = model::load(&args.model)?;

    if runner_config.observability.metrics_enabled {
        match runner_config.observability.metrics_address.parse() {
            Ok(addr) => model_runner::observability::metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %runner_config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&runner_config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&runner_config, model);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn apply_overrides(config: &mut RunnerConfig, args: &Args) {
    if let Some(port) = args.port {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{host}:{port}");
    }

    if args.json_io {
        config.codec.mode = CodecMode::Json;
    }
    if args.return_output {
        config.codec.echo_output = true;
    }
}
