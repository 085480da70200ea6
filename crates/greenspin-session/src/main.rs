/*
[INPUT]:  CLI arguments, optional YAML configuration file, GREENSPIN__* env vars, OS shutdown signals
[OUTPUT]: Spin/validate flows against the task service with graceful interruption
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use greenspin_adapter::GreenSpinClient;
use greenspin_session::{GreenSpinConfig, SessionController};

#[derive(Parser, Debug)]
#[command(name = "greenspin", version, about = "GreenSpin eco-task spinner and proof validator")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request a new task and print it once the spin finishes
    Spin,
    /// Spin, then submit proof text and photo and print the verdict
    Run {
        #[arg(long)]
        proof: String,
        #[arg(long, value_name = "PATH")]
        photo: PathBuf,
    },
    /// Menu-driven session
    Interactive,
    /// Write a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH", default_value = "greenspin.yaml")]
        output: PathBuf,
    },
    /// Print the effective configuration as YAML
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    if let Command::Init { output } = args.command {
        return cli::init::run_init(output);
    }

    let config = GreenSpinConfig::load(args.config_path.as_deref()).context("load config")?;
    info!(
        base_url = %config.service.base_url,
        spin_delay_ms = config.session.spin_delay_ms,
        "configuration loaded"
    );

    if let Command::ShowConfig = args.command {
        let yaml = serde_yaml::to_string(&config).context("serialize config")?;
        print!("{yaml}");
        return Ok(());
    }

    let client = GreenSpinClient::with_config(config.client_config()).context("build client")?;
    let controller = SessionController::new(Arc::new(client), config.controller_config());

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let command = async {
        match &args.command {
            Command::Spin => cli::commands::run_spin(&controller).await,
            Command::Run { proof, photo } => {
                cli::commands::run_cycle(&controller, proof, photo).await
            }
            Command::Interactive => cli::interactive::run_interactive(&controller).await,
            Command::Init { .. } | Command::ShowConfig => Ok(()),
        }
    };

    tokio::select! {
        result = command => result,
        _ = shutdown.cancelled() => {
            info!("interrupted");
            Ok(())
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
