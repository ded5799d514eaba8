use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use voice_recorder::{
    CommandOutcome, Config, DecodingPlayer, DirectoryGateway, PlayOutcome, SessionController,
};

#[derive(Parser)]
#[command(name = "voice-recorder", about = "List, play and delete recorded clips")]
struct Cli {
    /// Config file (without extension)
    #[arg(long, default_value = "config/voice-recorder")]
    config: String,

    /// Override the recordings directory
    #[arg(long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List recordings
    List {
        #[arg(long)]
        json: bool,
    },
    /// Play a recording by name
    Play { name: String },
    /// Delete a recording by name
    Delete { name: String },
    /// Print the session snapshot
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    let dir = match cli.dir {
        Some(dir) => dir,
        None => cfg.recordings_dir()?,
    };

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Recordings directory: {}", dir.display());

    let gateway = DirectoryGateway::new(&dir);
    gateway
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let (sink_tx, mut sink_rx) = mpsc::channel(16);
    let player = DecodingPlayer::new(sink_tx);

    let mut controller =
        SessionController::new(Box::new(gateway), Box::new(player), cfg.session_config());

    if let CommandOutcome::GatewayFailed(e) = controller.refresh_catalog().await {
        anyhow::bail!("Failed to list recordings: {}", e);
    }

    match cli.command {
        Command::List { json } => {
            let catalog = controller.catalog();
            if json {
                println!("{}", serde_json::to_string_pretty(catalog.entries())?);
            } else if catalog.is_empty() {
                println!("No recordings in {}", dir.display());
            } else {
                for entry in catalog.entries() {
                    println!("{}", entry.name);
                }
            }
        }

        Command::Play { name } => {
            let path = controller
                .catalog()
                .find_by_name(&name)
                .map(|e| e.path.clone())
                .with_context(|| format!("No recording named {}", name))?;

            // Stand-in output device: report the level once per second
            let meter = tokio::spawn(async move {
                let mut peak = 0u16;
                let mut elapsed_ms = 0u64;
                while let Some(frame) = sink_rx.recv().await {
                    peak = peak.max(frame.peak());
                    elapsed_ms += frame.duration().as_millis() as u64;
                    if elapsed_ms >= 1000 {
                        info!("t={:.1}s peak={}", frame.timestamp_ms as f64 / 1000.0, peak);
                        peak = 0;
                        elapsed_ms = 0;
                    }
                }
            });

            match controller.play(&path).await {
                PlayOutcome::Started(task) => {
                    task.await.context("Playback task panicked")??;
                }
                PlayOutcome::LoadFailed(e) => return Err(e.into()),
            }

            drop(controller);
            meter.await.context("Level meter panicked")?;
        }

        Command::Delete { name } => {
            let path = controller
                .catalog()
                .find_by_name(&name)
                .map(|e| e.path.clone())
                .with_context(|| format!("No recording named {}", name))?;

            if let CommandOutcome::GatewayFailed(e) = controller.delete(&path).await {
                return Err(e.into());
            }
            println!("Deleted {}", name);
        }

        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
        }
    }

    Ok(())
}
