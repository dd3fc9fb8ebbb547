//! `a2ui-sync`: stream or replay an A2UI turn and print the committed UI.
//!
//! Usage:
//!   a2ui-sync chat "show me a product card"
//!   a2ui-sync chat "hello" --endpoint http://localhost:8000/api/chat
//!   a2ui-sync replay capture.jsonl

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use a2ui_sync::config::Config;
use a2ui_sync::driver::{replay_turn, stream_turn};
use a2ui_sync::logging::init_tracing;
use a2ui_sync::scheduler::FrameTicker;
use a2ui_sync::session::{SessionId, SessionStore};
use a2ui_sync::surface::render_order;
use a2ui_sync::transport::{ChatClient, ReplaySource};

#[derive(Parser)]
#[command(name = "a2ui-sync", version)]
#[command(about = "Apply streamed A2UI envelopes and print the committed surface")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a message to the chat endpoint and apply the reply
    Chat {
        message: String,

        /// Override the configured chat endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Config file to use instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Apply a captured stream (JSONL or SSE `data:` lines)
    Replay {
        file: PathBuf,

        /// Config file to use instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Chat {
            message,
            endpoint,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(endpoint) = endpoint {
                config.transport.endpoint = endpoint;
                config.validate()?;
            }

            let (store, ticker) = build_store(&config);
            let client = ChatClient::new(&config.transport)?;
            let session = stream_turn(&store, &ticker, &client, &message).await?;
            report(&store, session)
        }
        Command::Replay { file, config } => {
            let config = load_config(config.as_deref())?;
            let mut source = ReplaySource::from_path(&file)
                .with_context(|| format!("Failed to open capture {}", file.display()))?;

            let (store, ticker) = build_store(&config);
            let session = replay_turn(&store, &ticker, &mut source).await?;
            report(&store, session)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn build_store(config: &Config) -> (SessionStore, FrameTicker) {
    let ticker = FrameTicker::new(config.scheduler.frame_interval());
    let store = SessionStore::new(config.scheduler.batch_config(), Box::new(ticker.clone()));
    (store, ticker)
}

fn report(store: &SessionStore, session: SessionId) -> Result<()> {
    let Some(surface) = store.snapshot(session) else {
        bail!("Session {} disappeared", session);
    };

    println!("render version {}", surface.render_version);
    match surface.root_id.as_deref() {
        Some(root) => println!("root {}", root),
        None => println!("root (none)"),
    }

    for entry in render_order(&surface) {
        let indent = "  ".repeat(entry.depth);
        let label = store
            .resolve_property(session, &entry.node.id, "text")
            .or_else(|| store.resolve_property(session, &entry.node.id, "label"))
            .map(|v| format!(" {}", short(&v)))
            .unwrap_or_default();
        println!("{}{} #{}{}", indent, entry.node.rendered_kind(), entry.node.id, label);
    }

    println!("{}", serde_json::to_string_pretty(&surface.data_model)?);

    if let Some(error) = store.error(session) {
        bail!("Stream ended with an error: {}", error);
    }
    Ok(())
}

fn short(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.chars().count() > 60 {
        let cut: String = text.chars().take(57).collect();
        format!("{:?}", format!("{}...", cut))
    } else {
        format!("{:?}", text)
    }
}
