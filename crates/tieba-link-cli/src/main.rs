//! tieba-link CLI: detect forum and thread links in text and on the clipboard.

use std::io::Read;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tieba_link_clipboard::SystemClipboard;
use tieba_link_matcher::LinkMatcher;
use tieba_link_monitor::{ClipboardMonitor, Config, MonitorEvent, OfflineSource};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "tieba-link",
    about = "Recognise forum and thread links in text and on the clipboard",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the first forum or thread link in some text.
    Parse {
        /// Text to scan, or `-` to read standard input.
        text: String,
    },

    /// Classify an app deep link (com.baidu.tieba://unidispatch/...).
    DeepLink {
        /// The deep-link URI.
        uri: String,
    },

    /// Decide where a web view should open a URI.
    Route {
        /// The URI to route.
        uri: String,
    },

    /// Watch the system clipboard and print every preview change.
    Watch {
        /// Path to configuration file.
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { text } => {
            init_logging("warn");
            let text = if text == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                text
            };
            print_json(&LinkMatcher::builtin().detect(&text))?;
        }
        Commands::DeepLink { uri } => {
            init_logging("warn");
            print_json(&tieba_link_matcher::parse_deep_link(&uri))?;
        }
        Commands::Route { uri } => {
            init_logging("warn");
            let route = tieba_link_matcher::route(&uri)
                .ok_or_else(|| anyhow::anyhow!("not an absolute URI: {uri}"))?;
            print_json(&route)?;
        }
        Commands::Watch { config } => {
            let config = tieba_link_monitor::setup::load_config(config.as_deref())?;
            init_logging(&config.monitor.log_level);
            tokio::runtime::Runtime::new()?.block_on(watch(config))?;
        }
    }

    Ok(())
}

fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn watch(config: Config) -> anyhow::Result<()> {
    // No preview service is wired into the CLI; enrichment reports that.
    let monitor = ClipboardMonitor::new(
        &config,
        SystemClipboard::new(),
        Arc::new(OfflineSource),
        Arc::new(OfflineSource),
    );
    let mut previews = monitor.subscribe();

    let (event_tx, event_rx) = mpsc::channel(16);
    let poll_interval = config.monitor.poll_interval();
    let handle = {
        let monitor = monitor.clone();
        tokio::spawn(async move { monitor.run(event_rx, Some(poll_interval)).await })
    };

    tracing::info!(poll_interval = ?poll_interval, "watching clipboard, Ctrl-C to stop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            changed = previews.changed() => {
                if changed.is_err() {
                    break;
                }
                let preview = previews.borrow_and_update().clone();
                println!("{}", serde_json::to_string(&preview)?);
            }
            result = &mut shutdown => {
                result?;
                break;
            }
        }
    }

    let _ = event_tx.send(MonitorEvent::Shutdown).await;
    handle.await?;
    Ok(())
}
