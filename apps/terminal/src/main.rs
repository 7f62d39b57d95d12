use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, load_settings_from, CatalogClient, RoundController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod labels;
mod render;

use commands::{parse_command, PlayerCommand};
use render::{render, render_stats, ViewState};

#[derive(Parser, Debug)]
#[command(about = "Guess the creature hidden behind the silhouette")]
struct Args {
    /// Settings file, which must exist; without it ./catalog.toml is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    max_id: Option<u32>,
    #[arg(long, default_value = "en")]
    lang: String,
    /// Fixed seed for the identifier draw.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(max_id) = args.max_id {
        settings.max_creature_id = max_id;
    }

    info!(
        base_url = %settings.base_url,
        max_creature_id = settings.max_creature_id,
        max_attempts = settings.max_attempts,
        "terminal: catalog settings loaded"
    );

    let client = match args.seed {
        Some(seed) => CatalogClient::with_seed(&settings, seed),
        None => CatalogClient::new(&settings),
    }
    .context("invalid catalog settings")?;
    let controller = RoundController::new(Arc::new(client));
    let labels = labels::for_language(&args.lang);
    let mut view = ViewState::default();

    controller.start_new_round().await;
    print!("{}", render(&controller.snapshot(), view, labels));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let snapshot = controller.snapshot();
        match parse_command(&line) {
            PlayerCommand::Quit => break,
            PlayerCommand::ShowStats => {
                println!("{}", render_stats(&snapshot.stats, labels));
                continue;
            }
            PlayerCommand::ToggleHints => view.show_hints = !view.show_hints,
            PlayerCommand::GiveUp => controller.reveal_answer(),
            PlayerCommand::Guess(guess) => controller.submit_guess(&guess),
            PlayerCommand::NextRound => {
                view = ViewState::default();
                controller.start_new_round().await;
            }
            PlayerCommand::Continue => {
                if snapshot.is_playable() {
                    continue;
                }
                view = ViewState::default();
                controller.start_new_round().await;
            }
        }
        print!("{}", render(&controller.snapshot(), view, labels));
    }

    println!("{}", render_stats(&controller.snapshot().stats, labels));
    Ok(())
}
