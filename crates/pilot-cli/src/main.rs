//! Rebase pilot CLI
//!
//! Command-line interface that starts interactive rebases, edits their todo
//! list and answers their decisions.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{show_config, Cli};
use log::info;
use pilot_core::{PilotBuilder, PilotConfig};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        repo,
        config_file,
        no_color,
        command,
    } = Args::parse();

    let config =
        PilotConfig::load(config_file.as_deref()).context("Failed to load configuration")?;
    let renderer = TerminalRenderer::new(config.rich_output && !no_color);

    if let Some(Config) = command {
        return show_config(&config, &renderer);
    }

    let pilot = PilotBuilder::new()
        .with_repository(repo)
        .with_config(config)
        .build()
        .await
        .context("Failed to open repository")?;

    info!("Pilot started for {}", pilot.repository().display());
    let cli = Cli::new(pilot, renderer);

    match command {
        Some(Todo { command }) => cli.handle_todo_command(command).await,
        Some(Begin(args)) => cli.begin(args).await,
        Some(Continue(args)) => cli.continue_rebase(args).await,
        Some(Skip) => cli.skip().await,
        Some(Abort) => cli.abort().await,
        Some(Status) | Some(Config) | None => cli.status().await,
    }
}
