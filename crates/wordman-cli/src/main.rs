//! Wordman CLI Application
//!
//! Command-line front end for the wordman vocabulary scheduler.

mod args;
mod cli;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use wordman_core::{ManualClock, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        page_size,
        today,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new().with_database_path(database_file);
    if let Some(today) = today {
        info!("Using {today} as today");
        builder = builder.with_clock(Arc::new(ManualClock::new(today)));
    }
    if let Some(page_size) = page_size {
        builder = builder.with_default_page_size(page_size);
    }

    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color));

    match command {
        Some(List { command }) => cli.handle_list_command(command).await,
        Some(Lesson { command }) => cli.handle_lesson_command(command).await,
        Some(Review { command }) => cli.handle_review_command(command).await,
        None => cli.list_summaries().await,
    }
}
