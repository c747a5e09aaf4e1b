#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Lane Defence headlessly and prints a summary.

mod autoplay;
mod config;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use lane_defence_session::Session;
use lane_defence_world::query;

use autoplay::Autoplay;

/// Headless Lane Defence autoplay.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", author, version, about, long_about = None)]
struct CliArgs {
    /// TOML file overriding the session configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for hazard placement, overriding the configuration.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of waves to play before stopping.
    #[arg(long, default_value_t = 10)]
    waves: u32,
    /// Length of one simulated frame in milliseconds.
    #[arg(
        long,
        default_value_t = 16,
        value_parser = clap::value_parser!(u64).range(1..=1000)
    )]
    frame_ms: u64,
    /// Toggle triple speed at the start of every wave.
    #[arg(long)]
    fast: bool,
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let mut config = config::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut session = Session::new(&config).context("failed to start session")?;
    println!("{}", query::welcome_banner(session.world()));

    let mut autoplay = Autoplay::new(Duration::from_millis(args.frame_ms), args.fast);
    let summary = autoplay.play(&mut session, args.waves);
    println!("{summary}");
    Ok(())
}
