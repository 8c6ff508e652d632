#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Wave Arena headlessly and reports the result.

mod session;

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use session::{Outcome, SessionConfig};
use wave_arena_core::GameTuning;

/// Highest accepted `--tick-rate`; one tick per millisecond.
const MAX_TICK_RATE: i64 = 1_000;

/// Runs a headless Wave Arena session with an automated player.
#[derive(Debug, Parser)]
#[command(name = "wave-arena", version)]
struct CliArgs {
    /// JSON file with tuning overrides; missing fields keep their defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for hostile spawn positions.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Simulation updates per second.
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..=MAX_TICK_RATE)
    )]
    tick_rate: u32,
    /// Longest session to simulate, in seconds.
    #[arg(long, default_value_t = 120.0)]
    duration: f32,
    /// Stop after clearing this many waves.
    #[arg(long, default_value_t = 3)]
    max_waves: u32,
}

impl CliArgs {
    fn session(&self) -> Result<SessionConfig> {
        ensure!(self.max_waves > 0, "--max-waves must be positive");
        let time_limit = Duration::try_from_secs_f32(self.duration)
            .with_context(|| format!("invalid --duration {}", self.duration))?;

        Ok(SessionConfig {
            seed: self.seed,
            tick: Duration::from_secs(1) / self.tick_rate,
            time_limit,
            max_waves: self.max_waves,
        })
    }
}

/// Entry point for the Wave Arena command-line interface.
fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args = CliArgs::parse();
    let session = args.session()?;
    let tuning = load_tuning(args.config.as_deref())?;

    let summary = session::run(tuning, &session).context("invalid tuning")?;
    let outcome = match summary.outcome {
        Outcome::Survived => "survived",
        Outcome::Died => "died",
        Outcome::TimeLimit => "time limit reached",
    };
    println!(
        "{outcome} after {:.1}s: wave {}, {} kills, {} shots, {} beeps, {} health left",
        summary.elapsed.as_secs_f32(),
        summary.wave,
        summary.kills,
        summary.shots,
        summary.beeps,
        summary.player_health
    );
    Ok(())
}

fn load_tuning(path: Option<&Path>) -> Result<GameTuning> {
    let Some(path) = path else {
        return Ok(GameTuning::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    let tuning = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse tuning file {}", path.display()))?;
    log::info!("loaded tuning from {}", path.display());
    Ok(tuning)
}
