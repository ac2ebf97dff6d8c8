use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use explorer_input::InputSnapshot;
use explorer_kernel::{Frame, Simulation, Tuning, scatter_collectibles};
use explorer_tools::{Inspector, message};
use tracing_subscriber::EnvFilter;

mod script;

use script::{Pilot, Script};

/// Fixed simulation step for headless runs.
const STEP: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "explorer-cli", about = "Headless driver for the explorer simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run a scripted session and print the HUD readout
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Seed for the pickup layout
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// YAML file overriding tuning defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Input script to drive the avatar
        #[arg(long, value_enum, default_value = "collect")]
        script: Script,
        /// Print the final readout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a session, replay its frames, and compare state hashes
    Replay {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Seed for the pickup layout
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// YAML file overriding tuning defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_tuning(path: Option<&Path>) -> anyhow::Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning from {}", path.display()))?;
    let tuning: Tuning = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing tuning from {}", path.display()))?;
    tuning.validate()?;
    tracing::info!(path = %path.display(), "loaded tuning");
    Ok(tuning)
}

/// Longest session `replay` will hold in memory.
const MAX_RECORDED_TICKS: u64 = 1_000_000;

/// Drive a fresh session with the pilot. When `frames` is given, every
/// consumed input is appended to it for replay.
fn record(
    tuning: Tuning,
    seed: u64,
    script: Script,
    ticks: u64,
    mut frames: Option<&mut Vec<Frame>>,
) -> anyhow::Result<Simulation> {
    if frames.is_some() && ticks > MAX_RECORDED_TICKS {
        anyhow::bail!("cannot record {ticks} ticks, the limit is {MAX_RECORDED_TICKS}");
    }
    let mut sim = Simulation::with_collectibles(tuning, scatter_collectibles(seed))?;
    let mut pilot = Pilot::new(script, sim.tuning().look_sensitivity);

    for _ in 0..ticks {
        let input: InputSnapshot = pilot.drive(&sim);
        let report = sim.step(&input, STEP)?;
        for effect in &report.effects {
            if let Some(text) = message(effect) {
                println!("[tick {}] {text}", sim.tick());
            }
        }
        for fault in &report.faults {
            tracing::warn!(tick = sim.tick(), %fault, "tick fault");
        }
        for event in sim.drain_events() {
            tracing::trace!(?event, "sim event");
        }
        if let Some(frames) = frames.as_deref_mut() {
            frames.push(Frame { input, dt: STEP });
        }
    }
    Ok(sim)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("explorer-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", explorer_kernel::crate_info());
            println!("input: {}", explorer_input::crate_info());
            println!("tools: {}", explorer_tools::crate_info());
        }
        Commands::Run {
            ticks,
            seed,
            config,
            script,
            json,
        } => {
            let tuning = load_tuning(config.as_deref())?;
            tracing::info!(ticks, seed, ?script, "starting session");
            let sim = record(tuning, seed, script, ticks, None)?;

            let readout = Inspector::readout(&sim);
            if json {
                println!("{}", serde_json::to_string_pretty(&readout)?);
            } else {
                println!("{readout}");
                if let Some((id, dist)) = Inspector::nearest(&sim) {
                    println!("nearest pickup: {} at {dist:.1}", id.short());
                }
            }
        }
        Commands::Replay {
            ticks,
            seed,
            config,
        } => {
            let tuning = load_tuning(config.as_deref())?;
            println!("Deterministic replay: seed={seed}, ticks={ticks}");

            let mut frames = Vec::new();
            let original = record(
                tuning.clone(),
                seed,
                Script::Collect,
                ticks,
                Some(&mut frames),
            )?;
            let mut replayed = Simulation::with_collectibles(tuning, scatter_collectibles(seed))?;
            replayed.run(&frames)?;

            println!(
                "Run:    tick={}, found={}, hash={:#x}",
                original.tick(),
                original.objects_found(),
                original.state_hash()
            );
            println!(
                "Replay: tick={}, found={}, hash={:#x}",
                replayed.tick(),
                replayed.objects_found(),
                replayed.state_hash()
            );
            let matched = original.state_hash() == replayed.state_hash();
            println!("Match: {}", if matched { "OK" } else { "MISMATCH" });
            if !matched {
                anyhow::bail!("replay diverged from the recorded run");
            }
        }
    }

    Ok(())
}
