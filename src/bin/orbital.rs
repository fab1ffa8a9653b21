//! Headless runner.
//!
//! ```bash
//! # one simulated year of the default solar system with 500 asteroids
//! orbital --steps 51135 --seed 1
//!
//! # a scenario file, trajectory written to disk
//! orbital --config scenario.yaml --steps 1000 --csv trajectory.csv
//! ```

use std::{path::PathBuf, time::Instant};

use clap::Parser;
use color_eyre::eyre::Result;
use orbital_sim::{
    config::{time_step_from_rate, SimulationConfig, SECONDS_PER_DAY},
    csv::write_trajectory,
    Execution, Simulation,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about = "Barnes-Hut orbital simulation", long_about = None)]
struct Args {
    /// YAML scenario. The default solar system if absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames per second the time step is derived from
    #[arg(long, default_value = "140")]
    fps: u32,

    /// Simulated days per real second
    #[arg(long, default_value = "100")]
    days_per_second: f64,

    /// Number of steps to take
    #[arg(short, long, default_value = "1000")]
    steps: usize,

    /// Override the number of asteroids
    #[arg(short, long)]
    asteroids: Option<usize>,

    /// Seed for the asteroid placement
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate the accelerations on this many threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write the trajectory of every body to this file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::new(time_step_from_rate(args.fps, args.days_per_second)),
    };
    if let Some(count) = args.asteroids {
        config.asteroids.count = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(num_threads) = args.threads {
        config.execution = Execution::Multithreaded { num_threads };
    }

    let mut sim = Simulation::new(&config)?;
    let time = Instant::now();

    if let Some(path) = &args.csv {
        let positions = sim.simulate(args.steps);
        write_trajectory(&positions, sim.time_step(), path)?;
        info!(path = %path.display(), "trajectory written");
    } else {
        let report_every = (args.steps / 10).max(1);
        for step in 1..=args.steps {
            sim.step();
            if step % report_every == 0 {
                info!(
                    step,
                    days = sim.elapsed_time() / SECONDS_PER_DAY,
                    "progress"
                );
            }
        }
    }

    let seconds = time.elapsed().as_secs_f64();
    info!(
        steps = args.steps,
        bodies = sim.bodies().len(),
        days = sim.elapsed_time() / SECONDS_PER_DAY,
        steps_per_second = args.steps as f64 / seconds,
        "done"
    );

    if let Some(earth) = sim.body_store().get("Earth") {
        info!(
            x = earth.position.x,
            y = earth.position.y,
            z = earth.position.z,
            "Earth"
        );
    }

    sim.destroy();
    Ok(())
}
