use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simulation::{init, DescentPilot, FlightState, RandomPilot, Session, Settings};

#[derive(Clone, Copy, ValueEnum)]
enum Pilot {
    Random,
    Descent,
}

#[derive(Parser)]
#[command(version, about = "Runs a headless lunar lander flight", long_about = None)]
struct Cli {
    /// Session settings json file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximal number of ticks
    #[arg(long, short, default_value = "10000")]
    ticks: usize,

    /// Who flies the lander
    #[arg(long, value_enum, default_value = "descent")]
    pilot: Pilot,

    /// Seed of the random pilot
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Print the per-tick telemetry table
    #[arg(long)]
    telemetry: bool,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => init::json::parse_settings(path)?,
        None => Settings::default(),
    };
    let mut session = Session::new(settings).map_err(|e| e.to_string())?;

    let now = std::time::Instant::now();
    let result = match cli.pilot {
        Pilot::Random => session.run(&mut RandomPilot::new(cli.seed), cli.ticks),
        Pilot::Descent => session.run(&mut DescentPilot::default(), cli.ticks),
    }
    .map_err(|e| e.to_string())?;
    let elapsed = now.elapsed();

    if cli.telemetry {
        println!("{}", session.history().pretty_to_string());
    }
    let lander = session.lander();
    println!(
        "Finished {result:?} after {} ticks ({elapsed:?}), position ({:.1}, {:.1}), fuel {}",
        session.ticks(),
        lander.position().x,
        lander.position().y,
        lander.fuel()
    );

    match result {
        FlightState::Flying => Err(format!("Flight not finished within {} ticks", cli.ticks)),
        _ => Ok(()),
    }
}
