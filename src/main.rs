//! ASA Organizational Simulation
//!
//! Command-line adapter around the simulation core: loads configuration,
//! runs the step loop, and writes the metrics table and final agent table
//! as JSON for external analysis.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use asa_sim::{Simulation, SimulationConfig};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "asa_sim")]
#[command(about = "Attraction-Selection-Attrition organizational simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional TOML configuration file; defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured number of steps
    #[arg(long)]
    steps: Option<u64>,

    /// Where to write the per-step metrics table
    #[arg(long, default_value = "output/metrics.json")]
    metrics_out: PathBuf,

    /// Where to write the final full agent table
    #[arg(long, default_value = "output/agents.json")]
    agents_out: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SimulationConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.n_steps = steps;
    }

    println!("ASA Organizational Simulation");
    println!("=============================");
    println!("Seed: {}", args.seed);
    println!("Steps: {}", config.n_steps);
    println!("Initial size: {}", config.initial_size);
    println!("Categories: {}", config.identity_categories.join(", "));
    println!();

    let mut sim = match Simulation::new(config, args.seed) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Starting simulation...");
    loop {
        sim.step();
        let step = sim.current_step();
        if step % 100 == 0 {
            if let Some(row) = sim.metrics().last() {
                println!(
                    "[Step {:>5}] active: {}, satisfaction mean: {:.3}, blau: {:.3}",
                    step, row.active_size, row.satisfaction_mean, row.blau_index
                );
            }
        }
        if sim.run_state() == asa_sim::RunState::Completed {
            break;
        }
    }
    let report = sim.report();

    println!();
    println!(
        "Simulation complete. Ran {} steps ({} hires, {} departures, {} still active).",
        report.steps_run, report.total_hires, report.total_departures, report.final_active_size
    );

    for path in [&args.metrics_out, &args.agents_out] {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Warning: could not create output directory: {}", e);
            }
        }
    }

    match serde_json::to_string_pretty(sim.metrics()) {
        Ok(json) => {
            if let Err(e) = fs::write(&args.metrics_out, json) {
                eprintln!("Warning: could not write metrics table: {}", e);
            } else {
                println!("Wrote {}", args.metrics_out.display());
            }
        }
        Err(e) => eprintln!("Warning: could not serialize metrics: {}", e),
    }

    let table = sim.agent_table();
    match serde_json::to_string_pretty(&table) {
        Ok(json) => {
            if let Err(e) = fs::write(&args.agents_out, json) {
                eprintln!("Warning: could not write agent table: {}", e);
            } else {
                println!("Wrote {}", args.agents_out.display());
            }
        }
        Err(e) => eprintln!("Warning: could not serialize agent table: {}", e),
    }

    ExitCode::SUCCESS
}
