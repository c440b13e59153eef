//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # 200 runs to rank 5
//!   cargo run --bin simulate -- -n 50 -r 7      # 50 runs to rank 7
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use jianghu::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              JIANGHU BALANCE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:            {}", config.num_runs);
    println!("  Target Rank:     {}", config.target_rank);
    println!("  Max Encounters:  {}", config.max_encounters);
    println!("  Quests:          {}", config.simulate_quests);
    if let Some(seed) = config.seed {
        println!("  Seed:            {}", seed);
    }
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                log::error!("failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-r" | "--rank" => {
                if i + 1 < args.len() {
                    config.target_rank = args[i + 1].parse().unwrap_or(config.target_rank);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-e" | "--encounters" => {
                if i + 1 < args.len() {
                    config.max_encounters = args[i + 1].parse().unwrap_or(config.max_encounters);
                    i += 1;
                }
            }
            "--no-quests" => config.simulate_quests = false,
            "-v" | "--verbose" => config.verbosity = 2,
            "--quick" => config = SimConfig::quick(),
            "--full" => config = SimConfig::full_ladder(),
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => log::warn!("ignoring unknown argument {}", other),
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Jianghu Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulated characters (default: 200)");
    println!("    -r, --rank <R>        Realm rank to reach, 9..0 (default: 5)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -e, --encounters <E>  Encounter cap per run (default: 2000)");
    println!("    --no-quests           Skip quest givers");
    println!("    --quick               Short smoke-test configuration");
    println!("    --full                Climb the whole ladder");
    println!("    -v, --verbose         Log every run (RUST_LOG=info)");
    println!("    --json                Also write a JSON report");
    println!("    -h, --help            Show this help");
}
