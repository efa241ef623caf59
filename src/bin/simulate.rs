//! Monster Tower balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 1000 runs to floor 50
//!   cargo run --bin simulate -- -n 100 -f 30   # 100 runs to floor 30
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use monster_tower::core::GameConfig;
use monster_tower::logging::init_tracing;
use monster_tower::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            std::process::exit(2);
        }
    };
    init_tracing(config.verbosity);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              MONSTER TOWER BALANCE SIMULATOR                  ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:             {}", config.num_runs);
    println!("  Target Floor:     {}", config.target_floor);
    println!("  Max Actions:      {}", config.max_actions_per_run);
    println!("  Starting Coins:   {}", config.game.starting_currency);
    println!("  Starting Devices: {}", config.game.starting_capture_devices);
    if let Some(seed) = config.seed {
        println!("  Seed:             {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-f" | "--floor" => {
                if i + 1 < args.len() {
                    config.target_floor = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-a" | "--actions" => {
                if i + 1 < args.len() {
                    config.max_actions_per_run = args[i + 1].parse().unwrap_or(20_000);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    let text = std::fs::read_to_string(&args[i + 1])
                        .map_err(|e| format!("cannot read {}: {}", args[i + 1], e))?;
                    let mut game = GameConfig::from_json(&text).map_err(|e| e.to_string())?;
                    game.pacing = config.game.pacing.clone();
                    config.game = game;
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick_check();
            }
            "--deep" => {
                config = SimConfig::deep_climb();
            }
            "--generous" => {
                config = SimConfig::generous_start(config.num_runs);
            }
            _ => {}
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Monster Tower Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 1000)");
    println!("    -f, --floor <F>     Target floor to reach (default: 50)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -a, --actions <A>   Max bot actions per run (default: 20,000)");
    println!("    -c, --config <PATH> Game rules as JSON (missing fields use defaults)");
    println!("    -v, --verbose       Per-run output and info-level tracing");
    println!("    -q, --quiet         Errors only");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick check (100 runs to floor 20)");
    println!("    --deep              Deep climb (200 runs to floor 100)");
    println!("    --generous          Start with five capture devices");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 100 -f 30   # 100 runs to floor 30");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --quick        # Quick balance check");
}
