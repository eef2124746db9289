//! Game of Life CLI - Run sessions from JSON configuration.

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use conway_life::{
    compute::GridStats,
    schema::{Pattern, Seed, SessionConfig},
    session::{Session, Simulation},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations] [--watch]", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life session from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to session configuration file");
        eprintln!("  generations  Number of generations (default: 100)");
        eprintln!("  --watch      Run on the session timer and print every generation");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let generations: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);
    let watch = args.iter().any(|a| a == "--watch");

    let config = SessionConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    // Load or create seed
    let seed_path = config_path.with_extension("seed.json");
    let seed: Seed = if seed_path.exists() {
        let seed_str = std::fs::read_to_string(&seed_path).unwrap_or_else(|e| {
            eprintln!("Error reading seed file: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&seed_str).unwrap_or_else(|e| {
            eprintln!("Error parsing seed: {}", e);
            std::process::exit(1);
        })
    } else {
        Seed::default()
    };

    let grid = seed.generate(config.rows, config.cols).unwrap_or_else(|e| {
        eprintln!("Error generating seed grid: {}", e);
        std::process::exit(1);
    });

    let session = Session::with_grid(&config, grid).unwrap_or_else(|e| {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    });

    println!("Game of Life Session");
    println!("====================");
    println!("Grid: {}x{}", config.rows, config.cols);
    println!("Interval: {} ms", config.interval_ms);
    println!("Generations: {}", generations);
    println!();

    let initial_stats = session.stats();
    print_stats("Initial state", &initial_stats);

    if watch {
        run_watched(session, &config, generations);
    } else {
        run_headless(session, generations);
    }
}

/// Step as fast as possible, reporting every 10%.
fn run_headless(mut session: Session, generations: u64) {
    println!("Running simulation...");
    let start = Instant::now();

    for i in 0..generations {
        session.advance();

        if (i + 1) % (generations / 10).max(1) == 0 {
            let stats = session.stats();
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Generation {}/{}: population={}, density={:.3}, {:.1} gen/s",
                i + 1,
                generations,
                stats.population,
                stats.density,
                (i + 1) as f32 / elapsed
            );
        }
    }

    let elapsed = start.elapsed();
    println!();
    print_stats("Final state", &session.stats());
    println!(
        "Time: {:.2}s ({:.1} gen/s)",
        elapsed.as_secs_f32(),
        generations as f32 / elapsed.as_secs_f32()
    );
}

/// Drive the session with its own timer and print each new generation.
fn run_watched(session: Session, config: &SessionConfig, generations: u64) {
    let mut sim = Simulation::from_session(session, config.interval());
    sim.start();

    let mut shown = 0;
    while shown < generations {
        thread::sleep(config.interval() / 4);
        let generation = sim.generation();
        if generation == shown {
            continue;
        }
        shown = generation;
        println!("Gen. {}", shown);
        println!("{}", sim.snapshot());
    }

    sim.stop();
    print_stats("Final state", &sim.stats());
}

fn print_stats(label: &str, stats: &GridStats) {
    println!("{}:", label);
    println!("  Population: {}", stats.population);
    println!("  Density: {:.4}", stats.density);
    println!();
}

fn print_example_config() {
    let config = SessionConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    println!("{}", json);

    let seed = Seed {
        pattern: Pattern::Random {
            density: config.density,
            seed: Some(42),
        },
    };
    eprintln!();
    eprintln!("Example seed (save as <config>.seed.json):");
    eprintln!("{}", serde_json::to_string_pretty(&seed).unwrap());
}
