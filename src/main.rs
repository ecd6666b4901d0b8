//! Queen-bee CLI - Evolve a target string from a JSON configuration.

use std::path::PathBuf;

use queen_bee::{
    EvolutionEngine, QueenBeeConfig,
    compute::evolution::{ConsoleReporter, Reporter, SilentReporter, format_bee},
    schema::StopReason,
};

struct Args {
    config_path: Option<PathBuf>,
    max_generations: Option<usize>,
    quiet: bool,
    json: bool,
}

fn main() {
    env_logger::init();

    let args = parse_args().unwrap_or_else(|msg| {
        eprintln!("Error: {msg}");
        eprintln!();
        print_usage();
        std::process::exit(1);
    });

    // Load configuration
    let config = match &args.config_path {
        Some(path) => QueenBeeConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => QueenBeeConfig::default(),
    };

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    if !args.json {
        let config = engine.config();
        println!("Queen-Bee Evolution");
        println!("===================");
        println!("Target: {:?} ({} genes)", config.target, config.gene_length());
        println!(
            "Population: {}, tournament: {}",
            config.population_size, config.tournament_size
        );
        println!(
            "Mutation: {} genes, strong mutation: {} genes",
            config.mutation_count(),
            config.strong_mutation_count()
        );
        println!("Seed: {}", engine.seed());
    }

    let mut reporter: Box<dyn Reporter> = if args.quiet || args.json {
        Box::new(SilentReporter)
    } else {
        Box::new(ConsoleReporter::stdout())
    };

    let result = engine
        .run_with_callback(args.max_generations, |snapshot| reporter.report(snapshot))
        .unwrap_or_else(|e| {
            eprintln!("Run aborted: {e}");
            std::process::exit(2);
        });

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing result: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!();
    match result.stats.stop_reason {
        StopReason::Solved => println!("Solved after {} generations", result.stats.generations),
        StopReason::MaxGenerations => println!(
            "Stopped after {} generations without an exact match",
            result.stats.generations
        ),
    }
    if let Some(best) = &result.best {
        println!("Best: {}", format_bee(best));
    }
    println!(
        "Time: {:.2}s ({} evaluations)",
        result.stats.elapsed_seconds, result.stats.total_evaluations
    );
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: None,
        max_generations: None,
        quiet: false,
        json: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--example" => {
                print_example_config();
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--quiet" | "-q" => args.quiet = true,
            "--json" => args.json = true,
            "--max-generations" => {
                let value = iter
                    .next()
                    .ok_or("--max-generations needs a value")?
                    .parse()
                    .map_err(|e| format!("invalid --max-generations: {e}"))?;
                args.max_generations = Some(value);
            }
            flag if flag.starts_with('-') => return Err(format!("unknown flag {flag}")),
            path => {
                if args.config_path.is_some() {
                    return Err("only one config file may be given".to_string());
                }
                args.config_path = Some(PathBuf::from(path));
            }
        }
    }

    Ok(args)
}

fn print_usage() {
    let name = std::env::args()
        .next()
        .unwrap_or_else(|| "queen-bee".to_string());
    eprintln!("Usage: {name} [config.json] [--max-generations N] [--quiet] [--json]");
    eprintln!();
    eprintln!("Evolve the configured target string with the queen-bee genetic algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json          Path to run configuration (default settings if omitted)");
    eprintln!("  --max-generations N  Stop after N generations even if unsolved");
    eprintln!("  --quiet              Do not print every generation");
    eprintln!("  --json               Print the final result as JSON");
    eprintln!("  --example            Print an example configuration");
}

fn print_example_config() {
    let config = QueenBeeConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing config: {e}"),
    }
}
