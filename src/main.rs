// hashsweep command-line interface
// Entry points for multiply validation and benchmark sweeps

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use hashsweep::{HashRegistry, MultiplyValidator, SweepConfig, SweepOrchestrator};

#[derive(Parser)]
#[command(name = "hashsweep")]
#[command(about = "Validate 128-bit multiply primitives and sweep hash benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-validate the two 128-bit multiplication routines
    Validate {
        /// Number of random operand pairs to check
        #[arg(long, default_value_t = 1_000_000)]
        trials: u64,

        /// Fixed RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the outcome as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Run a benchmark for every thread count x algorithm combination
    Sweep {
        /// Comma-separated thread counts (default: 1 and all cores)
        #[arg(long, value_delimiter = ',')]
        threads: Vec<usize>,

        /// Comma-separated algorithm keys (default: every registered algorithm)
        #[arg(long, value_delimiter = ',')]
        algorithms: Vec<String>,

        /// Ramp-up phase duration in seconds
        #[arg(long, default_value_t = 10)]
        ramp_up: u64,

        /// Steady-state phase duration in seconds
        #[arg(long, default_value_t = 10)]
        steady_state: u64,

        /// Ramp-down phase duration in seconds
        #[arg(long, default_value_t = 10)]
        ramp_down: u64,

        /// Advisory memory limit recorded with each run
        #[arg(long, default_value_t = 200)]
        memory_limit_mb: u64,

        /// Directory receiving one subdirectory per run
        #[arg(long, default_value = "/tmp/hashsweep")]
        output_dir: PathBuf,

        /// Per-run timeout in seconds; omit to wait indefinitely
        #[arg(long)]
        timeout: Option<u64>,

        /// Emit the report as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// List the available hash algorithms
    List {
        /// Emit the list as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { trials, seed, json } => {
            let validator = MultiplyValidator::new();
            let outcome = match seed {
                Some(seed) => validator.run_seeded(trials, seed),
                None => validator.run(trials),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                outcome.display();
            }

            if !outcome.passed() {
                process::exit(1);
            }
        }

        Commands::Sweep {
            threads,
            algorithms,
            ramp_up,
            steady_state,
            ramp_down,
            memory_limit_mb,
            output_dir,
            timeout,
            json,
        } => {
            let thread_counts = if threads.is_empty() {
                vec![1, num_cpus::get()]
            } else {
                threads
            };
            let algorithms = if algorithms.is_empty() {
                HashRegistry::list_algorithms()
                    .into_iter()
                    .map(|info| info.name)
                    .collect()
            } else {
                algorithms
            };

            let mut config = SweepConfig::new(thread_counts, algorithms, output_dir);
            config.ramp_up = Duration::from_secs(ramp_up);
            config.steady_state = Duration::from_secs(steady_state);
            config.ramp_down = Duration::from_secs(ramp_down);
            config.memory_limit_mb = memory_limit_mb;
            config.run_timeout = timeout.map(Duration::from_secs);

            let report = SweepOrchestrator::new(config).execute()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.display();
            }
        }

        Commands::List { json } => {
            let algorithms = HashRegistry::list_algorithms();

            if json {
                println!("{}", serde_json::to_string_pretty(&algorithms)?);
            } else {
                println!("Available algorithms:");
                for info in algorithms {
                    let kind = if info.cryptographic {
                        "cryptographic"
                    } else {
                        "non-cryptographic"
                    };
                    println!("  {:<12} {:>4} bits  {}", info.name, info.output_bits, kind);
                }
            }
        }
    }

    Ok(())
}
