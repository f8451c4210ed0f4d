//! Ember CLI - Run and benchmark CPU particle effects

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{bench, list, run};

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "CPU particle effects and benchmark harness", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time every effect across a sweep of particle counts
    Bench {
        /// Benchmark configuration file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Frames simulated per measurement
        #[arg(long)]
        frames: Option<u32>,

        /// Comma-separated effect names (e.g. "tunnel,fountain")
        #[arg(long, value_delimiter = ',')]
        effects: Option<Vec<String>>,
    },

    /// Simulate a single effect and report its state
    Run {
        /// Effect name
        effect: String,

        /// Particle capacity (0 = effect default)
        #[arg(long)]
        count: Option<usize>,

        /// Number of frames to simulate
        #[arg(long, default_value = "200")]
        frames: u32,

        /// Time step in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Configuration file with an [effects.<name>] table
        #[arg(long)]
        config: Option<String>,
    },

    /// List available effects
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the verbosity flag
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Bench {
            config,
            frames,
            effects,
        } => bench::run(bench::BenchArgs {
            config,
            frames,
            effects,
        }),
        Commands::Run {
            effect,
            count,
            frames,
            dt,
            config,
        } => run::run(run::RunArgs {
            effect,
            count,
            frames,
            dt,
            config,
        }),
        Commands::List => list::run(),
    }
}
