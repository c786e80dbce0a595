//! Looping CLI - Drive and inspect fixed-step loops from the command line

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, run};
use looping_runtime::DrainPolicy;

#[derive(Parser)]
#[command(name = "looping")]
#[command(about = "Fixed-timestep loop scheduler", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless bouncing-ball loop and print a summary
    Run {
        /// Path to a loop config file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Simulation steps per second (overrides the config)
        #[arg(long)]
        fps: Option<f64>,

        /// Catch-up drain policy (overrides the config)
        #[arg(long, value_parser = parse_policy)]
        policy: Option<DrainPolicy>,

        /// Display refresh rate used to pace frames
        #[arg(long, default_value = "60")]
        refresh: f64,

        /// Number of frames to run (0 = until Ctrl-C)
        #[arg(long, default_value = "300")]
        frames: u64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a loop config file, or print the defaults
    Config {
        /// Path to a loop config file
        path: Option<String>,

        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

fn parse_policy(s: &str) -> Result<DrainPolicy, String> {
    match s {
        "fixed-step" => Ok(DrainPolicy::FixedStep),
        "update-cost" => Ok(DrainPolicy::UpdateCost),
        _ => Err(format!(
            "unknown drain policy '{}'; valid values: fixed-step, update-cost",
            s
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Run {
            config,
            fps,
            policy,
            refresh,
            frames,
            format,
        } => run::run(run::RunArgs {
            config,
            fps,
            policy,
            refresh,
            frames,
            format,
        }),
        Commands::Config { path, format } => config::run(path.as_deref(), &format),
    }
}
