mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{measure, zone};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Measure(args) => measure::run(&cli, args),
        Commands::Zone(args) => zone::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
