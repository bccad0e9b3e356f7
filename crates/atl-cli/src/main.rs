use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use atl_cli::commands::{chart, events, table, util};
use atl_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so event output can be piped between commands
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Events { file, json }) => {
            let config = load_config(cli.config.as_deref())?;
            let text = util::read_input(file.as_deref())?;
            events::run(
                &mut io::stdout().lock(),
                &text,
                &config.extract_config(),
                *json,
            )?;
        }
        Some(Commands::Table { file, no_color }) => {
            let text = util::read_input(file.as_deref())?;
            table::run(&mut io::stdout().lock(), &text, !*no_color)?;
        }
        Some(Commands::Chart { file, output }) => {
            let config = load_config(cli.config.as_deref())?;
            let text = util::read_input(file.as_deref())?;
            chart::run(&text, config.chart_options(), output.as_deref())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
