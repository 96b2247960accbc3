use anyhow::Result;
use clap::{CommandFactory, Parser};

use burrow::cli::{Cli, Command};
use burrow::commands::{self, Context};
use burrow::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    if let Command::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "burrow", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    let ctx = Context::new(config, cli.quiet)?;

    // Dispatch to subcommand
    match cli.command {
        Command::Scan(args) => commands::scan::run(&ctx, args)?,
        Command::List(args) => commands::scan::run_list(&ctx, args)?,
        Command::Stats(args) => commands::scan::run_stats(&ctx, args)?,
        Command::Clean(args) => {
            tracing::info!(?args, "Starting clean");
            commands::clean::run(&ctx, args)?;
        }
        Command::Undo => commands::undo::run(&ctx)?,
        Command::Rules(args) => commands::rules::run(&ctx, args)?,
        Command::History(args) => commands::history::run(&ctx, args)?,
        Command::Doctor(args) => commands::doctor::run(&ctx, cli.config.as_deref(), args)?,
        Command::Completions(_) => {}
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("burrow={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
