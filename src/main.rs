use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use focusflow::cli::args::{Cli, Commands};
use focusflow::cli::commands;
use focusflow::config::Paths;
use focusflow::logging::{init_file_logging, init_logging};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.config_dir.clone())?;
    let format = cli.output;

    // The full-screen timer owns the terminal, so its logs go to a file.
    match &cli.command {
        Commands::Timer(args) if !args.plain => {
            paths.ensure_dirs()?;
            init_file_logging(cli.verbose, &paths.log_file)?;
        }
        _ => init_logging(cli.verbose),
    }

    let output = match &cli.command {
        Commands::Timer(args) => {
            commands::timer(&paths, args, format).context("timer failed")?
        }
        Commands::Settings(args) => commands::settings(&paths, &args.command, format)
            .with_context(|| format!("settings in {}", paths.root.display()))?,
        Commands::Completions { shell } => commands::completions(*shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
