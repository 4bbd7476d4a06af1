mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{overrides, publish, OverridesArgs, PublishArgs};
use tracing_subscriber::EnvFilter;

/// Sitecraft CLI - publish websites with their templates
#[derive(Parser, Debug)]
#[command(name = "sitecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log publish cycle details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a site document to HTML
    Publish(PublishArgs),

    /// List the components carrying a template
    Overrides(OverridesArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = match cli.command {
        Command::Publish(args) => publish(args, &cwd),
        Command::Overrides(args) => overrides(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
