//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use lookout::{FileStore, LookupEngine};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::settings_path;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let output_format = cli.output.unwrap_or(OutputFormat::Pretty);
    let config_path = settings_path(cli.config)?;
    debug!(path = %config_path.display(), "settings file");

    // Needs no engine, and must work even when the file is unreadable
    if let Commands::Config(args) = cli.command {
        return commands::config::execute(&config_path, args);
    }

    let mut builder = LookupEngine::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .store(Arc::new(FileStore::new(&config_path)));
    if let Some(resolver) = cli.resolver {
        builder = builder.resolver(resolver);
    }
    let engine = builder.build().await?;

    let ctx = commands::Context {
        engine,
        output_format,
    };

    match cli.command {
        Commands::Ip(args) => commands::ip::execute(&ctx, args).await,
        Commands::Whois(args) => commands::whois::execute(&ctx, args).await,
        Commands::Dns(args) => commands::dns::execute(&ctx, args).await,
        Commands::Providers(args) => commands::providers::execute(&ctx, args).await,
        Commands::Theme(args) => commands::theme::execute(&ctx, args).await,
        Commands::Config(_) => Ok(()),
    }
}

/// Log to stderr so structured output on stdout stays parseable
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
