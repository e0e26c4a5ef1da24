// texport - Texture export and conversion tool
// Copyright (c) 2025 Texport Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use texport::cli::{Cli, Commands};
use texport::config::{load_logging_settings, LoggingConfig};
use texport::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // `init` runs before any configuration exists
    let (config_level, logging_config) = match cli.command {
        Commands::Init(_) => ("info".to_string(), LoggingConfig::default()),
        _ => load_logging_settings(&cli.config),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    // process::exit skips destructors, so the guard is dropped by hand below
    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "texport - texture export and conversion"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::Preview(args) => args.execute(&cli.config).await,
        Commands::MeshMaps(args) => args.execute(&cli.config).await,
        Commands::Convert(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
