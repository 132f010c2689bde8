use anyhow::{Context, Result};
use clap::Parser;
use lyceum::Lyceum;
use lyceum::domain::config::{AppConfig, LoggingConfig};
use lyceum_cli::args::Cli;
use lyceum_kernel::config::load_config;
use lyceum_logger::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: AppConfig = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    let _logger = init_logging(&config.logging)?;
    tracing::debug!(url = %config.database.url, "Opening school database");

    let school = Lyceum::connect(&config.database).await?;
    let mut stdout = std::io::stdout().lock();
    lyceum_cli::execute(&school, cli.command, &mut stdout).await
}

fn init_logging(config: &LoggingConfig) -> Result<Logger> {
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level_name(&config.level)?.ansi(config.ansi);
    let builder = match &config.filter {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };

    let logger = match &config.directory {
        Some(directory) => {
            let builder = builder.path(directory);
            if config.json { builder.json().init() } else { builder.init() }
        },
        None => builder.init(),
    };
    logger.context("Failed to initialize logging")
}
