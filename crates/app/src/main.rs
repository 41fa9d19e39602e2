use anyhow::Context;
use clap::Parser;

use pocketbook_app::cli::{self, Cli};
use pocketbook_infra::{Config, LogFormat};
use pocketbook_observability::OutputFormat;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.data_dir.clone()).context("failed to load configuration")?;

    let format = match config.log_format {
        LogFormat::Pretty => OutputFormat::Pretty,
        LogFormat::Json => OutputFormat::Json,
    };
    pocketbook_observability::init(&config.log_filter, format);

    cli::run(cli, &config)
}
