use anyhow::Context;
use mentor_review::cli::commands::{execute, CommandContext};
use mentor_review::cli::Cli;
use mentor_review::utils::logging::init_tracing;
use mentor_review::{HttpRegistrationBackend, RegistrationBackend, ReviewConfig};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    // Load .env before clap so env-backed flags see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    let mut config = ReviewConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
        config.validate().context("--base-url")?;
    }

    init_tracing(&config.logging, cli.verbose)?;

    let backend = Arc::new(HttpRegistrationBackend::from_config(&config.backend)?);
    tracing::debug!(backend = %backend.describe(), "Configuration ready");
    let ctx = CommandContext::new(config, cli.no_color, cli.json);

    let code = execute(cli.command, &ctx, backend, &cli.config).await?;
    Ok(code)
}
