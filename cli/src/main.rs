//! CLI entrypoint for cappello
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use cappello_application::HandleInteractionUseCase;
use cappello_domain::{QuestionBank, RandomSource};
use cappello_infrastructure::{
    ConfigLoader, ConsolePlatform, FileConfig, SeededRngSource, Severity, ThreadRngSource,
};
use cappello_presentation::{Cli, SortingRepl};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}: {}", issue.field, issue.message),
            Severity::Warning => eprintln!("config warning: {}: {}", issue.field, issue.message),
        }
    }
    if FileConfig::has_errors(&issues) {
        bail!("invalid configuration");
    }

    info!("Starting cappello");

    // === Dependency Injection ===
    let params = config.quiz.to_params();
    let platform = Arc::new(ConsolePlatform::new(config.bot.quiz_channel.clone()));

    let rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => {
            info!(seed, "using seeded randomness");
            Box::new(SeededRngSource::new(seed))
        }
        None => Box::new(ThreadRngSource::new()),
    };

    let use_case = HandleInteractionUseCase::new(
        Arc::clone(&platform),
        Arc::clone(&platform),
        QuestionBank::builtin(),
        params,
        rng,
    );

    let repl = SortingRepl::new(use_case, platform);
    repl.run().await?;

    Ok(())
}
