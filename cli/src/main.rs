//! CLI entrypoint for Advisor Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use council_application::{
    CoordinateInput, CoordinateUseCase, CoordinationProgress, NoCache, NoProgress, ResponseCache,
};
use council_domain::{Context, OutputFormat, Query};
use council_infrastructure::{ConfigLoader, FileConfig, HttpAdvisorGateway, InMemoryResponseCache};
use council_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting Advisor Council");

    let config = load_config(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", effective_config(&config)?);
        return Ok(());
    }

    let warnings = config.ensure_valid()?;
    for issue in &warnings {
        warn!("{}", issue.message);
    }

    ConsoleFormatter::set_color(config.output.color && std::env::var_os("NO_COLOR").is_none());
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    let Some(text) = cli.query.clone() else {
        bail!("A query is required. Run with --help for usage.");
    };

    let mut context = Context::new();
    for (key, value) in &cli.context {
        context.insert(key.clone(), value.clone());
    }

    let input = if cli.emergency {
        if !cli.advisors.is_empty() {
            warn!("--advisor is ignored for emergency rounds");
        }
        let severity = cli.severity.as_deref().unwrap_or("high");
        CoordinateInput::emergency(text, context, severity)?
    } else {
        let input = CoordinateInput::new(Query::try_new(text, context)?);
        if cli.advisors.is_empty() {
            input
        } else {
            input.with_advisors(cli.advisors.clone())
        }
    };

    // === Dependency Injection ===
    let (mut params, _) = config.coordination.to_params();
    if cli.no_assist {
        params = params.with_assisted_routing(false);
    }

    let gateway = Arc::new(HttpAdvisorGateway::new(
        config.provider.to_gateway_config(),
    )?);
    let cache: Arc<dyn ResponseCache> = if config.cache.enabled {
        Arc::new(InMemoryResponseCache::with_limits(
            config.cache.capacity,
            config.cache.ttl(),
        ))
    } else {
        Arc::new(NoCache)
    };
    let use_case = CoordinateUseCase::new(gateway, cache, params);

    // Ctrl-C aborts the round and every in-flight advisor call
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let progress: Box<dyn CoordinationProgress> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let result = use_case
        .execute_with_progress(input, progress.as_ref(), &cancel)
        .await?;

    info!(
        advisors = result.responding_agents.len(),
        actions = result.action_items.len(),
        "Coordination complete"
    );

    println!("{}", ConsoleFormatter::render(&result, format));

    Ok(())
}

/// Verbosity picks the level unless `RUST_LOG` is set
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    Ok(ConfigLoader::load(cli.config.as_ref())?)
}

/// Render the merged configuration with any inline API key masked
fn effective_config(config: &FileConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown).context("Failed to render configuration")
}
