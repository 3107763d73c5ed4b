//! CLI entrypoint for readwiser
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod app;
mod logging;

use anyhow::{Result, anyhow, bail};
use app::App;
use chrono::Utc;
use clap::Parser;
use readwiser_application::PickQuoteUseCase;
use readwiser_domain::{OwnerId, Severity};
use readwiser_infrastructure::{ConfigLoader, JsonlSelectionLogger, SqliteStore};
use readwiser_presentation::{Cli, ConsoleFormatter, JsonFormatter, OutputFormat, OutputFormatter};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    // Held until exit so the file writer flushes
    let _log_guard = logging::init(cli.verbose, config.logging.file_path().as_deref())?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration (see errors above)");
    }

    let Some(command) = cli.command else {
        bail!("No command given. Run `readwiser --help` for usage.");
    };

    // === Dependency Injection ===
    let database_path = config.storage.database_path()?;
    let store = Arc::new(SqliteStore::open(&database_path).await?);

    let (policy, _) = config.scoring.to_scoring_policy();
    debug!("Scoring policy: {:?}", policy);

    let mut selector = PickQuoteUseCase::new(store.clone(), store.clone())
        .with_policy(policy)
        .with_params(config.selection_params());

    if let Some(path) = config.logging.selection_log_path() {
        match JsonlSelectionLogger::new(&path) {
            Some(logger) => {
                info!("Selection log: {}", logger.path().display());
                selector = selector.with_selection_logger(Arc::new(logger));
            }
            None => warn!("Selection logging disabled"),
        }
    }

    let formatter: Box<dyn OutputFormatter> = match cli.output {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    let app = App::new(
        store,
        selector,
        formatter,
        OwnerId::new(cli.owner),
        Utc::now(),
    );

    let output = app.run(command).await?;
    println!("{output}");

    Ok(())
}
