mod cli;
mod observability;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use megaverse_core::config::loader::load_config_with_overrides;
use megaverse_core::{
    Coordinate, MegaverseApi, MegaverseClient, MegaverseConfig, Reconciler, ReconcilerSettings,
    ShapeKind,
};
use output::{print_error, print_grid, print_report};

/// The shape removed by the default run, as a delete example.
const SAMPLE_DELETE: (ShapeKind, Coordinate) = (ShapeKind::Soloon, Coordinate::new(3, 4));

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound) {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    observability::init_tracing();

    let cli = Cli::parse();

    let mut overrides: Vec<(&str, &str)> = Vec::new();
    if let Some(id) = cli.candidate_id.as_deref() {
        overrides.push(("api.candidate_id", id));
    }
    if let Some(level) = cli.log_level.as_deref() {
        overrides.push(("logging.level", level));
    }
    let cfg = match load_config_with_overrides(cli.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(e) => {
            print_error(&format!("Configuration error: {e}"));
            std::process::exit(2);
        }
    };
    observability::apply_logging_level(&cfg.logging.level);
    tracing::debug!(base_url = %cfg.api.base_url, "Configuration loaded");

    if let Err(e) = run(cli.command.unwrap_or(Commands::Run), &cfg).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(command: Commands, cfg: &MegaverseConfig) -> Result<()> {
    let client = Arc::new(MegaverseClient::from_settings(&cfg.api));
    let mut reconciler = Reconciler::new(client.clone(), ReconcilerSettings::from_config(cfg));

    match command {
        Commands::Run => {
            let report = reconciler.create_cross_pattern(cfg.grid.rows).await;
            print_report("Cross", &report);

            let (kind, at) = SAMPLE_DELETE;
            reconciler.delete_shape(kind, at).await;

            reconcile(&mut reconciler).await;
        }
        Commands::Cross(args) => {
            let size = args.size.unwrap_or(cfg.grid.rows);
            let report = reconciler.create_cross_pattern(size).await;
            print_report("Cross", &report);
        }
        Commands::Delete(args) => {
            let at = Coordinate::new(args.row, args.column);
            reconciler.delete_shape(args.kind.into(), at).await;
        }
        Commands::Reconcile => reconcile(&mut reconciler).await,
        Commands::Goal => {
            let grid = client.goal_map().await?;
            print_grid(&grid);
        }
    }

    Ok(())
}

/// A missing goal map is reported but does not change the exit code.
async fn reconcile(reconciler: &mut Reconciler) {
    match reconciler.reconcile_from_goal().await {
        Ok(report) => print_report("Goal map", &report),
        Err(e) => print_error(&format!("Can't create the megaverse: {e}")),
    }
}
