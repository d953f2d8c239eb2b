use clap::{Parser, Subcommand, ValueEnum};
use megaverse_core::ShapeKind;

#[derive(Parser)]
#[command(name = "megaverse")]
#[command(about = "Megaverse CLI — draw the goal map through the challenge API")]
#[command(version)]
pub struct Cli {
    /// What to do (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a TOML config file (defaults to ./megaverse.toml)
    #[arg(short, long, global = true, env = "MEGAVERSE_CONFIG")]
    pub config: Option<String>,

    /// Candidate id (overrides config and environment)
    #[arg(long, global = true)]
    pub candidate_id: Option<String>,

    /// Log level (overrides logging.level)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw the cross, delete the sample Soloon, then reconcile the goal map
    Run,
    /// Draw a Polyanet cross on a square grid
    Cross(CrossArgs),
    /// Delete one shape
    Delete(DeleteArgs),
    /// Recreate the goal map
    Reconcile,
    /// Fetch and print the goal map
    Goal,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Polyanet,
    Soloon,
    Cometh,
}

impl From<KindArg> for ShapeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Polyanet => ShapeKind::Polyanet,
            KindArg::Soloon => ShapeKind::Soloon,
            KindArg::Cometh => ShapeKind::Cometh,
        }
    }
}

#[derive(clap::Args)]
pub struct CrossArgs {
    /// Grid side; must match the configured grid (defaults to grid.rows)
    #[arg(long)]
    pub size: Option<usize>,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Kind of shape to delete
    pub kind: KindArg,
    /// Row index
    #[arg(allow_hyphen_values = true)]
    pub row: i64,
    /// Column index
    #[arg(allow_hyphen_values = true)]
    pub column: i64,
}
