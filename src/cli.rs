use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::atlas::Overlay;

/// Risk atlas CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "riskatlas", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a choropleth overlay to an SVG file
    Render(RenderArgs),

    /// Write the self-contained dashboard page
    Page(PageArgs),

    /// Print one block's metrics and projected trend
    Show(ShowArgs),

    /// Export one block's row as CSV
    Export(ExportArgs),

    /// List the block names in the dataset
    Blocks(BlocksArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Dataset file; defaults to the standard candidate locations
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Measure to color by
    #[arg(long, value_enum, default_value = "category")]
    pub overlay: Overlay,

    /// Center and zoom on one block
    #[arg(long)]
    pub focus: Option<String>,

    /// Output width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Output file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Dataset file; defaults to the standard candidate locations
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Final year of the projection window
    #[arg(long, default_value_t = 2025)]
    pub year: i32,

    /// Output file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Block name, as listed by `riskatlas blocks`
    pub block: String,

    /// Dataset file; defaults to the standard candidate locations
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Final year of the projection window
    #[arg(long, default_value_t = 2025)]
    pub year: i32,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Block name, as listed by `riskatlas blocks`
    pub block: String,

    /// Dataset file; defaults to the standard candidate locations
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// Dataset file; defaults to the standard candidate locations
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,
}
