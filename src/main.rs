use anyhow::Result;
use clap::Parser;

use riskatlas::cli::{Cli, Commands};
use riskatlas::commands::{blocks, export, page, render, show};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Page(args) => page::run(&cli, args),
        Commands::Show(args) => show::run(&cli, args),
        Commands::Export(args) => export::run(&cli, args),
        Commands::Blocks(args) => blocks::run(&cli, args),
    }
}
