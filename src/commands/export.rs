use anyhow::{bail, Result};

use crate::atlas::Selection;
use crate::cli::{Cli, ExportArgs};

use super::{check_output, open_atlas};

pub fn run(cli: &Cli, args: &ExportArgs) -> Result<()> {
    check_output(&args.output, args.force)?;
    let atlas = open_atlas(args.dataset.as_deref(), cli.verbose)?;

    let name = match atlas.select(Some(&args.block)) {
        Selection::AllBlocks => bail!(
            "Unknown block: {:?}. Use `riskatlas blocks` to list names.",
            args.block,
        ),
        Selection::Block(name) => name,
    };

    atlas.export_csv(&name, &args.output)?;
    if cli.verbose > 0 {
        eprintln!("wrote {}", args.output.display());
    }
    Ok(())
}
