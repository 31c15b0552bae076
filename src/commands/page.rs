use anyhow::Result;

use crate::cli::{Cli, PageArgs};
use crate::style::ColorScheme;

use super::{check_output, open_atlas};

pub fn run(cli: &Cli, args: &PageArgs) -> Result<()> {
    check_output(&args.output, args.force)?;
    let atlas = open_atlas(args.dataset.as_deref(), cli.verbose)?;

    let scheme = ColorScheme::default();
    atlas.write_page(&args.output, &scheme, args.year)?;

    if cli.verbose > 0 {
        eprintln!("wrote {}", args.output.display());
    }
    Ok(())
}
