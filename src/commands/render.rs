use anyhow::Result;

use crate::cli::{Cli, RenderArgs};
use crate::style::ColorScheme;

use super::{check_output, open_atlas};

pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    check_output(&args.output, args.force)?;
    let atlas = open_atlas(args.dataset.as_deref(), cli.verbose)?;

    let selection = atlas.select(args.focus.as_deref());
    if let (Some(requested), None) = (args.focus.as_deref(), selection.block_name()) {
        eprintln!("block {requested:?} not found; rendering the whole region");
    }

    let scheme = ColorScheme::default();
    atlas.render_svg(&args.output, args.overlay, &scheme, &selection, args.width)?;

    if cli.verbose > 0 {
        eprintln!("wrote {}", args.output.display());
    }
    Ok(())
}
