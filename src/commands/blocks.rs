use anyhow::Result;

use crate::cli::{BlocksArgs, Cli};

use super::open_atlas;

pub fn run(cli: &Cli, args: &BlocksArgs) -> Result<()> {
    let atlas = open_atlas(args.dataset.as_deref(), cli.verbose)?;
    for name in atlas.block_names() {
        println!("{name}");
    }
    Ok(())
}
