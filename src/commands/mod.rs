//! CLI command implementations.

pub mod blocks;
pub mod export;
pub mod page;
pub mod render;
pub mod show;

use std::ops::Deref;
use std::path::Path;

use anyhow::{bail, Result};

use crate::atlas::Atlas;

/// An atlas a command works against: owned when loaded from an explicit
/// path, borrowed from the process-wide handle otherwise.
pub(crate) enum AtlasHandle {
    Owned(Atlas),
    Shared(&'static Atlas),
}

impl Deref for AtlasHandle {
    type Target = Atlas;

    fn deref(&self) -> &Atlas {
        match self {
            AtlasHandle::Owned(atlas) => atlas,
            AtlasHandle::Shared(atlas) => atlas,
        }
    }
}

/// Load the atlas from an explicit path, or go through the memoized
/// process-wide handle (which resolves the default candidate paths).
pub(crate) fn open_atlas(dataset: Option<&Path>, verbose: u8) -> Result<AtlasHandle> {
    let atlas = match dataset {
        Some(path) => AtlasHandle::Owned(Atlas::load(path)?),
        None => AtlasHandle::Shared(Atlas::shared()?),
    };
    if verbose > 0 {
        eprintln!("loaded {} blocks", atlas.len());
    }
    Ok(atlas)
}

/// Refuse to clobber an existing output file unless --force was given.
pub(crate) fn check_output(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Output file already exists (use --force to overwrite): {}",
            path.display(),
        );
    }
    Ok(())
}
