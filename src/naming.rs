use std::path::{Path, PathBuf};

use crate::resolve::ResolvedAsset;

/// Filename infix marking the standalone product photo artifact.
pub const PRIMARY_MARKER: &str = ".主图";

/// Filename infix marking the catalog card artifact.
pub const CARD_MARKER: &str = ".图册";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNames {
    pub hero: PathBuf,
    pub card: PathBuf,
}

/// Derive both output paths for a row.
///
/// The hero name is always rebuilt from the row identifier plus the resolved
/// file's extension, whichever variant matched on disk. The card name reuses
/// the resolved filename stem with the first primary-marker occurrence
/// stripped.
pub fn names_for(out_dir: &Path, asset: &ResolvedAsset, identifier: &str) -> OutputNames {
    let hero = out_dir.join(format!("{identifier}{PRIMARY_MARKER}{}", asset.extension));

    let stem = asset
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| identifier.to_string());
    let stem = stem.replacen(PRIMARY_MARKER, "", 1);
    let card = out_dir.join(format!("{stem}{CARD_MARKER}{}", asset.extension));

    OutputNames { hero, card }
}
