use std::path::PathBuf;

use crate::naming::PRIMARY_MARKER;

/// Filename infixes probed when locating a row's source image, in priority
/// order.
pub const SOURCE_VARIANTS: [&str; 2] = ["", PRIMARY_MARKER];

/// Extensions probed for each variant, in priority order.
pub const SOURCE_EXTENSIONS: [&str; 3] = [".jpeg", ".png", ".jpg"];

/// The on-disk file chosen for one identifier.
#[derive(Clone, Debug)]
pub struct ResolvedAsset {
    pub path: PathBuf,
    /// Extension of the matched file, dot included.
    pub extension: String,
}

#[derive(Clone, Debug)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Probe `{identifier}{variant}{extension}` candidates, variants outer,
    /// extensions inner. The first candidate that exists wins and the search
    /// stops; `None` means no candidate exists.
    pub fn resolve(&self, identifier: &str) -> Option<ResolvedAsset> {
        for variant in SOURCE_VARIANTS {
            for extension in SOURCE_EXTENSIONS {
                let candidate = self.root.join(format!("{identifier}{variant}{extension}"));
                if candidate.exists() {
                    return Some(ResolvedAsset {
                        path: candidate,
                        extension: extension.to_string(),
                    });
                }
            }
        }
        None
    }
}
