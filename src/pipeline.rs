use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    catalog::{self, CatalogRow},
    compose,
    error::{SkucardError, SkucardResult},
    font::TableFont,
    naming,
    report::RunReport,
    resolve::AssetResolver,
    table,
};

/// Terminal classification of one catalog row. Created once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowOutcome {
    Processed { identifier: String },
    NotFound { identifier: String },
    Failed { identifier: String, cause: String },
}

impl RowOutcome {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Processed { identifier }
            | Self::NotFound { identifier }
            | Self::Failed { identifier, .. } => identifier,
        }
    }
}

/// Runs one catalog row to its terminal outcome.
///
/// Every stage failure is absorbed into the returned [`RowOutcome`]; nothing a
/// row does can abort the batch or affect another row.
pub struct RowPipeline<'a> {
    resolver: AssetResolver,
    font: &'a TableFont,
    out_dir: PathBuf,
}

impl<'a> RowPipeline<'a> {
    pub fn new(
        images_root: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
        font: &'a TableFont,
    ) -> Self {
        Self {
            resolver: AssetResolver::new(images_root),
            font,
            out_dir: out_dir.into(),
        }
    }

    #[tracing::instrument(skip(self, row), fields(identifier = %row.identifier))]
    pub fn process(&self, row: &CatalogRow) -> RowOutcome {
        let Some(asset) = self.resolver.resolve(&row.identifier) else {
            warn!("no source image found for '{}', skipping", row.identifier);
            return RowOutcome::NotFound {
                identifier: row.identifier.clone(),
            };
        };

        let hero = match compose::normalize(&asset.path) {
            Ok(hero) => hero,
            Err(e) => {
                warn!("failed to process '{}': {e}, skipping", asset.path.display());
                return RowOutcome::Failed {
                    identifier: row.identifier.clone(),
                    cause: e.to_string(),
                };
            }
        };

        let names = naming::names_for(&self.out_dir, &asset, &row.identifier);

        // The hero is written before any card work so card drawing can never
        // leak into it; a failed write degrades this row only.
        if let Err(e) = hero.save(&names.hero) {
            warn!("failed to save hero '{}': {e}", names.hero.display());
        }

        info!(
            "processing {} -> {}",
            asset.path.display(),
            names.card.display()
        );

        let card = table::render_card(&hero, self.font, &row.brand, &row.name, &row.model);
        drop(hero);

        if let Err(e) = card.save(&names.card) {
            warn!("failed to save card '{}': {e}", names.card.display());
        }

        RowOutcome::Processed {
            identifier: row.identifier.clone(),
        }
    }
}

/// Run the whole catalog sequentially, one row at a time.
///
/// Only catalog-level faults (missing or empty catalog, unreadable output
/// directory) are fatal; every row-level failure is recorded in the returned
/// report instead.
pub fn run_batch(
    catalog_path: &Path,
    images_root: &Path,
    out_dir: &Path,
    font: &TableFont,
) -> SkucardResult<RunReport> {
    let rows = catalog::read_rows(catalog_path)?;

    std::fs::create_dir_all(out_dir).map_err(|e| {
        SkucardError::persist(format!("create output dir '{}': {e}", out_dir.display()))
    })?;

    let pipeline = RowPipeline::new(images_root, out_dir, font);
    let mut report = RunReport::new();
    for row in &rows {
        report.record(pipeline.process(row));
    }
    Ok(report)
}
