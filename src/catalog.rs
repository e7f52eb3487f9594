use std::path::Path;

use tracing::warn;

use crate::error::{SkucardError, SkucardResult};

/// One product record from the catalog, fields trimmed of surrounding
/// whitespace. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogRow {
    pub identifier: String,
    pub brand: String,
    pub name: String,
    pub model: String,
}

/// Read every usable row from the catalog CSV.
///
/// The first record is a header and is discarded. Records with fewer than four
/// fields are dropped with a warning and never reach the pipeline; extra
/// fields are ignored. A missing catalog and a catalog with no data records
/// are both fatal.
pub fn read_rows(path: &Path) -> SkucardResult<Vec<CatalogRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SkucardError::catalog(format!("open '{}': {e}", path.display())))?;

    let mut rows = Vec::new();
    let mut records_seen = 0usize;
    for (idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| SkucardError::catalog(format!("read '{}': {e}", path.display())))?;
        records_seen += 1;

        if record.len() < 4 {
            // Line number counts the header row.
            warn!(
                "catalog line {} has {} of 4 required fields, skipping: {:?}",
                idx + 2,
                record.len(),
                record
            );
            continue;
        }

        rows.push(CatalogRow {
            identifier: record[0].to_string(),
            brand: record[1].to_string(),
            name: record[2].to_string(),
            model: record[3].to_string(),
        });
    }

    if records_seen == 0 {
        return Err(SkucardError::catalog(format!(
            "'{}' is empty or has only a header row",
            path.display()
        )));
    }

    Ok(rows)
}
