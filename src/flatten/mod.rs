use std::path::Path;

use anyhow::Result;
use tracing::error;

use crate::error::FlattenError;
use crate::stats::document::load_stats_document;
use crate::stats::table::FeatureTable;

/// Identifier columns that never make it into the flattened output.
const IDENTIFIER_COLUMNS: [&str; 3] = ["Index", "SegId", "StructName"];

/// Separator used when synthesizing flattened column names.
const NAME_SEPARATOR: &str = "_";

/// One subject's worth of flattened stats: a single row of text values under
/// synthesized column names like `Left-Hippocampus_Volume_mm3_lh`.
///
/// Records from several stats files concatenate column-wise via [`append`]
/// before being written out as one CSV row.
///
/// [`append`]: FlattenedRecord::append
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedRecord {
    columns: Vec<String>,
    values: Vec<String>,
}

impl FlattenedRecord {
    /// The zero-column record a failed file contributes to a batch.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Concatenate `other`'s columns after this record's, in order.
    pub fn append(&mut self, other: FlattenedRecord) {
        self.columns.extend(other.columns);
        self.values.extend(other.values);
    }
}

/// Parse one FreeSurfer stats file and flatten its per-structure table into a
/// single-row record.
///
/// Column names from the `# ColHeaders` line become the table's headers; the
/// `Index`, `SegId` and `StructName` identifier columns are stripped; the
/// remaining value matrix is read column-major (all structures for the first
/// feature, then all structures for the second, ...). Each output column is
/// named `<structure>_<feature>` plus an optional filename-derived suffix,
/// e.g. `rh.aparc.stats` tags every column with `_rh`.
pub fn flatten_stats_file(path: &Path) -> Result<FlattenedRecord, FlattenError> {
    let doc = load_stats_document(path)?;
    let table = FeatureTable::from_document(&doc)?;

    let structures = table.column("StructName")?;
    let features = table.without_columns(&IDENTIFIER_COLUMNS);
    let suffix = filename_suffix(path);

    let mut columns = Vec::with_capacity(features.headers().len() * structures.len());
    for feature in features.headers() {
        for structure in &structures {
            let mut parts = vec![structure.as_str(), feature.as_str()];
            if let Some(suffix) = suffix.as_deref() {
                parts.push(suffix);
            }
            columns.push(parts.join(NAME_SEPARATOR));
        }
    }

    Ok(FlattenedRecord {
        columns,
        values: features.values_column_major(),
    })
}

/// [`flatten_stats_file`], with the three anticipated per-file failures
/// (missing header, unreadable file, missing column) logged and swallowed so
/// a batch run keeps going; the failed file contributes an empty record.
/// Structural faults still propagate.
pub fn flatten_or_empty(path: &Path) -> Result<FlattenedRecord> {
    match flatten_stats_file(path) {
        Ok(record) => Ok(record),
        Err(err) if err.is_recoverable() => {
            error!(path = %path.display(), "{err}");
            Ok(FlattenedRecord::empty())
        }
        Err(err) => Err(err.into()),
    }
}

/// Derive the hemisphere suffix from the filename: `rh.aparc.stats` → `rh`,
/// while a two-segment name like `aseg.stats` carries no suffix.
fn filename_suffix(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() > 2 {
        Some(segments[0].to_string())
    } else {
        None
    }
}
