use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, StringArray},
    csv::WriterBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use tracing::warn;

use crate::flatten::FlattenedRecord;

/// Build a one-row Arrow batch from a flattened record: one Utf8 field per
/// synthesized column, every cell kept as the raw text parsed from the file.
pub fn to_record_batch(record: &FlattenedRecord) -> Result<RecordBatch> {
    let fields: Vec<Field> = record
        .column_names()
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, false))
        .collect();

    let arrays: Vec<ArrayRef> = record
        .values()
        .iter()
        .map(|value| Arc::new(StringArray::from(vec![value.clone()])) as ArrayRef)
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .context("building record batch from flattened record")
}

/// Write the record to `output_path` as CSV: a header row of the synthesized
/// column names and one data row. A fully empty record (every input failed)
/// still produces the file, just with nothing in it.
pub fn write_csv(record: &FlattenedRecord, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("creating file {}", output_path.display()))?;

    if record.is_empty() {
        warn!("no columns to write, output will be empty");
        return Ok(());
    }

    let batch = to_record_batch(record)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch).context("writing CSV batch")?;

    Ok(())
}
