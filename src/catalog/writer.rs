//! Serialization of the catalog pair
//!
//! The table goes to CSV through the Arrow CSV writer (header row, then
//! one line per record). The descriptor goes to pretty-printed JSON with
//! two-space indentation. Existing files are overwritten.

use crate::catalog::descriptor::CatalogDescriptor;
use crate::error::Result;
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Render a catalog batch as CSV with a header row
pub fn render_csv(batch: &RecordBatch) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().with_header(true).build(Vec::new());
    writer.write(batch)?;
    Ok(writer.into_inner())
}

/// Render the descriptor as indented JSON
pub fn render_descriptor(descriptor: &CatalogDescriptor) -> Result<String> {
    Ok(serde_json::to_string_pretty(descriptor)?)
}

/// Create (or truncate) `path` and write already-rendered output to it
pub fn write_rendered(path: &Path, contents: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents)?;
    writer.flush()?;

    debug!(path = %path.display(), bytes = contents.len(), "Catalog output written");
    Ok(())
}

/// Write a catalog batch as CSV with a header row
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    write_rendered(path, &render_csv(batch)?)
}

/// Write the descriptor as indented JSON
pub fn write_descriptor(descriptor: &CatalogDescriptor, path: &Path) -> Result<()> {
    write_rendered(path, render_descriptor(descriptor)?.as_bytes())
}
