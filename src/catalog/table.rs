//! In-memory catalog table
//!
//! Rows are kept in insertion order until [`CatalogTable::sort_by_path`]
//! is called; conversion to Arrow prepends the 0-based row index.

use crate::catalog::schema::{catalog_schema_ref, COLUMNS};
use crate::infer::FileRecord;
use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Ordered collection of file records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogTable {
    rows: Vec<FileRecord>,
}

impl CatalogTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(rows: Vec<FileRecord>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, record: FileRecord) {
        self.rows.push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FileRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.rows.iter()
    }

    /// Column names in output order (without the index column)
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = COLUMNS.iter().position(|c| *c == name)?;
        Some(self.rows.iter().map(|row| row.values()[idx]).collect())
    }

    /// Stable order independent of traversal and worker scheduling
    pub fn sort_by_path(&mut self) {
        self.rows.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Arrow batch: row index column, then one `Utf8` column per catalog column
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(COLUMNS.len() + 1);
        arrays.push(Arc::new(UInt64Array::from_iter_values(
            0..self.rows.len() as u64,
        )));

        for idx in 0..COLUMNS.len() {
            let values = self.rows.iter().map(|row| row.values()[idx]);
            arrays.push(Arc::new(StringArray::from_iter_values(values)));
        }

        RecordBatch::try_new(catalog_schema_ref(), arrays)
    }
}

impl IntoIterator for CatalogTable {
    type Item = FileRecord;
    type IntoIter = std::vec::IntoIter<FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a CatalogTable {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<FileRecord> for CatalogTable {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
