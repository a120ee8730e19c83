//! Column layout of the catalog table
//!
//! Single source of truth for the 14 catalog columns. The CSV carries an
//! extra unnamed leading column holding the row index.

use arrow::datatypes::{DataType, Field, Schema};
use std::sync::Arc;

/// Catalog columns in output order
pub const COLUMNS: [&str; 14] = [
    "activity_id",
    "institution_id",
    "source_id",
    "experiment_id",
    "member_id",
    "table_id",
    "variable_id",
    "grid_label",
    "grid_freq",
    "grid_pptype",
    "grid_component",
    "start_time",
    "end_time",
    "path",
];

/// Column locating the data file of each row
pub const ASSET_COLUMN: &str = "path";

/// Format tag of the catalogued assets
pub const ASSET_FORMAT: &str = "netcdf";

/// Header of the synthetic row-index column
pub const INDEX_COLUMN: &str = "";

/// Every column except the asset column
pub fn attribute_columns() -> impl Iterator<Item = &'static str> {
    COLUMNS.into_iter().filter(|name| *name != ASSET_COLUMN)
}

/// Arrow schema of the serialized table: row index, then the catalog columns
pub fn catalog_schema() -> Schema {
    let mut fields = Vec::with_capacity(COLUMNS.len() + 1);
    fields.push(Field::new(INDEX_COLUMN, DataType::UInt64, false));
    fields.extend(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false)),
    );
    Schema::new(fields)
}

pub fn catalog_schema_ref() -> Arc<Schema> {
    Arc::new(catalog_schema())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_has_index_plus_14_fields() {
        let schema = catalog_schema();
        assert_eq!(schema.fields().len(), 15);
        assert_eq!(schema.field(0).name(), "");
        assert_eq!(schema.field(0).data_type(), &DataType::UInt64);
    }

    #[test]
    fn test_schema_field_names() {
        let schema = catalog_schema();
        let names: Vec<&str> = schema
            .fields()
            .iter()
            .skip(1)
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, COLUMNS.to_vec());
        assert_eq!(*names.last().unwrap(), ASSET_COLUMN);
    }

    #[test]
    fn test_no_nullable_fields() {
        assert!(catalog_schema().fields().iter().all(|f| !f.is_nullable()));
    }

    #[test]
    fn test_attribute_columns_exclude_path() {
        let attrs: Vec<&str> = attribute_columns().collect();
        assert_eq!(attrs.len(), 13);
        assert!(!attrs.contains(&"path"));
        assert_eq!(attrs[0], "activity_id");
        assert_eq!(attrs[12], "end_time");
    }
}
