//! ESM catalog descriptor
//!
//! JSON companion of the CSV table, following the esm-collection
//! convention understood by intake-esm. Field order here is the key order
//! of the serialized object.

use crate::catalog::schema::{attribute_columns, ASSET_COLUMN, ASSET_FORMAT};
use serde::{Deserialize, Serialize};

/// Descriptor format version
pub const ESMCAT_VERSION: &str = "0.1.0";

/// One searchable column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub column_name: String,
    /// Controlled vocabulary reference; never resolved, always empty
    pub vocabulary: String,
}

/// Column holding the data-file locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub column_name: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDescriptor {
    pub esmcat_version: String,
    pub id: String,
    pub description: String,
    pub catalog_file: String,
    pub attributes: Vec<AttributeEntry>,
    pub assets: AssetEntry,
}

impl CatalogDescriptor {
    /// Descriptor for a catalog built from `description` and stored in `catalog_file`
    pub fn new(id: &str, description: &str, catalog_file: &str) -> Self {
        Self {
            esmcat_version: ESMCAT_VERSION.to_string(),
            id: id.to_string(),
            description: description.to_string(),
            catalog_file: catalog_file.to_string(),
            attributes: attribute_columns()
                .map(|name| AttributeEntry {
                    column_name: name.to_string(),
                    vocabulary: String::new(),
                })
                .collect(),
            assets: AssetEntry {
                column_name: ASSET_COLUMN.to_string(),
                format: ASSET_FORMAT.to_string(),
            },
        }
    }
}
