//! Catalog assembly and serialization
//!
//! # Module Structure
//!
//! - `schema`: column order and Arrow schema (index + 14 columns)
//! - `table`: in-memory `CatalogTable`
//! - `descriptor`: esmcat JSON descriptor
//! - `writer`: CSV + JSON output
//! - `builder`: end-to-end `CatalogBuilder`

pub mod builder;
pub mod descriptor;
pub mod schema;
pub mod table;
pub mod writer;

pub use builder::{catalog_from_dir, BuildReport, CatalogBuilder};
pub use descriptor::{AssetEntry, AttributeEntry, CatalogDescriptor, ESMCAT_VERSION};
pub use schema::{catalog_schema, catalog_schema_ref, COLUMNS};
pub use table::CatalogTable;
