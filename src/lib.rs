//! frepp-catalog - ESM catalogs for frepp post-processing output
//!
//! Builds an intake-esm style catalog from a GFDL frepp `pp/` directory:
//! every netCDF file in the tree becomes one row whose attributes are
//! inferred purely from its path and file name.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      pp/ root directory                      │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ one task per subdirectory
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Walker Worker Pool                       │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐         ┌─────────┐   │
//! │  │Worker 1 │  │Worker 2 │  │Worker 3 │  ...    │Worker N │   │
//! │  │  *.nc   │  │  *.nc   │  │  *.nc   │         │  *.nc   │   │
//! │  └────┬────┘  └────┬────┘  └────┬────┘         └────┬────┘   │
//! │       └────────────┴─────┬──────┴───────────────────┘        │
//! │                          ▼                                   │
//! │            ┌──────────────────────────┐                      │
//! │            │   Attribute inference    │                      │
//! │            │  - path slots            │                      │
//! │            │  - date-range tokens     │                      │
//! │            └────────────┬─────────────┘                      │
//! └─────────────────────────┼────────────────────────────────────┘
//!                           ▼
//!            ┌──────────────────────────────┐
//!            │ <id>.csv  +  <id>.json       │
//!            └──────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! frepp-catalog /archive/exp/gfdl.intel18-prod-openmp/pp odiv-210
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod infer;
pub mod progress;
pub mod walker;

pub use catalog::{catalog_from_dir, BuildReport, CatalogBuilder, CatalogDescriptor, CatalogTable};
pub use config::{AttributeOverrides, CatalogConfig, CliArgs};
pub use error::{CatalogError, FormatError, Result};
pub use infer::{infer_attributes, parse_date_string, FileRecord};
pub use walker::find_nc_files;
