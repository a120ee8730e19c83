//! Filesystem discovery
//!
//! `scan` walks one directory tree for `.nc` files; `pool` fans that walk
//! out over the immediate subdirectories of the catalog root.
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │     CatalogBuilder      │
//!                     │  - list_subdirs(root)   │
//!                     └───────────┬─────────────┘
//!                                 │
//!       ┌─────────────────────────┼─────────────────────────┐
//!       │                         │                         │
//! ┌─────▼─────┐             ┌─────▼─────┐             ┌─────▼─────┐
//! │  Worker 1 │             │  Worker 2 │             │  Worker N │
//! │ find_nc_  │             │ find_nc_  │             │ find_nc_  │
//! │  files    │             │  files    │             │  files    │
//! └───────────┘             └───────────┘             └───────────┘
//! ```

pub mod pool;
pub mod scan;

pub use pool::{scan_all, SubdirScan};
pub use scan::{find_nc_files, list_subdirs, DATA_FILE_EXTENSION};
