//! Recursive netCDF discovery
//!
//! Walks a local directory tree with `walkdir` and collects every regular
//! file ending in `.nc`.

use crate::error::{CatalogError, Result};
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Extension of the data files the catalog lists
pub const DATA_FILE_EXTENSION: &str = ".nc";

/// Collect the paths of every `.nc` file anywhere below `root`.
///
/// Order is unspecified. Symbolic links to directories are followed; a link
/// back to an ancestor fails with [`CatalogError::Walk`].
pub fn find_nc_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(CatalogError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && is_data_file(&entry.file_name().to_string_lossy()) {
            trace!(path = %entry.path().display(), "Found data file");
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// List the immediate subdirectories of `root` (one level only)
pub fn list_subdirs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(CatalogError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let mut subdirs = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            subdirs.push(entry.into_path());
        }
    }
    Ok(subdirs)
}

fn is_data_file(name: &str) -> bool {
    name.ends_with(DATA_FILE_EXTENSION)
}
