//! Catalog builder - orchestrates a full catalog build
//!
//! The builder is responsible for:
//! - Listing the immediate subdirectories of the root
//! - Fanning the `.nc` walk out over the worker pool
//! - Inferring one record per discovered file
//! - Writing `<identifier>.csv` and `<identifier>.json`
//!
//! Both outputs are rendered in memory first, so a failure during
//! inference or serialization leaves no file behind.

use crate::catalog::descriptor::CatalogDescriptor;
use crate::catalog::table::CatalogTable;
use crate::catalog::writer::{render_csv, render_descriptor, write_rendered};
use crate::config::{CatalogConfig, DEFAULT_IDENTIFIER};
use crate::error::{CatalogError, Result};
use crate::infer::{infer_attributes, FileRecord};
use crate::walker::{list_subdirs, scan_all};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a completed build
#[derive(Debug)]
pub struct BuildReport {
    /// The catalog, sorted by path
    pub table: CatalogTable,

    /// Written tabular catalog
    pub csv_path: PathBuf,

    /// Written descriptor
    pub json_path: PathBuf,

    /// Subdirectories scanned in parallel
    pub subdirs: usize,

    /// Time taken for the build
    pub duration: Duration,
}

impl BuildReport {
    pub fn total_files(&self) -> usize {
        self.table.len()
    }
}

/// Builds a catalog according to a [`CatalogConfig`]
pub struct CatalogBuilder {
    config: CatalogConfig,
}

impl CatalogBuilder {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Walk, infer, assemble and write the catalog
    pub fn build(&self) -> Result<BuildReport> {
        let start = Instant::now();
        self.config.validate()?;

        let root = absolute(&self.config.root)?;
        if !root.exists() {
            return Err(CatalogError::NotFound { path: root });
        }

        info!(
            root = %root.display(),
            identifier = %self.config.identifier,
            workers = self.config.worker_count,
            "Starting catalog build"
        );

        let subdirs = list_subdirs(&root)?;
        let subdir_count = subdirs.len();
        debug!(subdirs = subdir_count, "Dispatching subdirectory scans");

        let scans = scan_all(subdirs, self.config.worker_count)?;
        let files: Vec<PathBuf> = scans.into_iter().flat_map(|scan| scan.files).collect();
        debug!(files = files.len(), "Discovery finished");

        let records = files
            .iter()
            .map(|file| infer_attributes(file, &self.config.overrides))
            .collect::<std::result::Result<Vec<FileRecord>, _>>()?;

        let mut table = CatalogTable::from_records(records);
        table.sort_by_path();

        // Render everything before touching the output files
        let csv = render_csv(&table.to_record_batch()?)?;
        let descriptor = CatalogDescriptor::new(
            &self.config.identifier,
            &self.config.root.display().to_string(),
            &self.config.csv_file_name(),
        );
        let json = render_descriptor(&descriptor)?;

        let csv_path = self.config.csv_path();
        let json_path = self.config.json_path();
        write_rendered(&csv_path, &csv)?;
        write_rendered(&json_path, json.as_bytes())?;

        let duration = start.elapsed();
        info!(
            files = table.len(),
            subdirs = subdir_count,
            duration_ms = duration.as_millis() as u64,
            csv = %csv_path.display(),
            "Catalog build completed"
        );

        Ok(BuildReport {
            table,
            csv_path,
            json_path,
            subdirs: subdir_count,
            duration,
        })
    }
}

/// Build `<identifier>.csv`/`.json` in the working directory and return the table.
///
/// `identifier` defaults to `catalog`.
pub fn catalog_from_dir(root: impl AsRef<Path>, identifier: Option<&str>) -> Result<CatalogTable> {
    let config = CatalogConfig::new(
        root.as_ref(),
        identifier.unwrap_or(DEFAULT_IDENTIFIER),
    );
    CatalogBuilder::new(config).build().map(|report| report.table)
}

/// Anchor a relative root at the working directory without resolving links
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeOverrides;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn pp_tree(base: &Path) -> PathBuf {
        let pp = base.join("GFDL-experiment/gfdl.intel18-prod-openmp/pp");
        touch(&pp.join("atmos/ts/monthly/5yr/atmos.199001-199412.tas.nc"));
        touch(&pp.join("atmos/ts/monthly/5yr/atmos.199001-199412.pr.nc"));
        touch(&pp.join("atmos/av/annual_5yr/atmos.1990-1994.ann.nc"));
        touch(&pp.join("ocean/ts/annual/10yr/ocean.1990-1999.sst.nc"));
        touch(&pp.join("ocean/ts/annual/10yr/ocean.static.nc"));
        pp
    }

    #[test]
    fn test_build_writes_pair() {
        let dir = tempdir().unwrap();
        let pp = pp_tree(dir.path());
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let config = CatalogConfig::new(&pp, "catalog")
            .with_output_dir(&out)
            .with_workers(2);
        let report = CatalogBuilder::new(config).build().unwrap();

        assert_eq!(report.total_files(), 5);
        assert_eq!(report.subdirs, 2);
        assert_eq!(report.csv_path, out.join("catalog.csv"));
        assert!(report.csv_path.exists());
        assert!(report.json_path.exists());

        let paths = report.table.column("path").unwrap();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_bad_date_token_aborts_without_output() {
        let dir = tempdir().unwrap();
        let pp = pp_tree(dir.path());
        touch(&pp.join("ice/ts/monthly/5yr/ice.1990-199412.siconc.nc"));
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let config = CatalogConfig::new(&pp, "catalog").with_output_dir(&out);
        let err = CatalogBuilder::new(config).build().unwrap_err();

        assert!(matches!(err, CatalogError::Format(_)));
        assert!(!out.join("catalog.csv").exists());
        assert!(!out.join("catalog.json").exists());
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let config = CatalogConfig::new(dir.path().join("missing"), "catalog")
            .with_output_dir(dir.path());
        let err = CatalogBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn test_overrides_reach_every_record() {
        let dir = tempdir().unwrap();
        let pp = pp_tree(dir.path());

        let config = CatalogConfig::new(&pp, "catalog")
            .with_output_dir(dir.path())
            .with_overrides(AttributeOverrides::new().variable_id("foo"));
        let report = CatalogBuilder::new(config).build().unwrap();

        assert!(report.table.iter().all(|r| r.variable_id == "foo"));
    }

    #[test]
    fn test_unwritable_table_leaves_no_descriptor() {
        let dir = tempdir().unwrap();
        let pp = pp_tree(dir.path());
        let out = dir.path().join("out");
        // A directory where the table should go makes the first write fail
        fs::create_dir_all(out.join("catalog.csv")).unwrap();

        let config = CatalogConfig::new(&pp, "catalog").with_output_dir(&out);
        let err = CatalogBuilder::new(config).build().unwrap_err();

        assert!(matches!(err, CatalogError::Io(_)));
        assert!(!out.join("catalog.json").exists());
    }
}
