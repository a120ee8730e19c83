//! Configuration types for frepp-catalog
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation
//! - Attribute overrides applied to every inferred record

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Identifier used when none is given on the command line
pub const DEFAULT_IDENTIFIER: &str = "catalog";

/// Build an ESM catalog from a frepp post-processing directory
#[derive(Parser, Debug, Clone)]
#[command(
    name = "frepp-catalog",
    version,
    about = "Build an ESM catalog (CSV + JSON descriptor) from a frepp pp directory",
    long_about = "Recursively discovers netCDF files under a post-processing directory,\n\
                  infers catalog attributes from each file's path and name, and writes\n\
                  <IDENTIFIER>.csv and <IDENTIFIER>.json.",
    after_help = "EXAMPLES:\n    \
        frepp-catalog /archive/exp/gfdl.intel18-prod-openmp/pp\n    \
        frepp-catalog /archive/exp/pp odiv-210 -w 16\n    \
        frepp-catalog /archive/exp/pp odiv-210 --experiment-id historical -o catalogs/"
)]
pub struct CliArgs {
    /// Post-processing root directory to catalog
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Catalog identifier (names the .csv and .json outputs)
    #[arg(value_name = "IDENTIFIER", default_value = DEFAULT_IDENTIFIER)]
    pub identifier: String,

    /// Number of directory-scanning worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Directory the catalog files are written to
    #[arg(short = 'o', long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override activity_id for every file
    #[arg(long, value_name = "VALUE")]
    pub activity_id: Option<String>,

    /// Override institution_id for every file
    #[arg(long, value_name = "VALUE")]
    pub institution_id: Option<String>,

    /// Override source_id for every file
    #[arg(long, value_name = "VALUE")]
    pub source_id: Option<String>,

    /// Override experiment_id for every file
    #[arg(long, value_name = "VALUE")]
    pub experiment_id: Option<String>,

    /// Override member_id for every file
    #[arg(long, value_name = "VALUE")]
    pub member_id: Option<String>,

    /// Override table_id for every file
    #[arg(long, value_name = "VALUE")]
    pub table_id: Option<String>,

    /// Override variable_id for every file
    #[arg(long, value_name = "VALUE")]
    pub variable_id: Option<String>,

    /// Override grid_label for every file
    #[arg(long, value_name = "VALUE")]
    pub grid_label: Option<String>,
}

fn default_workers() -> usize {
    // Directory scanning is I/O bound; one thread per core is plenty
    num_cpus::get()
}

/// Caller-supplied values for the eight descriptive attributes.
///
/// A `None` field falls back to the naming convention:
///
/// | field | default |
/// |---|---|
/// | `activity_id` | `GFDL` |
/// | `institution_id` | `NOAA-GFDL` |
/// | `source_id` | experiment directory, 8th path segment from the end |
/// | `experiment_id` | empty |
/// | `member_id` | `r1i1p1f1` |
/// | `table_id` | directory 3rd from the end (e.g. `monthly`, `annual`) |
/// | `variable_id` | last `.` component of the file stem |
/// | `grid_label` | `gn` |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeOverrides {
    pub activity_id: Option<String>,
    pub institution_id: Option<String>,
    pub source_id: Option<String>,
    pub experiment_id: Option<String>,
    pub member_id: Option<String>,
    pub table_id: Option<String>,
    pub variable_id: Option<String>,
    pub grid_label: Option<String>,
}

impl AttributeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity_id(mut self, value: impl Into<String>) -> Self {
        self.activity_id = Some(value.into());
        self
    }

    pub fn institution_id(mut self, value: impl Into<String>) -> Self {
        self.institution_id = Some(value.into());
        self
    }

    pub fn source_id(mut self, value: impl Into<String>) -> Self {
        self.source_id = Some(value.into());
        self
    }

    pub fn experiment_id(mut self, value: impl Into<String>) -> Self {
        self.experiment_id = Some(value.into());
        self
    }

    pub fn member_id(mut self, value: impl Into<String>) -> Self {
        self.member_id = Some(value.into());
        self
    }

    pub fn table_id(mut self, value: impl Into<String>) -> Self {
        self.table_id = Some(value.into());
        self
    }

    pub fn variable_id(mut self, value: impl Into<String>) -> Self {
        self.variable_id = Some(value.into());
        self
    }

    pub fn grid_label(mut self, value: impl Into<String>) -> Self {
        self.grid_label = Some(value.into());
        self
    }

    /// True when no attribute is overridden
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Post-processing root directory
    pub root: PathBuf,

    /// Catalog identifier (file stem of both outputs)
    pub identifier: String,

    /// Directory receiving `<identifier>.csv` and `<identifier>.json`
    pub output_dir: PathBuf,

    /// Number of scanning threads
    pub worker_count: usize,

    /// Attribute overrides
    pub overrides: AttributeOverrides,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl CatalogConfig {
    /// Configuration with default workers, output in the working directory
    pub fn new(root: impl Into<PathBuf>, identifier: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            identifier: identifier.into(),
            output_dir: PathBuf::from("."),
            worker_count: default_workers(),
            overrides: AttributeOverrides::default(),
            show_progress: false,
            verbose: false,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_workers(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    pub fn with_overrides(mut self, overrides: AttributeOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let overrides = AttributeOverrides {
            activity_id: args.activity_id,
            institution_id: args.institution_id,
            source_id: args.source_id,
            experiment_id: args.experiment_id,
            member_id: args.member_id,
            table_id: args.table_id,
            variable_id: args.variable_id,
            grid_label: args.grid_label,
        };

        let config = Self {
            root: args.root,
            identifier: args.identifier,
            output_dir: args.output_dir,
            worker_count: args.workers,
            overrides,
            show_progress: !args.quiet,
            verbose: args.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check worker count, identifier and output directory.
    ///
    /// The root is not checked here; a missing root is reported by the
    /// build itself as `NotFound`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 || self.worker_count > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: self.worker_count,
                max: MAX_WORKERS,
            });
        }

        if self.identifier.trim().is_empty() {
            return Err(ConfigError::InvalidIdentifier {
                identifier: self.identifier.clone(),
                reason: "identifier is empty".into(),
            });
        }

        if self.identifier.contains(['/', '\\']) {
            return Err(ConfigError::InvalidIdentifier {
                identifier: self.identifier.clone(),
                reason: "identifier must not contain path separators".into(),
            });
        }

        if !self.output_dir.is_dir() {
            return Err(ConfigError::InvalidOutputDir {
                path: self.output_dir.clone(),
                reason: "not an existing directory".into(),
            });
        }

        Ok(())
    }

    /// Path of the tabular catalog
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(self.csv_file_name())
    }

    /// Path of the schema descriptor
    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.identifier))
    }

    /// Bare file name recorded in the descriptor's `catalog_file`
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["frepp-catalog", "/archive/pp"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_default_identifier() {
        let args = args(&[]);
        assert_eq!(args.identifier, "catalog");
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(args.variable_id.is_none());
    }

    #[test]
    fn test_overrides_from_args() {
        let config = CatalogConfig::from_args(args(&[
            "odiv-210",
            "--variable-id",
            "thetao",
            "--experiment-id",
            "historical",
        ]))
        .unwrap();

        assert_eq!(config.identifier, "odiv-210");
        assert_eq!(config.overrides.variable_id.as_deref(), Some("thetao"));
        assert_eq!(config.overrides.experiment_id.as_deref(), Some("historical"));
        assert!(config.overrides.activity_id.is_none());
    }

    #[test]
    fn test_invalid_worker_count() {
        let err = CatalogConfig::from_args(args(&["-w", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { count: 0, .. }));

        let err = CatalogConfig::from_args(args(&["-w", "10000"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_invalid_identifier() {
        let err = CatalogConfig::from_args(args(&["sub/dir"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { .. }));

        let err = CatalogConfig::from_args(args(&[" "])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_missing_output_dir() {
        let err = CatalogConfig::from_args(args(&["-o", "/definitely/not/here"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOutputDir { .. }));
    }

    #[test]
    fn test_output_paths() {
        let config = CatalogConfig::new("/archive/pp", "odiv-210").with_output_dir("/tmp/out");
        assert_eq!(config.csv_path(), PathBuf::from("/tmp/out/odiv-210.csv"));
        assert_eq!(config.json_path(), PathBuf::from("/tmp/out/odiv-210.json"));
        assert_eq!(config.csv_file_name(), "odiv-210.csv");
    }

    #[test]
    fn test_overrides_builder() {
        let overrides = AttributeOverrides::new().variable_id("foo").grid_label("gr");
        assert!(!overrides.is_empty());
        assert_eq!(overrides.variable_id.as_deref(), Some("foo"));
        assert_eq!(overrides.grid_label.as_deref(), Some("gr"));
        assert!(AttributeOverrides::default().is_empty());
    }
}
