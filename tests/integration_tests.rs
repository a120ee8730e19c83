//! Integration tests for frepp-catalog
//!
//! Each test lays out a small frepp `pp/` tree in a temporary directory and
//! runs the full build against it.

use frepp_catalog::catalog::CatalogBuilder;
use frepp_catalog::config::{AttributeOverrides, CatalogConfig};
use frepp_catalog::{find_nc_files, CatalogError, FormatError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Files following the convention, relative to `pp/`
const FIXTURE_FILES: &[&str] = &[
    "atmos/ts/monthly/5yr/atmos.199001-199412.tas.nc",
    "atmos/ts/monthly/5yr/atmos.199001-199412.pr.nc",
    "atmos/ts/monthly/5yr/atmos.199501-199912.tas.nc",
    "atmos/ts/annual/5yr/atmos.1990-1994.tas.nc",
    "atmos/ts/daily/5yr/atmos.19900101-19941231.tasmax.nc",
    "atmos/ts/3hr/1yr/atmos.1990010100-1990123121.pr.nc",
    "atmos/av/monthly_5yr/atmos.1990-1994.01.nc",
    "atmos/av/monthly_5yr/atmos.1990-1994.02.nc",
    "atmos/av/annual_5yr/atmos.1990-1994.ann.nc",
    "atmos/ts/annual/5yr/atmos.static.nc",
    "ocean_annual/ts/annual/10yr/ocean_annual.1990-1999.sst.nc",
    "ocean_annual/av/annual_10yr/ocean_annual.1990-1999.ann.nc",
    "ice/ts/monthly/5yr/ice.199001-199412.siconc.nc",
];

struct Fixture {
    dir: TempDir,
    pp: PathBuf,
    out: PathBuf,
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"CDF\x01").unwrap();
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let pp = dir
        .path()
        .join("GFDL-experiment/gfdl.intel18-prod-openmp/pp");
    for rel in FIXTURE_FILES {
        touch(&pp.join(rel));
    }
    // Not data files
    touch(&pp.join("atmos/ts/monthly/5yr/README.txt"));
    touch(&pp.join("ice/ts/monthly/5yr/ice.199001-199412.siconc.nc.tmp"));

    let out = dir.path().join("catalogs");
    fs::create_dir(&out).unwrap();

    Fixture { dir, pp, out }
}

fn config(fx: &Fixture) -> CatalogConfig {
    CatalogConfig::new(&fx.pp, "catalog")
        .with_output_dir(&fx.out)
        .with_workers(3)
}

#[test]
fn test_end_to_end_counts() {
    let fx = fixture();
    let report = CatalogBuilder::new(config(&fx)).build().unwrap();
    let n = FIXTURE_FILES.len();

    assert_eq!(report.table.len(), n);
    assert_eq!(report.subdirs, 3);

    let csv = fs::read_to_string(fx.out.join("catalog.csv")).unwrap();
    assert_eq!(csv.lines().count(), n + 1);
    assert_eq!(
        csv.lines().next().unwrap(),
        ",activity_id,institution_id,source_id,experiment_id,member_id,table_id,\
         variable_id,grid_label,grid_freq,grid_pptype,grid_component,start_time,end_time,path"
    );

    let json = fs::read_to_string(fx.out.join("catalog.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["attributes"].as_array().unwrap().len(), 13);
    assert_eq!(value["esmcat_version"], "0.1.0");
    assert_eq!(value["id"], "catalog");
    assert_eq!(value["catalog_file"], "catalog.csv");
    assert_eq!(value["description"], fx.pp.display().to_string());
    assert_eq!(value["assets"]["column_name"], "path");
    assert_eq!(value["assets"]["format"], "netcdf");
}

#[test]
fn test_every_path_exists() {
    let fx = fixture();
    let report = CatalogBuilder::new(config(&fx)).build().unwrap();

    for record in report.table.iter() {
        assert!(
            Path::new(&record.path).is_file(),
            "catalogued path missing on disk: {}",
            record.path
        );
    }
}

#[test]
fn test_rebuild_is_byte_identical() {
    let fx = fixture();

    CatalogBuilder::new(config(&fx)).build().unwrap();
    let csv_first = fs::read(fx.out.join("catalog.csv")).unwrap();
    let json_first = fs::read(fx.out.join("catalog.json")).unwrap();

    CatalogBuilder::new(config(&fx).with_workers(1)).build().unwrap();
    let csv_second = fs::read(fx.out.join("catalog.csv")).unwrap();
    let json_second = fs::read(fx.out.join("catalog.json")).unwrap();

    assert_eq!(csv_first, csv_second);
    assert_eq!(json_first, json_second);
}

#[test]
fn test_defaults_without_overrides() {
    let fx = fixture();
    let report = CatalogBuilder::new(config(&fx)).build().unwrap();

    for record in report.table.iter() {
        assert_eq!(record.activity_id, "GFDL");
        assert_eq!(record.institution_id, "NOAA-GFDL");
        assert_eq!(record.grid_label, "gn");
        assert_eq!(record.member_id, "r1i1p1f1");
        assert_eq!(record.source_id, "GFDL-experiment");
        assert_eq!(record.experiment_id, "");
    }
}

#[test]
fn test_variable_override_applies_to_all_rows() {
    let fx = fixture();
    let cfg = config(&fx).with_overrides(AttributeOverrides::new().variable_id("foo"));
    let report = CatalogBuilder::new(cfg).build().unwrap();

    assert_eq!(report.table.len(), FIXTURE_FILES.len());
    assert!(report.table.iter().all(|r| r.variable_id == "foo"));
}

#[test]
fn test_time_ranges_by_granularity() {
    let fx = fixture();
    let report = CatalogBuilder::new(config(&fx)).build().unwrap();

    let find = |suffix: &str| {
        report
            .table
            .iter()
            .find(|r| r.path.ends_with(suffix))
            .unwrap_or_else(|| panic!("no record for {}", suffix))
            .clone()
    };

    let daily = find("atmos.19900101-19941231.tasmax.nc");
    assert_eq!(daily.start_time, "1990-01-01T00:00:00");
    assert_eq!(daily.end_time, "1994-12-31T00:00:00");
    assert_eq!(daily.table_id, "daily");

    let hourly = find("atmos.1990010100-1990123121.pr.nc");
    assert_eq!(hourly.end_time, "1990-12-31T21:00:00");
    assert_eq!(hourly.grid_freq, "1yr");

    let monthly = find("atmos.199501-199912.tas.nc");
    assert_eq!(monthly.start_time, "1995-01-01T00:00:00");
    assert_eq!(monthly.end_time, "1999-01-31T00:00:00");

    let fixed = find("atmos.static.nc");
    assert!(fixed.is_static());
}

#[test]
fn test_average_rows_keep_on_disk_paths() {
    let fx = fixture();
    let report = CatalogBuilder::new(config(&fx)).build().unwrap();

    let averages: Vec<_> = report
        .table
        .iter()
        .filter(|r| r.grid_pptype == "av")
        .collect();
    assert_eq!(averages.len(), 4);

    for record in averages {
        assert!(
            record.path.contains("/monthly_") || record.path.contains("/annual_"),
            "{}",
            record.path
        );
        assert!(record.table_id == "monthly" || record.table_id == "annual");
    }
}

#[test]
fn test_malformed_token_aborts_build() {
    let fx = fixture();
    touch(&fx.pp.join("ice/ts/monthly/5yr/ice.199001-1994.siconc.nc"));

    let err = CatalogBuilder::new(config(&fx)).build().unwrap_err();
    assert!(matches!(err, CatalogError::Format(_)));
    assert!(!fx.out.join("catalog.csv").exists());
    assert!(!fx.out.join("catalog.json").exists());
}

#[test]
fn test_missing_root_is_not_found() {
    let fx = fixture();
    let cfg = CatalogConfig::new(fx.dir.path().join("no-such-pp"), "catalog").with_output_dir(&fx.out);

    let err = CatalogBuilder::new(cfg).build().unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[test]
fn test_find_nc_files_matches_fixture() {
    let fx = fixture();
    let mut found = find_nc_files(&fx.pp).unwrap();
    found.sort();

    let mut expected: Vec<PathBuf> = FIXTURE_FILES.iter().map(|rel| fx.pp.join(rel)).collect();
    expected.sort();

    assert_eq!(found, expected);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_aborts_build() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fx = fixture();
    let leaf = fx.pp.join("atmos/ts/annual/5yr");
    fs::write(leaf.join(OsStr::from_bytes(b"atmos.1990-1994.t\xffas.nc")), b"").unwrap();

    let err = CatalogBuilder::new(config(&fx)).build().unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Format(FormatError::NonUtf8Path { .. })
    ));
    assert!(!fx.out.join("catalog.csv").exists());
}
