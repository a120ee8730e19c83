//! Catalog attributes inferred from a file path
//!
//! One [`FileRecord`] per file. Descriptive attributes come from the
//! caller's [`AttributeOverrides`] when set, otherwise from the naming
//! convention; the `grid_*` and time attributes always come from the path.

use crate::config::AttributeOverrides;
use crate::error::{FormatError, FormatResult};
use crate::infer::dates::parse_date_string;
use crate::infer::layout::{denormalize, normalize, Slot, AVERAGE_PPTYPE, FREPP_LAYOUT};
use serde::Serialize;
use std::path::Path;
use tracing::trace;

/// Activity used for internal (non-CMIP) runs
pub const DEFAULT_ACTIVITY_ID: &str = "GFDL";
/// Institution running the model
pub const DEFAULT_INSTITUTION_ID: &str = "NOAA-GFDL";
/// Single ensemble member assumed
pub const DEFAULT_MEMBER_ID: &str = "r1i1p1f1";
/// Native grid assumed
pub const DEFAULT_GRID_LABEL: &str = "gn";

/// Minimum `.` components of a basename that carries a date token
const DATED_BASENAME_PARTS: usize = 4;

/// Attributes of one catalogued file, in catalog column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub activity_id: String,
    pub institution_id: String,
    pub source_id: String,
    pub experiment_id: String,
    pub member_id: String,
    pub table_id: String,
    pub variable_id: String,
    pub grid_label: String,
    pub grid_freq: String,
    pub grid_pptype: String,
    pub grid_component: String,
    pub start_time: String,
    pub end_time: String,
    pub path: String,
}

impl FileRecord {
    /// Column values in catalog order
    pub fn values(&self) -> [&str; 14] {
        [
            &self.activity_id,
            &self.institution_id,
            &self.source_id,
            &self.experiment_id,
            &self.member_id,
            &self.table_id,
            &self.variable_id,
            &self.grid_label,
            &self.grid_freq,
            &self.grid_pptype,
            &self.grid_component,
            &self.start_time,
            &self.end_time,
            &self.path,
        ]
    }

    /// True for static fields (no time axis)
    pub fn is_static(&self) -> bool {
        self.start_time.is_empty() && self.end_time.is_empty()
    }
}

/// Infer the catalog attributes of one file.
///
/// Fails with a format error when the path is not UTF-8, is shallower
/// than the layout, or the name carries a malformed date token.
pub fn infer_attributes(file_path: &Path, overrides: &AttributeOverrides) -> FormatResult<FileRecord> {
    let raw = file_path.to_str().ok_or_else(|| FormatError::NonUtf8Path {
        path: file_path.to_string_lossy().into_owned(),
    })?;
    let normalized = normalize(raw);
    let segments = FREPP_LAYOUT.split(&normalized)?;

    let basename = segments.get(Slot::Basename);
    let grid_pptype = segments.get(Slot::PpType);

    let pick = |value: &Option<String>, default: &str| -> String {
        value.clone().unwrap_or_else(|| default.to_string())
    };

    let (start_time, end_time) = infer_date_range(basename)?;

    let path = if grid_pptype == AVERAGE_PPTYPE {
        denormalize(&normalized)
    } else {
        normalized.clone()
    };

    let record = FileRecord {
        activity_id: pick(&overrides.activity_id, DEFAULT_ACTIVITY_ID),
        institution_id: pick(&overrides.institution_id, DEFAULT_INSTITUTION_ID),
        source_id: pick(&overrides.source_id, segments.get(Slot::Source)),
        experiment_id: pick(&overrides.experiment_id, ""),
        member_id: pick(&overrides.member_id, DEFAULT_MEMBER_ID),
        table_id: pick(&overrides.table_id, segments.get(Slot::Table)),
        variable_id: pick(&overrides.variable_id, &variable_from_basename(basename)),
        grid_label: pick(&overrides.grid_label, DEFAULT_GRID_LABEL),
        grid_freq: segments.get(Slot::Frequency).to_string(),
        grid_pptype: grid_pptype.to_string(),
        grid_component: segments.get(Slot::Component).to_string(),
        start_time,
        end_time,
        path,
    };

    trace!(path = %record.path, variable = %record.variable_id, "Inferred attributes");
    Ok(record)
}

/// Strip the extension, then keep the last `.` component
fn variable_from_basename(basename: &str) -> String {
    let stem = match basename.rfind('.') {
        // A leading dot marks a hidden file, not an extension
        Some(idx) if !basename[..idx].chars().all(|c| c == '.') => &basename[..idx],
        _ => basename,
    };
    stem.rsplit('.').next().unwrap_or(stem).to_string()
}

/// Date token is the second `.` component of names with at least four
fn infer_date_range(basename: &str) -> FormatResult<(String, String)> {
    let parts: Vec<&str> = basename.split('.').collect();
    if parts.len() >= DATED_BASENAME_PARTS {
        parse_date_string(parts[1])
    } else {
        Ok((String::new(), String::new()))
    }
}
