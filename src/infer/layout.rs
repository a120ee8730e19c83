//! Path-segment layout of a frepp post-processing tree
//!
//! Files live at
//!
//! ```text
//! <...>/<experiment>/<platform>/pp/<component>/<pptype>/<table>/<freq>/<basename>.nc
//!         source      (-7)       (-6)  (-5)      (-4)     (-3)   (-2)    (-1)
//!          (-8)
//! ```
//!
//! Slots are counted from the end of the `/`-split path. Averaged output
//! is stored as `av/monthly_5yr` or `av/annual_5yr`; the underscore form is
//! rewritten to a nested directory before extraction so every file has the
//! same depth.

use crate::error::{FormatError, FormatResult};

/// Named position in a file path, counted from the end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Experiment directory, default `source_id`
    Source,
    /// Model component, e.g. `atmos`, `ocean_annual_z`
    Component,
    /// Post-processing type, e.g. `ts`, `av`
    PpType,
    /// Default `table_id`
    Table,
    /// Post-processing frequency/chunk, e.g. `5yr`
    Frequency,
    /// File name
    Basename,
}

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::Source => "source",
            Slot::Component => "component",
            Slot::PpType => "pptype",
            Slot::Table => "table",
            Slot::Frequency => "frequency",
            Slot::Basename => "basename",
        }
    }
}

/// Versioned, ordered list of slots with their offsets from the end
#[derive(Debug, Clone, Copy)]
pub struct PathLayout {
    pub version: &'static str,
    slots: &'static [(Slot, usize)],
}

/// The frepp `pp/` convention
pub const FREPP_LAYOUT: PathLayout = PathLayout {
    version: "frepp-pp/1",
    slots: &[
        (Slot::Source, 8),
        (Slot::Component, 5),
        (Slot::PpType, 4),
        (Slot::Table, 3),
        (Slot::Frequency, 2),
        (Slot::Basename, 1),
    ],
};

/// Post-processing type of time-averaged output
pub const AVERAGE_PPTYPE: &str = "av";

/// Directory prefixes written with an underscore for averaged output
const IRREGULAR_PREFIXES: [(&str, &str); 2] = [("/monthly_", "/monthly/"), ("/annual_", "/annual/")];

impl PathLayout {
    /// Fewest `/`-separated segments a path needs
    pub fn min_depth(&self) -> usize {
        self.slots.iter().map(|(_, offset)| *offset).max().unwrap_or(0)
    }

    fn offset(&self, slot: Slot) -> Option<usize> {
        self.slots
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, offset)| *offset)
    }

    /// Split a (normalized) path and check it is deep enough for every slot
    pub fn split<'a>(&self, path: &'a str) -> FormatResult<PathSegments<'a>> {
        let segments: Vec<&str> = path.split('/').collect();
        let required = self.min_depth();

        if let Some((slot, _)) = self
            .slots
            .iter()
            .find(|(_, offset)| *offset > segments.len())
        {
            return Err(FormatError::MissingSegment {
                slot: slot.name(),
                path: path.to_string(),
                required,
                found: segments.len(),
            });
        }

        Ok(PathSegments {
            layout: *self,
            segments,
        })
    }
}

/// A path split according to a layout
#[derive(Debug, Clone)]
pub struct PathSegments<'a> {
    layout: PathLayout,
    segments: Vec<&'a str>,
}

impl<'a> PathSegments<'a> {
    /// Segment stored in `slot`
    pub fn get(&self, slot: Slot) -> &'a str {
        // `split` guaranteed every slot of the layout is in range
        self.layout
            .offset(slot)
            .and_then(|offset| self.segments.len().checked_sub(offset))
            .and_then(|index| self.segments.get(index).copied())
            .unwrap_or_default()
    }
}

/// Rewrite `monthly_`/`annual_` directories into nested form
pub fn normalize(path: &str) -> String {
    IRREGULAR_PREFIXES
        .iter()
        .fold(path.to_string(), |acc, (raw, nested)| acc.replace(raw, nested))
}

/// Undo [`normalize`] for averaged output, whose on-disk name keeps the underscore
pub fn denormalize(path: &str) -> String {
    IRREGULAR_PREFIXES
        .iter()
        .fold(path.to_string(), |acc, (raw, nested)| acc.replace(nested, raw))
}
