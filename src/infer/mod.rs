//! Attribute inference from frepp path and file-name conventions
//!
//! # Module Structure
//!
//! - `layout`: named path slots and `monthly_`/`annual_` normalization
//! - `dates`: date-range token decoding
//! - `attributes`: one `FileRecord` per file

pub mod attributes;
pub mod dates;
pub mod layout;

pub use attributes::{infer_attributes, FileRecord};
pub use dates::{parse_date_range, parse_date_string, DateRange, STATIC_TOKEN};
pub use layout::{PathLayout, Slot, FREPP_LAYOUT};
