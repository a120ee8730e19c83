//! Date-range tokens from frepp file names
//!
//! The second `.` component of a time-series or averaged file name encodes
//! the period it covers:
//!
//! | token | meaning |
//! |---|---|
//! | `static` | no time axis |
//! | `1990` | one year |
//! | `1990-1994` | yearly range |
//! | `199001-199412` | monthly range |
//! | `19900101-19941231` | daily range |
//! | `1990010100-1994123123` | hourly range |

use crate::error::{FormatError, FormatResult};
use chrono::{Days, NaiveDate, NaiveDateTime};

/// Token marking data without a time axis
pub const STATIC_TOKEN: &str = "static";

/// Separator between the two dates of a range
const RANGE_SEPARATOR: char = '-';

/// ISO-8601 rendering of start/end timestamps, seconds precision
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Decoded period of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    /// Static field, no time axis
    Static,
    /// Inclusive start and end timestamps
    Span {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl DateRange {
    /// Start and end as catalog strings; both empty for static data
    pub fn to_strings(&self) -> (String, String) {
        match self {
            DateRange::Static => (String::new(), String::new()),
            DateRange::Span { start, end } => (
                start.format(TIMESTAMP_FORMAT).to_string(),
                end.format(TIMESTAMP_FORMAT).to_string(),
            ),
        }
    }
}

/// Decode a date-range token into start/end catalog strings.
///
/// Returns `("", "")` for the static token.
pub fn parse_date_string(token: &str) -> FormatResult<(String, String)> {
    parse_date_range(token).map(|range| range.to_strings())
}

/// Decode a date-range token.
pub fn parse_date_range(token: &str) -> FormatResult<DateRange> {
    let parts: Vec<&str> = token.split(RANGE_SEPARATOR).collect();

    match parts.as_slice() {
        [single] => {
            if *single == STATIC_TOKEN {
                return Ok(DateRange::Static);
            }
            if single.len() != 4 {
                return Err(FormatError::date(
                    token,
                    "a single date must be a four-digit year",
                ));
            }
            let year = parse_field(token, single)?;
            Ok(DateRange::Span {
                start: ymdh(token, year, 1, 1, 0)?,
                end: ymdh(token, year, 12, 31, 0)?,
            })
        }
        [first, last] => {
            if first.len() != last.len() {
                return Err(FormatError::date(token, "dates are not equal format"));
            }
            for digits in [first, last] {
                if !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(FormatError::date(
                        token,
                        format!("'{}' is not a number", digits),
                    ));
                }
            }
            match first.len() {
                4 => yearly(token, first, last),
                6 => monthly(token, first, last),
                8 => daily(token, first, last),
                10 => hourly(token, first, last),
                width => Err(FormatError::date(
                    token,
                    format!("unsupported date width {}", width),
                )),
            }
        }
        _ => Err(FormatError::date(token, "date string has atypical format")),
    }
}

fn yearly(token: &str, first: &str, last: &str) -> FormatResult<DateRange> {
    let y0 = parse_field(token, first)?;
    let y1 = parse_field(token, last)?;
    Ok(DateRange::Span {
        start: ymdh(token, y0, 1, 1, 0)?,
        end: ymdh(token, y1, 12, 31, 0)?,
    })
}

/// Monthly ranges end on the last day of the month *after* the end token's
/// month, and December wraps to January 31 of the same year. November has
/// no valid target month and is rejected.
fn monthly(token: &str, first: &str, last: &str) -> FormatResult<DateRange> {
    let start = ymdh(
        token,
        parse_field(token, &first[0..4])?,
        parse_field(token, &first[4..6])?,
        1,
        0,
    )?;

    let end_year = parse_field(token, &last[0..4])?;
    let end_month: u32 = parse_field(token, &last[4..6])?;
    let month_plus_one = if end_month == 12 { 1 } else { end_month + 1 };
    let end = ymdh(token, end_year, month_plus_one + 1, 1, 0)?
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| FormatError::date(token, "end date out of range"))?;

    Ok(DateRange::Span { start, end })
}

fn daily(token: &str, first: &str, last: &str) -> FormatResult<DateRange> {
    Ok(DateRange::Span {
        start: date_hour(token, first, 0)?,
        end: date_hour(token, last, 0)?,
    })
}

fn hourly(token: &str, first: &str, last: &str) -> FormatResult<DateRange> {
    Ok(DateRange::Span {
        start: date_hour(token, &first[0..8], parse_field(token, &first[8..10])?)?,
        end: date_hour(token, &last[0..8], parse_field(token, &last[8..10])?)?,
    })
}

/// `YYYYMMDD` plus an hour
fn date_hour(token: &str, digits: &str, hour: u32) -> FormatResult<NaiveDateTime> {
    ymdh(
        token,
        parse_field(token, &digits[0..4])?,
        parse_field(token, &digits[4..6])?,
        parse_field(token, &digits[6..8])?,
        hour,
    )
}

fn ymdh(token: &str, year: i32, month: u32, day: u32, hour: u32) -> FormatResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or_else(|| {
            FormatError::date(
                token,
                format!(
                    "invalid calendar date {:04}-{:02}-{:02} {:02}:00",
                    year, month, day, hour
                ),
            )
        })
}

fn parse_field<T: std::str::FromStr>(token: &str, digits: &str) -> FormatResult<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::date(
            token,
            format!("'{}' is not a number", digits),
        ));
    }
    digits
        .parse()
        .map_err(|_| FormatError::date(token, format!("'{}' is out of range", digits)))
}
