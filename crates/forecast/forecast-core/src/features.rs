//! Calendar feature extraction
//!
//! Turns date strings into the three calendar features the regressor is
//! trained on: day of year, month and day of week (Monday = 0).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use forecast_spi::{FeatureVector, ForecastError, Result};

/// Date-only layouts, tried in order. Month-first wins for ambiguous slash
/// dates; day-first is the fallback when the first field exceeds 12.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Naive date-time layouts, tried in order
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY` (or `DD/MM/YYYY` when
/// the first field cannot be a month), compact `YYYYMMDD`, named months such
/// as `Jan 15, 2024`, naive date-times with a `T` or space separator, and
/// RFC 3339 timestamps (the date is taken in the timestamp's own offset).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let input = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|datetime| datetime.date_naive())
        .map_err(|e| ForecastError::parse(raw, format!("not a recognised date ({e})")))
}

/// Compute the calendar features of a date
pub fn extract(date: NaiveDate) -> FeatureVector {
    FeatureVector {
        day_of_year: date.ordinal(),
        month: date.month(),
        day_of_week: date.weekday().num_days_from_monday(),
    }
}

/// Parse and featurise a batch of dates, preserving order.
///
/// Fails on the first malformed entry; an empty batch yields no features.
pub fn extract_features<S: AsRef<str>>(dates: &[S]) -> Result<Vec<FeatureVector>> {
    dates
        .iter()
        .map(|raw| parse_date(raw.as_ref()).map(extract))
        .collect()
}

/// Featurise a batch of dates straight into regressor input rows
pub fn feature_rows<S: AsRef<str>>(dates: &[S]) -> Result<Vec<Vec<f64>>> {
    Ok(extract_features(dates)?
        .iter()
        .map(FeatureVector::to_row)
        .collect())
}
