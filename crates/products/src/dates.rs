//! Release/revision date rules.
//!
//! All comparisons are date-only (`NaiveDate`); time of day and offsets never enter.

use chrono::{Datelike, NaiveDate};

use crate::rules::ValidationErrorKind;

/// Format used by forms and the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a canonical `YYYY-MM-DD` date. Padding, missing zeros and surrounding
/// whitespace are rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (format_date(date) == value).then_some(date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Revision date for a release: same month and day, one year later.
///
/// A Feb 29 release whose following year is not a leap year rolls over to Mar 1.
/// Returns `None` only at the edge of the representable calendar.
pub fn derive_revision(release: NaiveDate) -> Option<NaiveDate> {
    let year = release.year().checked_add(1)?;
    release
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// `true` iff `revision` is exactly the derived revision of `release`.
pub fn revision_matches(release: NaiveDate, revision: NaiveDate) -> bool {
    derive_revision(release) == Some(revision)
}

/// Minimum-date rule for `date_release`.
///
/// Empty input is left to the required rule. Input that is not a date can never be on or
/// after `today`, so it is reported as `MinDate` as well.
pub fn min_date_error(value: &str, today: NaiveDate) -> Option<ValidationErrorKind> {
    if value.is_empty() {
        return None;
    }
    match parse_date(value) {
        Some(date) if date >= today => None,
        _ => Some(ValidationErrorKind::MinDate),
    }
}

/// Cross-field rule for `date_revision` given the current `date_release` value.
///
/// Nothing is reported while either side is empty or while the release date is not a
/// date yet; those cases belong to other rules.
pub fn revision_error(release_value: &str, revision_value: &str) -> Option<ValidationErrorKind> {
    if revision_value.is_empty() {
        return None;
    }
    let release = parse_date(release_value)?;

    match parse_date(revision_value) {
        Some(revision) if revision_matches(release, revision) => None,
        _ => Some(ValidationErrorKind::InvalidRevisionDate),
    }
}
