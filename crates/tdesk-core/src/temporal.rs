//! # Temporal Types — UTC-Only Timestamps and Calendar-Day Arithmetic
//!
//! Defines `Timestamp`, a UTC-only timestamp type truncated to seconds
//! precision, plus the calendar-day helper the notice-period checker is
//! built on.
//!
//! ## Invariant
//!
//! Timestamps in the TDesk stack are UTC with Z suffix. Local timezone
//! offsets would make transition logs ambiguous across deployments, so
//! non-UTC inputs are **rejected at parse** — there is no silent conversion.
//!
//! Travel dates are `chrono::NaiveDate` calendar dates. The difference
//! between two calendar dates is an exact whole number of days, so the
//! notice-period rule ("floor the day difference, never round up") holds by
//! construction — there is no sub-day component to truncate.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only timestamps with the `Z` suffix are
    /// accepted — even `+00:00`, which is semantically equivalent, is
    /// rejected so that logged timestamps have a single canonical form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339 or uses a
    /// non-Z timezone offset.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(ValidationError::InvalidTimestamp(format!(
                "must use Z suffix (UTC only), got: {s:?}"
            )));
        }

        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            ValidationError::InvalidTimestamp(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;

        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The calendar date (UTC) this timestamp falls on.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-08-23T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// Whole calendar days from `today` until `travel_date`.
///
/// Negative when the travel date is already past. This is the single
/// arithmetic primitive of the notice-period checker: a policy requiring
/// `d` days of notice passes iff `days_until(...) >= d`.
pub fn days_until(travel_date: NaiveDate, today: NaiveDate) -> i64 {
    (travel_date - today).num_days()
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 23, 12, 30, 45).unwrap();
        let dt_with_nanos = dt.with_nanosecond(123_456_789).unwrap();
        let ts = Timestamp::from_utc(dt_with_nanos);
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_iso8601(), "2026-08-23T12:30:45Z");
    }

    #[test]
    fn parse_z_suffix_accepted() {
        let ts = Timestamp::parse("2026-08-23T12:00:00Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-08-23T12:00:00Z");
    }

    #[test]
    fn parse_offsets_rejected() {
        assert!(Timestamp::parse("2026-08-23T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-08-23T17:00:00+05:00").is_err());
        assert!(Timestamp::parse("2026-08-23T08:00:00-04:00").is_err());
    }

    #[test]
    fn parse_invalid_format() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("2026-08-23").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn display_matches_iso8601() {
        let dt = Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap();
        let ts = Timestamp::from_utc(dt);
        assert_eq!(format!("{ts}"), ts.to_iso8601());
    }

    #[test]
    fn timestamp_date_projection() {
        let ts = Timestamp::parse("2026-08-23T23:59:59Z").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::parse("2026-08-23T12:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }

    // ---- days_until ----

    #[test]
    fn days_until_future_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let travel = NaiveDate::from_ymd_opt(2026, 9, 2).unwrap();
        assert_eq!(days_until(travel, today), 10);
    }

    #[test]
    fn days_until_same_day_is_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(days_until(today, today), 0);
    }

    #[test]
    fn days_until_past_date_is_negative() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let travel = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        assert_eq!(days_until(travel, today), -3);
    }

    #[test]
    fn days_until_crosses_month_and_year() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
        let travel = NaiveDate::from_ymd_opt(2027, 1, 2).unwrap();
        assert_eq!(days_until(travel, today), 3);
    }

    // ---- parse_date ----

    #[test]
    fn parse_date_valid() {
        let d = parse_date("2026-08-23").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
    }

    #[test]
    fn parse_date_rejects_malformed() {
        assert!(parse_date("23-08-2026").is_err());
        assert!(parse_date("2026/08/23").is_err());
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("").is_err());
    }
}
