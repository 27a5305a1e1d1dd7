//! Human-readable timestamps.
//!
//! Every view that shows a date shows it the same way:
//!
//! ```text
//! Fri, 05 Jan 2024, 09:03:07
//! ```
//!
//! Abbreviated weekday, two-digit day, abbreviated month, year, then a
//! 24-hour clock. Formatting never fails. Input that is not a date comes
//! back as [`INVALID_DATE`] so a view can render it without a branch.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// The fixed output layout.
pub const DATE_FORMAT: &str = "%a, %d %b %Y, %H:%M:%S";

/// What [`format_date`] returns for input it cannot read as a date.
pub const INVALID_DATE: &str = "Invalid Date";

/// A value that can be read as a point in time.
///
/// Implemented for millisecond Unix timestamps (`i64`, `i32`, `u64`, `f64`),
/// date strings, and the chrono date types. Values without a zone of their
/// own (naive date-times, `YYYY-MM-DDTHH:MM:SS` strings) are read as
/// wall-clock time in the zone being formatted for; bare dates (`YYYY-MM-DD`, `YYYY-MM`, `YYYY`) are UTC
/// midnight on the first day they name.
pub trait DateInput {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>>;
}

/// Format `input` in the process-local timezone.
pub fn format_date(input: impl DateInput) -> String {
    format_date_in(input, &Local)
}

/// Format `input` in `tz`.
///
/// ```rust
/// use chrono::Utc;
/// use folio::format_date_in;
///
/// assert_eq!(format_date_in("2024-01-05T09:03:07Z", &Utc), "Fri, 05 Jan 2024, 09:03:07");
/// assert_eq!(format_date_in("next tuesday", &Utc), "Invalid Date");
/// ```
pub fn format_date_in<Tz>(input: impl DateInput, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match input.to_zoned(tz) {
        Some(dt) => dt.format(DATE_FORMAT).to_string(),
        None => INVALID_DATE.to_owned(),
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Milliseconds since the Unix epoch.
impl DateInput for i64 {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp_millis(*self).map(|dt| dt.with_timezone(tz))
    }
}

impl DateInput for i32 {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        i64::from(*self).to_zoned(tz)
    }
}

impl DateInput for u64 {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        i64::try_from(*self).ok()?.to_zoned(tz)
    }
}

/// Milliseconds since the Unix epoch; the fractional part is dropped.
impl DateInput for f64 {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        let millis = self.trunc();
        if !millis.is_finite() || millis < i64::MIN as f64 || millis >= i64::MAX as f64 {
            return None;
        }
        (millis as i64).to_zoned(tz)
    }
}

impl DateInput for str {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        let s = self.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(tz));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(dt.with_timezone(tz));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.to_zoned(tz);
        }
        if let Some(date) = year_month(s) {
            return date.to_zoned(tz);
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
            .and_then(|naive| naive.to_zoned(tz))
    }
}

/// `YYYY` and `YYYY-MM`, the short date-only forms: the first of the
/// period, UTC midnight.
fn year_month(s: &str) -> Option<NaiveDate> {
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    match s.len() {
        4 if digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        7 if s.as_bytes()[4] == b'-' && digits(&s[..4]) && digits(&s[5..]) => {
            NaiveDate::from_ymd_opt(s[..4].parse().ok()?, s[5..].parse().ok()?, 1)
        }
        _ => None,
    }
}

impl DateInput for String {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.as_str().to_zoned(tz)
    }
}

impl<Z: TimeZone> DateInput for DateTime<Z> {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        Some(self.with_timezone(tz))
    }
}

/// Wall-clock time in the target zone. A time skipped by a DST jump is invalid.
impl DateInput for NaiveDateTime {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.from_local_datetime(self).earliest()
    }
}

/// Midnight UTC on that day.
impl DateInput for NaiveDate {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        let midnight = self.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
    }
}

impl<T: DateInput + ?Sized> DateInput for &T {
    fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        (**self).to_zoned(tz)
    }
}
