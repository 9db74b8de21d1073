// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.
//!
//! Day arithmetic is done on calendar dates in a caller-chosen zone, never
//! by dividing elapsed milliseconds, so that 23:00 and 01:00 on consecutive
//! dates are one day apart.

use chrono::{DateTime, Days, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Calendar date of `instant` as seen in `tz` (time of day truncated).
pub fn local_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Whole calendar days from `later` back to `earlier`.
///
/// Positive when `earlier` is before `later`, zero on the same date.
pub fn calendar_days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

/// The instant seven calendar days before `now` in `tz`, at the same wall
/// time.
///
/// Falls back to a fixed 7×24h offset when that wall time does not exist
/// (DST gap).
pub fn one_week_before<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    now.with_timezone(tz)
        .checked_sub_days(Days::new(7))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| now - Duration::days(7))
}
