//! Date-window arithmetic for temporally bounded records
//!
//! Memberships and scientific axes carry optional start/end dates. The
//! indicator engine only ever asks two questions about them: does the
//! interval touch a given window, and how many days of it fall inside a
//! given calendar year. Open ends are treated as unbounded in that
//! direction.

use chrono::{Datelike, NaiveDate};

/// A record with an optional activity interval.
///
/// `None` on either side means the record is considered active since
/// forever / until forever on that side.
pub trait TemporalSpan {
    /// First day of activity, or `None` for an open start.
    fn start(&self) -> Option<NaiveDate>;

    /// Last day of activity, or `None` for an open end.
    fn end(&self) -> Option<NaiveDate>;

    /// True when the activity interval intersects `[window_start,
    /// window_end]`, both bounds inclusive.
    fn active_in(&self, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        let starts_in_time = match self.start() {
            Some(start) => start <= window_end,
            None => true,
        };
        let ends_in_time = match self.end() {
            Some(end) => end >= window_start,
            None => true,
        };
        starts_in_time && ends_in_time
    }

    /// True when the activity interval touches the given calendar year.
    fn active_in_year(&self, year: i32) -> bool {
        match year_bounds(year) {
            Some((first, last)) => self.active_in(first, last),
            None => false,
        }
    }

    /// Number of calendar days of the activity interval that fall inside
    /// the given year, clipped to the actual bounds. Zero when disjoint.
    fn days_in_year(&self, year: i32) -> u32 {
        let Some((year_start, year_end)) = year_bounds(year) else {
            return 0;
        };
        let lower = match self.start() {
            Some(start) if start.year() > year => return 0,
            Some(start) if start.year() == year => start,
            _ => year_start,
        };
        let upper = match self.end() {
            Some(end) if end.year() < year => return 0,
            Some(end) if end.year() == year => end,
            _ => year_end,
        };
        // lower and upper are both inside `year`, so day-of-year
        // arithmetic is exact. Malformed records (end before start) clip
        // to zero rather than going negative.
        (i64::from(upper.ordinal()) - i64::from(lower.ordinal()) + 1).max(0) as u32
    }
}

/// First and last day of a calendar year, or `None` when the year is
/// outside the representable calendar range.
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((first, last))
}

/// Day count of a calendar year (365, or 366 on leap years). Zero for
/// unrepresentable years.
pub fn days_in_civil_year(year: i32) -> u32 {
    match year_bounds(year) {
        Some((_, last)) => last.ordinal(),
        None => 0,
    }
}
