//! Calendar-month arithmetic shared by every forecast.

use chrono::{Months, NaiveDate};

/// Shift `date` by a signed number of calendar months. Days past the end of
/// the target month clamp to its last day (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(if months >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Whole months from `from` to `to`, rounded toward the past: the largest `n`
/// such that `add_months(from, n) <= to`. Negative when `to` precedes `from`.
///
/// A due date one day behind today therefore already reads as `-1`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    use chrono::Datelike;

    let mut n = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if add_months(from, n) > to {
        n -= 1;
    }
    n
}

pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}
