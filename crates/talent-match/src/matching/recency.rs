//! Calendar arithmetic and the recency decay applied to technical skills.

use chrono::{Datelike, Months, NaiveDate};

/// Multiplier used when a skill has no recorded last-use date.
pub const UNKNOWN_RECENCY: f64 = 0.5;

/// Whole calendar months from `start` to `end`.
///
/// A month only counts once its day-of-month has been reached, with
/// end-of-month clipping (Jan 31 to Feb 28 is one month). An `end` on or
/// before `start` yields zero.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let reached = u32::try_from(months)
        .ok()
        .and_then(|whole| start.checked_add_months(Months::new(whole)))
        .is_some_and(|anniversary| anniversary <= end);
    if !reached {
        months -= 1;
    }

    u32::try_from(months).unwrap_or(0)
}

/// Tenure of a role, treating an open-ended role as running until `today`.
pub fn tenure_months(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> u32 {
    months_between(start, end.unwrap_or(today))
}

/// Step decay on the months since a skill was last used.
pub fn recency_factor(last_used: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(last_used) = last_used else {
        return UNKNOWN_RECENCY;
    };

    match months_between(last_used, today) {
        0..=6 => 1.0,
        7..=12 => 0.8,
        13..=24 => 0.6,
        _ => 0.4,
    }
}
