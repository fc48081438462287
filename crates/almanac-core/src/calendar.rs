//! Calendar arithmetic for recurrence expansion.
//!
//! Week numbering follows the ISO 8601 rule generalized to an arbitrary
//! week-start day: week 1 is the first week containing at least four days
//! of the new year.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Returns `true` for Gregorian leap years.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `year` (365 or 366).
#[must_use]
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in `month` of `year`, or 0 when `month` is not 1..=12.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Resolves a 1-based day-of-year to its (month, day) pair.
#[must_use]
pub fn month_day_from_ordinal(year: i32, ordinal: u32) -> Option<(u32, u32)> {
    if ordinal == 0 || ordinal > days_in_year(year) {
        return None;
    }
    let mut month = 1;
    let mut remaining = ordinal;
    while remaining > days_in_month(year, month) {
        remaining -= days_in_month(year, month);
        month += 1;
    }
    Some((month, remaining))
}

/// Days from `week_start` forward to `weekday` within one week (0..=6).
#[must_use]
pub fn days_past_week_start(weekday: Weekday, week_start: Weekday) -> u32 {
    (7 + weekday.num_days_from_monday() - week_start.num_days_from_monday()) % 7
}

/// First day of the week containing `date`, weeks beginning on `week_start`.
#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = days_past_week_start(date.weekday(), week_start);
    date.checked_sub_days(Days::new(u64::from(back)))
        .unwrap_or(date)
}

/// The date on which week 1 of `year` begins, or `None` outside the
/// representable range.
#[must_use]
pub fn first_week_start(year: i32, week_start: Weekday) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let aligned = start_of_week(jan1, week_start);
    if (jan1 - aligned).num_days() <= 3 {
        Some(aligned)
    } else {
        aligned.checked_add_days(Days::new(7))
    }
}

/// Number of numbered weeks in `year` (52 or 53).
#[must_use]
pub fn weeks_in_year(year: i32, week_start: Weekday) -> Option<u32> {
    let this = first_week_start(year, week_start)?;
    let next = first_week_start(year + 1, week_start)?;
    u32::try_from((next - this).num_days() / 7).ok()
}

/// First day of week number `week` (1-based) of `year`.
#[must_use]
pub fn week_start_of(year: i32, week: u32, week_start: Weekday) -> Option<NaiveDate> {
    if week == 0 || week > weeks_in_year(year, week_start)? {
        return None;
    }
    first_week_start(year, week_start)?.checked_add_days(Days::new(u64::from(week - 1) * 7))
}

/// Week number of `date` as a (week-based year, week) pair.
#[must_use]
pub fn week_number(date: NaiveDate, week_start: Weekday) -> Option<(i32, u32)> {
    let year = date.year();
    let this = first_week_start(year, week_start)?;
    if date < this {
        let prev = first_week_start(year - 1, week_start)?;
        let week = u32::try_from((date - prev).num_days() / 7 + 1).ok()?;
        return Some((year - 1, week));
    }
    if date >= first_week_start(year + 1, week_start)? {
        return Some((year + 1, 1));
    }
    let week = u32::try_from((date - this).num_days() / 7 + 1).ok()?;
    Some((year, week))
}

/// The date of the `ordinal`-th `weekday` in the given month.
///
/// Positive ordinals count from the start of the month, negative from the
/// end (-1 is the last such weekday). Returns `None` when the month has no
/// such occurrence or `ordinal` is zero.
#[must_use]
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    ordinal: i32,
) -> Option<NaiveDate> {
    let len = days_in_month(year, month);
    if ordinal == 0 || len == 0 {
        return None;
    }
    if ordinal > 0 {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let offset = days_past_week_start(weekday, first.weekday());
        let day = 1 + offset + 7 * (u32::try_from(ordinal).ok()? - 1);
        if day > len {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    } else {
        let last = NaiveDate::from_ymd_opt(year, month, len)?;
        let back = days_past_week_start(last.weekday(), weekday);
        let skip = 7 * (u32::try_from(ordinal.checked_neg()?).ok()? - 1);
        let day = len.checked_sub(back + skip)?;
        if day == 0 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// The date of the `ordinal`-th `weekday` in the given year, counting
/// backward from December when `ordinal` is negative.
#[must_use]
pub fn nth_weekday_of_year(year: i32, weekday: Weekday, ordinal: i32) -> Option<NaiveDate> {
    if ordinal == 0 {
        return None;
    }
    if ordinal > 0 {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let offset = days_past_week_start(weekday, jan1.weekday());
        let skip = u64::from(offset) + 7 * (u64::try_from(ordinal).ok()? - 1);
        let date = jan1.checked_add_days(Days::new(skip))?;
        (date.year() == year).then_some(date)
    } else {
        let dec31 = NaiveDate::from_ymd_opt(year, 12, 31)?;
        let back = days_past_week_start(dec31.weekday(), weekday);
        let skip = u64::from(back) + 7 * (u64::try_from(ordinal.checked_neg()?).ok()? - 1);
        let date = dec31.checked_sub_days(Days::new(skip))?;
        (date.year() == year).then_some(date)
    }
}

/// Shifts a (year, month) pair by `delta` months.
#[must_use]
pub fn shift_year_month(year: i32, month: u32, delta: i64) -> Option<(i32, u32)> {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + delta;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12) + 1).ok()?;
    Some((year, month))
}
