//! The ordered BYxxx refinement pipeline.
//!
//! Stage order is fixed by RFC 5545 §3.3.10: BYMONTH, BYWEEKNO,
//! BYYEARDAY, BYMONTHDAY, BYDAY, then the time parts, with BYSETPOS
//! applied last to each period's candidate set. Whether a stage expands
//! the candidate set or limits it depends on the base frequency, per the
//! expand/limit table in the RFC.
//!
//! Expanding stages work on [`DateShape`] triples rather than
//! `NaiveDate` so that an unrepresentable intermediate (anchor day 31
//! flowing into April) survives long enough for a later stage to replace
//! the broken field. Shapes still unrepresentable when candidates
//! materialize are dropped without error. Limiting stages run on the
//! materialized dates, so a week straddling a month boundary keeps
//! exactly the days whose own month matches.

use chrono::{Datelike, Days, NaiveDate};

use almanac_core::calendar::{
    days_in_month, days_in_year, days_past_week_start, month_day_from_ordinal,
    nth_weekday_of_month, nth_weekday_of_year, start_of_week, week_number, week_start_of,
    weeks_in_year,
};

use super::super::core::{Frequency, RecurrenceRule, WeekdayNum};
use super::temporal::Temporal;

/// A (year, month, day) triple that may not name a real date.
#[derive(Debug, Clone, Copy)]
pub(super) struct DateShape {
    pub(super) year: i32,
    pub(super) month: u32,
    pub(super) day: u32,
}

impl DateShape {
    pub(super) const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    fn resolve(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DateShape {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

/// Runs the date-plane stages for one daily-or-coarser period and
/// returns the period's candidate dates, sorted and deduplicated.
pub(super) fn refine_dates(
    rule: &RecurrenceRule,
    anchor: NaiveDate,
    seed: DateShape,
) -> Vec<NaiveDate> {
    let freq = rule.frequency();
    let yearly = freq == Frequency::Yearly;
    let monthly = matches!(freq, Frequency::Monthly | Frequency::Yearly);
    let scope = day_scope(rule);

    let mut shapes = vec![seed];
    if yearly {
        shapes = expand_months(rule, shapes);
        shapes = expand_weeks(rule, anchor, shapes);
        shapes = expand_year_days(rule, shapes);
    }
    if monthly {
        shapes = expand_month_days(rule, shapes);
    }
    let mut dates = expand_days(rule, scope, shapes);

    let wkst = rule.week_start().to_chrono();
    dates.retain(|d| {
        (yearly
            || (month_matches(rule.by_month(), d.month())
                && week_matches(rule.by_week_no(), *d, wkst)
                && year_day_matches(rule.by_year_day(), *d)))
            && (monthly || month_day_matches(rule.by_month_day(), *d))
            && (!matches!(scope, DayScope::Limit)
                || rule.by_day().is_empty()
                || day_matches(rule.by_day(), *d))
    });
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Date-plane check for sub-daily periods, where every BYxxx date part
/// limits the single seed instant.
pub(super) fn passes_date_limits(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    let wkst = rule.week_start().to_chrono();
    month_matches(rule.by_month(), date.month())
        && week_matches(rule.by_week_no(), date, wkst)
        && year_day_matches(rule.by_year_day(), date)
        && month_day_matches(rule.by_month_day(), date)
        && (rule.by_day().is_empty() || day_matches(rule.by_day(), date))
}

/// Applies the BYHOUR/BYMINUTE/BYSECOND stages to a period's candidates.
pub(super) fn refine_times<T: Temporal>(rule: &RecurrenceRule, candidates: Vec<T>) -> Vec<T> {
    let freq = rule.frequency();
    let candidates = time_stage(
        freq,
        Frequency::Hourly,
        rule.by_hour(),
        candidates,
        T::with_hour,
        T::hour,
    );
    let candidates = time_stage(
        freq,
        Frequency::Minutely,
        rule.by_minute(),
        candidates,
        T::with_minute,
        T::minute,
    );
    time_stage(
        freq,
        Frequency::Secondly,
        rule.by_second(),
        candidates,
        T::with_second,
        T::second,
    )
}

/// Selects the BYSETPOS positions from a period's sorted candidate set.
pub(super) fn apply_set_pos<T: Copy + Ord>(positions: &[i16], candidates: Vec<T>) -> Vec<T> {
    if positions.is_empty() {
        return candidates;
    }
    let len = u32::try_from(candidates.len()).unwrap_or(u32::MAX);
    let mut out: Vec<T> = positions
        .iter()
        .filter_map(|p| resolve_index(i64::from(*p), len))
        .filter_map(|i| candidates.get(usize::try_from(i).ok()?.checked_sub(1)?).copied())
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Resolves a 1-based, possibly negative index against a set of `len`
/// elements (-1 is the last). Out-of-range and zero yield `None`.
fn resolve_index(value: i64, len: u32) -> Option<u32> {
    if value > 0 {
        u32::try_from(value).ok().filter(|v| *v <= len)
    } else if value < 0 {
        let back = u32::try_from(value.checked_neg()?).ok()?;
        (back <= len).then(|| len - back + 1)
    } else {
        None
    }
}

fn expand_months(rule: &RecurrenceRule, shapes: Vec<DateShape>) -> Vec<DateShape> {
    let months = rule.by_month();
    if months.is_empty() {
        return shapes;
    }
    let mut out = Vec::with_capacity(shapes.len() * months.len());
    for shape in shapes {
        for month in months {
            out.push(DateShape::new(shape.year, u32::from(*month), shape.day));
        }
    }
    out
}

/// Expands BYWEEKNO under a YEARLY rule. Each selected week contributes
/// the day sharing the anchor's weekday; a trailing BYDAY stage replaces
/// it with the whole week's matching days.
fn expand_weeks(
    rule: &RecurrenceRule,
    anchor: NaiveDate,
    shapes: Vec<DateShape>,
) -> Vec<DateShape> {
    let weeks = rule.by_week_no();
    if weeks.is_empty() {
        return shapes;
    }
    let wkst = rule.week_start().to_chrono();
    let offset = days_past_week_start(anchor.weekday(), wkst);
    let mut out = Vec::new();
    for shape in shapes {
        let total = weeks_in_year(shape.year, wkst).unwrap_or(0);
        for week in weeks {
            let Some(week) = resolve_index(i64::from(*week), total) else {
                continue;
            };
            let Some(start) = week_start_of(shape.year, week, wkst) else {
                continue;
            };
            if let Some(date) = start.checked_add_days(Days::new(u64::from(offset))) {
                out.push(DateShape::from(date));
            }
        }
    }
    out
}

fn expand_year_days(rule: &RecurrenceRule, shapes: Vec<DateShape>) -> Vec<DateShape> {
    let days = rule.by_year_day();
    if days.is_empty() {
        return shapes;
    }
    let mut out = Vec::new();
    for shape in shapes {
        let total = days_in_year(shape.year);
        for day in days {
            let Some(ordinal) = resolve_index(i64::from(*day), total) else {
                continue;
            };
            if let Some((month, day)) = month_day_from_ordinal(shape.year, ordinal) {
                out.push(DateShape::new(shape.year, month, day));
            }
        }
    }
    out
}

fn expand_month_days(rule: &RecurrenceRule, shapes: Vec<DateShape>) -> Vec<DateShape> {
    let days = rule.by_month_day();
    if days.is_empty() {
        return shapes;
    }
    let mut out = Vec::new();
    for shape in shapes {
        let len = days_in_month(shape.year, shape.month);
        for day in days {
            if let Some(day) = resolve_index(i64::from(*day), len) {
                out.push(DateShape::new(shape.year, shape.month, day));
            }
        }
    }
    out
}

/// BYDAY scope for one rule, per the RFC's expand/limit notes.
#[derive(Clone, Copy)]
enum DayScope {
    Limit,
    Week,
    Month,
    Year,
}

fn day_scope(rule: &RecurrenceRule) -> DayScope {
    match rule.frequency() {
        Frequency::Weekly => DayScope::Week,
        Frequency::Monthly => {
            if rule.by_month_day().is_empty() {
                DayScope::Month
            } else {
                DayScope::Limit
            }
        }
        Frequency::Yearly => {
            if !rule.by_year_day().is_empty() || !rule.by_month_day().is_empty() {
                DayScope::Limit
            } else if !rule.by_week_no().is_empty() {
                DayScope::Week
            } else if !rule.by_month().is_empty() {
                DayScope::Month
            } else {
                DayScope::Year
            }
        }
        _ => DayScope::Limit,
    }
}

fn expand_days(rule: &RecurrenceRule, scope: DayScope, shapes: Vec<DateShape>) -> Vec<NaiveDate> {
    let entries = rule.by_day();
    if entries.is_empty() {
        return shapes.into_iter().filter_map(DateShape::resolve).collect();
    }
    match scope {
        // Limiting runs on materialized dates later.
        DayScope::Limit => shapes.into_iter().filter_map(DateShape::resolve).collect(),
        DayScope::Week => {
            let wkst = rule.week_start().to_chrono();
            let mut out = Vec::new();
            for date in shapes.into_iter().filter_map(DateShape::resolve) {
                let start = start_of_week(date, wkst);
                for offset in 0..7 {
                    let Some(day) = start.checked_add_days(Days::new(offset)) else {
                        continue;
                    };
                    // Ordinals carry no meaning inside a single week.
                    if entries.iter().any(|e| e.weekday.to_chrono() == day.weekday()) {
                        out.push(day);
                    }
                }
            }
            out
        }
        DayScope::Month => {
            let mut out = Vec::new();
            for shape in shapes {
                expand_in_month(entries, shape.year, shape.month, &mut out);
            }
            out
        }
        DayScope::Year => {
            let mut out = Vec::new();
            for shape in shapes {
                expand_in_year(entries, shape.year, &mut out);
            }
            out
        }
    }
}

fn expand_in_month(entries: &[WeekdayNum], year: i32, month: u32, out: &mut Vec<NaiveDate>) {
    for entry in entries {
        let weekday = entry.weekday.to_chrono();
        if let Some(ordinal) = entry.ordinal {
            if let Some(date) = nth_weekday_of_month(year, month, weekday, ordinal) {
                out.push(date);
            }
        } else {
            let mut nth = 1;
            while let Some(date) = nth_weekday_of_month(year, month, weekday, nth) {
                out.push(date);
                nth += 1;
            }
        }
    }
}

fn expand_in_year(entries: &[WeekdayNum], year: i32, out: &mut Vec<NaiveDate>) {
    for entry in entries {
        let weekday = entry.weekday.to_chrono();
        if let Some(ordinal) = entry.ordinal {
            if let Some(date) = nth_weekday_of_year(year, weekday, ordinal) {
                out.push(date);
            }
        } else {
            let mut nth = 1;
            while let Some(date) = nth_weekday_of_year(year, weekday, nth) {
                out.push(date);
                nth += 1;
            }
        }
    }
}

fn month_matches(months: &[u8], month: u32) -> bool {
    months.is_empty() || months.iter().any(|m| u32::from(*m) == month)
}

fn week_matches(weeks: &[i8], date: NaiveDate, wkst: chrono::Weekday) -> bool {
    if weeks.is_empty() {
        return true;
    }
    let Some((week_year, week)) = week_number(date, wkst) else {
        return false;
    };
    let total = weeks_in_year(week_year, wkst).unwrap_or(0);
    weeks
        .iter()
        .any(|w| resolve_index(i64::from(*w), total) == Some(week))
}

fn year_day_matches(days: &[i16], date: NaiveDate) -> bool {
    days.is_empty()
        || days
            .iter()
            .any(|d| resolve_index(i64::from(*d), days_in_year(date.year())) == Some(date.ordinal()))
}

fn month_day_matches(days: &[i8], date: NaiveDate) -> bool {
    days.is_empty()
        || days.iter().any(|d| {
            resolve_index(i64::from(*d), days_in_month(date.year(), date.month()))
                == Some(date.day())
        })
}

/// Whether `date` matches any BYDAY entry, honoring month-scoped
/// ordinals (e.g. `-1FR` under a MONTHLY rule with BYMONTHDAY).
fn day_matches(entries: &[WeekdayNum], date: NaiveDate) -> bool {
    entries.iter().any(|e| {
        e.weekday.to_chrono() == date.weekday()
            && e.ordinal.is_none_or(|n| {
                nth_weekday_of_month(date.year(), date.month(), date.weekday(), n) == Some(date)
            })
    })
}

fn time_stage<T: Temporal>(
    freq: Frequency,
    part: Frequency,
    values: &[u8],
    candidates: Vec<T>,
    set: fn(T, u32) -> Option<T>,
    get: fn(&T) -> u32,
) -> Vec<T> {
    if values.is_empty() {
        return candidates;
    }
    if freq > part {
        let mut out = Vec::with_capacity(candidates.len() * values.len());
        for candidate in candidates {
            for value in values {
                if let Some(next) = set(candidate, u32::from(*value)) {
                    out.push(next);
                }
            }
        }
        out
    } else {
        candidates
            .into_iter()
            .filter(|c| values.iter().any(|v| u32::from(*v) == get(c)))
            .collect()
    }
}
