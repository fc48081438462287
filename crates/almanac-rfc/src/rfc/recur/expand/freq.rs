//! Base-frequency period seeds.
//!
//! Period `i` is always derived from the anchor and `i` directly, never
//! from the previous period, so a stream restarted from scratch lands on
//! the same instants and monthly rules anchored past the 28th never
//! drift after a short month.

use chrono::{Datelike, Days};

use almanac_core::calendar::shift_year_month;

use super::super::core::{Frequency, RecurrenceRule};
use super::byrule::DateShape;
use super::temporal::Temporal;

/// The seed candidate of one base-frequency period.
pub(super) enum Seed<T> {
    /// Sub-daily period: a fully concrete instant.
    Instant(T),
    /// Daily and coarser period: a date shape for the by-rule pipeline.
    /// The shape may be unrepresentable (day 31 in a 30-day month);
    /// whether that matters depends on which stages still run.
    Shape(DateShape),
}

/// Seed for the `index`-th period after the anchor, or `None` once the
/// calendar range is exhausted.
pub(super) fn seed<T: Temporal>(rule: &RecurrenceRule, anchor: T, index: i64) -> Option<Seed<T>> {
    let step = i64::from(rule.interval()).checked_mul(index)?;
    let date = anchor.date();
    match rule.frequency() {
        Frequency::Yearly => {
            let year = i32::try_from(i64::from(date.year()).checked_add(step)?).ok()?;
            Some(Seed::Shape(DateShape::new(year, date.month(), date.day())))
        }
        Frequency::Monthly => {
            let (year, month) = shift_year_month(date.year(), date.month(), step)?;
            Some(Seed::Shape(DateShape::new(year, month, date.day())))
        }
        Frequency::Weekly => {
            let days = u64::try_from(step.checked_mul(7)?).ok()?;
            let date = date.checked_add_days(Days::new(days))?;
            Some(Seed::Shape(DateShape::from(date)))
        }
        Frequency::Daily => {
            let date = date.checked_add_days(Days::new(u64::try_from(step).ok()?))?;
            Some(Seed::Shape(DateShape::from(date)))
        }
        Frequency::Hourly => anchor.plus_seconds(step.checked_mul(3600)?).map(Seed::Instant),
        Frequency::Minutely => anchor.plus_seconds(step.checked_mul(60)?).map(Seed::Instant),
        Frequency::Secondly => anchor.plus_seconds(step).map(Seed::Instant),
    }
}
