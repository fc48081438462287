//! Anchor-value abstraction for the expansion engine.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

use super::super::core::Until;

/// A point in time the engine can generate occurrences for.
///
/// Implemented for [`NaiveDate`] (date-only anchors), [`NaiveDateTime`]
/// (floating local time) and [`DateTime<chrono_tz::Tz>`] (zoned time).
/// Every occurrence of a stream carries the anchor's flavor, so mixing
/// date-only and timed values within one stream is impossible by
/// construction.
///
/// Field substitution returns `None` when the result does not exist:
/// a day number missing from the target month, a time part on a
/// date-only value, or a zoned wall-clock reading that falls into a DST
/// gap. The engine drops such candidates silently.
pub trait Temporal: Copy + Ord + std::fmt::Debug {
    /// The calendar date of this value.
    fn date(&self) -> NaiveDate;

    fn hour(&self) -> u32;

    fn minute(&self) -> u32;

    fn second(&self) -> u32;

    /// The same time of day on another date.
    fn with_date(self, date: NaiveDate) -> Option<Self>;

    fn with_hour(self, hour: u32) -> Option<Self>;

    fn with_minute(self, minute: u32) -> Option<Self>;

    fn with_second(self, second: u32) -> Option<Self>;

    /// Advances by an exact number of seconds (sub-daily frequencies).
    fn plus_seconds(self, seconds: i64) -> Option<Self>;

    /// Whether this value falls on or before the UNTIL bound.
    fn is_within(&self, until: Until) -> bool;
}

impl Temporal for NaiveDate {
    fn date(&self) -> NaiveDate {
        *self
    }

    fn hour(&self) -> u32 {
        0
    }

    fn minute(&self) -> u32 {
        0
    }

    fn second(&self) -> u32 {
        0
    }

    fn with_date(self, date: NaiveDate) -> Option<Self> {
        Some(date)
    }

    fn with_hour(self, _hour: u32) -> Option<Self> {
        None
    }

    fn with_minute(self, _minute: u32) -> Option<Self> {
        None
    }

    fn with_second(self, _second: u32) -> Option<Self> {
        None
    }

    fn plus_seconds(self, _seconds: i64) -> Option<Self> {
        None
    }

    fn is_within(&self, until: Until) -> bool {
        match until {
            Until::Date(date) => *self <= date,
            Until::DateTime(dt) => *self <= dt.date_naive(),
        }
    }
}

impl Temporal for NaiveDateTime {
    fn date(&self) -> NaiveDate {
        NaiveDateTime::date(self)
    }

    fn hour(&self) -> u32 {
        Timelike::hour(self)
    }

    fn minute(&self) -> u32 {
        Timelike::minute(self)
    }

    fn second(&self) -> u32 {
        Timelike::second(self)
    }

    fn with_date(self, date: NaiveDate) -> Option<Self> {
        Some(date.and_time(self.time()))
    }

    fn with_hour(self, hour: u32) -> Option<Self> {
        Timelike::with_hour(&self, hour)
    }

    fn with_minute(self, minute: u32) -> Option<Self> {
        Timelike::with_minute(&self, minute)
    }

    fn with_second(self, second: u32) -> Option<Self> {
        Timelike::with_second(&self, second)
    }

    fn plus_seconds(self, seconds: i64) -> Option<Self> {
        self.checked_add_signed(Duration::seconds(seconds))
    }

    fn is_within(&self, until: Until) -> bool {
        // Floating values carry no zone; UNTIL's UTC reading is compared
        // as if the value were UTC.
        match until {
            Until::Date(date) => self.date() <= date,
            Until::DateTime(dt) => *self <= dt.naive_utc(),
        }
    }
}

impl Temporal for DateTime<Tz> {
    fn date(&self) -> NaiveDate {
        self.date_naive()
    }

    fn hour(&self) -> u32 {
        Timelike::hour(self)
    }

    fn minute(&self) -> u32 {
        Timelike::minute(self)
    }

    fn second(&self) -> u32 {
        Timelike::second(self)
    }

    fn with_date(self, date: NaiveDate) -> Option<Self> {
        resolve_local(self.timezone(), date.and_time(self.naive_local().time()))
    }

    fn with_hour(self, hour: u32) -> Option<Self> {
        resolve_local(self.timezone(), Timelike::with_hour(&self.naive_local(), hour)?)
    }

    fn with_minute(self, minute: u32) -> Option<Self> {
        resolve_local(
            self.timezone(),
            Timelike::with_minute(&self.naive_local(), minute)?,
        )
    }

    fn with_second(self, second: u32) -> Option<Self> {
        resolve_local(
            self.timezone(),
            Timelike::with_second(&self.naive_local(), second)?,
        )
    }

    fn plus_seconds(self, seconds: i64) -> Option<Self> {
        self.checked_add_signed(Duration::seconds(seconds))
    }

    fn is_within(&self, until: Until) -> bool {
        match until {
            Until::Date(date) => self.date_naive() <= date,
            Until::DateTime(dt) => self.with_timezone(&Utc) <= dt,
        }
    }
}

/// Resolves a wall-clock reading in `tz`. Times skipped by a forward DST
/// transition do not exist and yield `None`; ambiguous times (clocks set
/// back) resolve to the earlier offset.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => None,
    }
}
