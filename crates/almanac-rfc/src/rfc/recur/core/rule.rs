use serde::{Deserialize, Serialize};

use super::error::{RuleError, RuleErrorKind, RuleResult};
use super::freq::Frequency;
use super::until::Until;
use super::weekday::{Weekday, WeekdayNum};

/// A recurrence rule (RFC 5545 §3.3.10), immutable after construction.
///
/// Construct one with [`RecurrenceRule::builder`] or by parsing RRULE text
/// via [`crate::rfc::recur::parse`]. Invariants enforced at construction:
/// `interval >= 1`, COUNT and UNTIL never both set, and every by-part
/// operand within its legal range. Expanding occurrences never mutates the
/// rule, so one rule can back any number of independent streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: u32,
    count: Option<u32>,
    until: Option<Until>,
    week_start: Weekday,
    by_second: Vec<u8>,
    by_minute: Vec<u8>,
    by_hour: Vec<u8>,
    by_day: Vec<WeekdayNum>,
    by_month_day: Vec<i8>,
    by_year_day: Vec<i16>,
    by_week_no: Vec<i8>,
    by_month: Vec<u8>,
    by_set_pos: Vec<i16>,
}

impl RecurrenceRule {
    /// Starts building a rule with the given base frequency.
    #[must_use]
    pub fn builder(frequency: Frequency) -> RecurrenceRuleBuilder {
        RecurrenceRuleBuilder {
            frequency,
            interval: 1,
            count: None,
            until: None,
            week_start: Weekday::Monday,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
        }
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        self.count
    }

    #[must_use]
    pub const fn until(&self) -> Option<Until> {
        self.until
    }

    /// The configured first day of the week (WKST, default Monday).
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    #[must_use]
    pub fn by_second(&self) -> &[u8] {
        &self.by_second
    }

    #[must_use]
    pub fn by_minute(&self) -> &[u8] {
        &self.by_minute
    }

    #[must_use]
    pub fn by_hour(&self) -> &[u8] {
        &self.by_hour
    }

    #[must_use]
    pub fn by_day(&self) -> &[WeekdayNum] {
        &self.by_day
    }

    #[must_use]
    pub fn by_month_day(&self) -> &[i8] {
        &self.by_month_day
    }

    #[must_use]
    pub fn by_year_day(&self) -> &[i16] {
        &self.by_year_day
    }

    #[must_use]
    pub fn by_week_no(&self) -> &[i8] {
        &self.by_week_no
    }

    #[must_use]
    pub fn by_month(&self) -> &[u8] {
        &self.by_month
    }

    #[must_use]
    pub fn by_set_pos(&self) -> &[i16] {
        &self.by_set_pos
    }
}

impl std::str::FromStr for RecurrenceRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::rfc::recur::parse::parse(s)
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::rfc::recur::build::serialize(self))
    }
}

/// Builder for [`RecurrenceRule`]; `build` runs all validation.
#[derive(Debug, Clone)]
pub struct RecurrenceRuleBuilder {
    frequency: Frequency,
    interval: u32,
    count: Option<u32>,
    until: Option<Until>,
    week_start: Weekday,
    by_second: Vec<u8>,
    by_minute: Vec<u8>,
    by_hour: Vec<u8>,
    by_day: Vec<WeekdayNum>,
    by_month_day: Vec<i8>,
    by_year_day: Vec<i16>,
    by_week_no: Vec<i8>,
    by_month: Vec<u8>,
    by_set_pos: Vec<i16>,
}

impl RecurrenceRuleBuilder {
    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn until(mut self, until: Until) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    #[must_use]
    pub fn by_second(mut self, seconds: Vec<u8>) -> Self {
        self.by_second = seconds;
        self
    }

    #[must_use]
    pub fn by_minute(mut self, minutes: Vec<u8>) -> Self {
        self.by_minute = minutes;
        self
    }

    #[must_use]
    pub fn by_hour(mut self, hours: Vec<u8>) -> Self {
        self.by_hour = hours;
        self
    }

    #[must_use]
    pub fn by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.by_day = days;
        self
    }

    #[must_use]
    pub fn by_month_day(mut self, days: Vec<i8>) -> Self {
        self.by_month_day = days;
        self
    }

    #[must_use]
    pub fn by_year_day(mut self, days: Vec<i16>) -> Self {
        self.by_year_day = days;
        self
    }

    #[must_use]
    pub fn by_week_no(mut self, weeks: Vec<i8>) -> Self {
        self.by_week_no = weeks;
        self
    }

    #[must_use]
    pub fn by_month(mut self, months: Vec<u8>) -> Self {
        self.by_month = months;
        self
    }

    #[must_use]
    pub fn by_set_pos(mut self, positions: Vec<i16>) -> Self {
        self.by_set_pos = positions;
        self
    }

    /// Validates the accumulated parts and produces the immutable rule.
    ///
    /// ## Errors
    /// Returns `CountUntilConflict` when both COUNT and UNTIL are set, and
    /// `OperandOutOfRange` when `interval`, `count`, or any by-part operand
    /// falls outside its RFC 5545 range.
    pub fn build(self) -> RuleResult<RecurrenceRule> {
        if self.count.is_some() && self.until.is_some() {
            return Err(RuleError::new(
                RuleErrorKind::CountUntilConflict,
                "COUNT and UNTIL both present",
            ));
        }
        if self.interval == 0 {
            return Err(RuleError::operand("INTERVAL", self.interval));
        }
        if self.count == Some(0) {
            return Err(RuleError::operand("COUNT", 0));
        }
        check_unsigned("BYSECOND", &self.by_second, 60)?;
        check_unsigned("BYMINUTE", &self.by_minute, 59)?;
        check_unsigned("BYHOUR", &self.by_hour, 23)?;
        for day in &self.by_day {
            if let Some(ordinal) = day.ordinal {
                if ordinal == 0 || !(-53..=53).contains(&ordinal) {
                    return Err(RuleError::operand("BYDAY", ordinal));
                }
            }
        }
        check_signed("BYMONTHDAY", &self.by_month_day, 31)?;
        check_signed("BYYEARDAY", &self.by_year_day, 366)?;
        check_signed("BYWEEKNO", &self.by_week_no, 53)?;
        for month in &self.by_month {
            if !(1..=12).contains(month) {
                return Err(RuleError::operand("BYMONTH", month));
            }
        }
        check_signed("BYSETPOS", &self.by_set_pos, 366)?;

        Ok(RecurrenceRule {
            frequency: self.frequency,
            interval: self.interval,
            count: self.count,
            until: self.until,
            week_start: self.week_start,
            by_second: self.by_second,
            by_minute: self.by_minute,
            by_hour: self.by_hour,
            by_day: self.by_day,
            by_month_day: self.by_month_day,
            by_year_day: self.by_year_day,
            by_week_no: self.by_week_no,
            by_month: self.by_month,
            by_set_pos: self.by_set_pos,
        })
    }
}

fn check_unsigned(part: &'static str, values: &[u8], max: u8) -> RuleResult<()> {
    for value in values {
        if *value > max {
            return Err(RuleError::operand(part, value));
        }
    }
    Ok(())
}

fn check_signed<V>(part: &'static str, values: &[V], max: i64) -> RuleResult<()>
where
    V: Copy + Into<i64> + std::fmt::Display,
{
    for value in values {
        let v: i64 = (*value).into();
        if v == 0 || v.abs() > max {
            return Err(RuleError::operand(part, value));
        }
    }
    Ok(())
}
