//! RRULE text parsing (RFC 5545 §3.3.10).

mod values;

use super::core::{
    Frequency, RecurrenceRule, RuleError, RuleErrorKind, RuleResult, Until, Weekday, WeekdayNum,
};

/// Parses RRULE text into a [`RecurrenceRule`].
///
/// Grammar: `KEY=VALUE(;KEY=VALUE)*`, optionally prefixed with the
/// `RRULE:` property tag. Unknown and repeated keys fail, FREQ is
/// required, and range validation runs through the rule builder.
///
/// ## Errors
/// Returns a [`RuleError`] describing the first offending token.
pub fn parse(text: &str) -> RuleResult<RecurrenceRule> {
    let text = text.strip_prefix("RRULE:").unwrap_or(text);

    let mut frequency: Option<Frequency> = None;
    let mut interval: Option<u32> = None;
    let mut count: Option<u32> = None;
    let mut until: Option<Until> = None;
    let mut week_start: Option<Weekday> = None;
    let mut by_second: Vec<u8> = Vec::new();
    let mut by_minute: Vec<u8> = Vec::new();
    let mut by_hour: Vec<u8> = Vec::new();
    let mut by_day: Vec<WeekdayNum> = Vec::new();
    let mut by_month_day: Vec<i8> = Vec::new();
    let mut by_year_day: Vec<i16> = Vec::new();
    let mut by_week_no: Vec<i8> = Vec::new();
    let mut by_month: Vec<u8> = Vec::new();
    let mut by_set_pos: Vec<i16> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for part in text.split(';') {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| RuleError::new(RuleErrorKind::Malformed, part))?;

        let key = key.to_ascii_uppercase();
        if seen.contains(&key) {
            return Err(RuleError::new(RuleErrorKind::DuplicateKey, key));
        }

        match key.as_str() {
            "FREQ" => {
                frequency = Some(
                    Frequency::parse(value)
                        .ok_or_else(|| RuleError::new(RuleErrorKind::InvalidFrequency, value))?,
                );
            }
            "INTERVAL" => interval = Some(values::parse_integer(value)?),
            "COUNT" => count = Some(values::parse_integer(value)?),
            "UNTIL" => until = Some(values::parse_until(value)?),
            "WKST" => {
                week_start = Some(
                    Weekday::parse(value)
                        .ok_or_else(|| RuleError::new(RuleErrorKind::InvalidWeekday, value))?,
                );
            }
            "BYSECOND" => by_second = values::parse_integer_list(value)?,
            "BYMINUTE" => by_minute = values::parse_integer_list(value)?,
            "BYHOUR" => by_hour = values::parse_integer_list(value)?,
            "BYDAY" => by_day = values::parse_byday(value)?,
            "BYMONTHDAY" => by_month_day = values::parse_integer_list(value)?,
            "BYYEARDAY" => by_year_day = values::parse_integer_list(value)?,
            "BYWEEKNO" => by_week_no = values::parse_integer_list(value)?,
            "BYMONTH" => by_month = values::parse_integer_list(value)?,
            "BYSETPOS" => by_set_pos = values::parse_integer_list(value)?,
            _ => return Err(RuleError::new(RuleErrorKind::UnknownKey, key)),
        }
        seen.push(key);
    }

    let frequency =
        frequency.ok_or_else(|| RuleError::new(RuleErrorKind::MissingFrequency, text))?;

    let mut builder = RecurrenceRule::builder(frequency)
        .by_second(by_second)
        .by_minute(by_minute)
        .by_hour(by_hour)
        .by_day(by_day)
        .by_month_day(by_month_day)
        .by_year_day(by_year_day)
        .by_week_no(by_week_no)
        .by_month(by_month)
        .by_set_pos(by_set_pos);
    if let Some(interval) = interval {
        builder = builder.interval(interval);
    }
    if let Some(count) = count {
        builder = builder.count(count);
    }
    if let Some(until) = until {
        builder = builder.until(until);
    }
    if let Some(week_start) = week_start {
        builder = builder.week_start(week_start);
    }
    builder.build()
}
