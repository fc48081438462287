//! Value parsers for individual RRULE parts.

use chrono::NaiveDate;

use super::super::core::{RuleError, RuleErrorKind, RuleResult, Until, Weekday, WeekdayNum};

/// Parses a single integer value (INTERVAL, COUNT).
pub(super) fn parse_integer<T: std::str::FromStr>(s: &str) -> RuleResult<T> {
    s.trim()
        .parse()
        .map_err(|_| RuleError::new(RuleErrorKind::InvalidInteger, s))
}

/// Parses a comma-separated list of integers (the numeric BYxxx parts).
pub(super) fn parse_integer_list<T: std::str::FromStr>(s: &str) -> RuleResult<Vec<T>> {
    s.split(',').map(parse_integer).collect()
}

/// Parses a BYDAY list: weekday codes with optional signed ordinals
/// (e.g. `MO,WE,FR` or `1FR` or `-2MO`).
pub(super) fn parse_byday(s: &str) -> RuleResult<Vec<WeekdayNum>> {
    s.split(',').map(|v| parse_weekday_num(v.trim())).collect()
}

fn parse_weekday_num(s: &str) -> RuleResult<WeekdayNum> {
    if s.len() < 2 || !s.is_ascii() {
        return Err(RuleError::new(RuleErrorKind::InvalidWeekday, s));
    }
    let (ordinal_str, weekday_str) = s.split_at(s.len() - 2);

    let weekday = Weekday::parse(weekday_str)
        .ok_or_else(|| RuleError::new(RuleErrorKind::InvalidWeekday, s))?;
    let ordinal = if ordinal_str.is_empty() {
        None
    } else {
        Some(parse_integer(ordinal_str)?)
    };

    Ok(WeekdayNum { ordinal, weekday })
}

/// Parses an UNTIL value: `YYYYMMDD` or `YYYYMMDDTHHMMSSZ`.
///
/// Anything else — partial dates, non-UTC date-times — is rejected as
/// ambiguous.
pub(super) fn parse_until(s: &str) -> RuleResult<Until> {
    match s.split_once('T') {
        None => parse_date(s).map(Until::Date),
        Some((date_str, time_str)) => {
            let date = parse_date(date_str)
                .map_err(|_| RuleError::new(RuleErrorKind::InvalidUntil, s))?;
            let digits = time_str
                .strip_suffix('Z')
                .ok_or_else(|| RuleError::new(RuleErrorKind::InvalidUntil, s))?;
            if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RuleError::new(RuleErrorKind::InvalidUntil, s));
            }
            let (hour, rest) = digits.split_at(2);
            let (minute, second) = rest.split_at(2);
            let time = chrono::NaiveTime::from_hms_opt(
                parse_time_field(hour, s)?,
                parse_time_field(minute, s)?,
                parse_time_field(second, s)?,
            )
            .ok_or_else(|| RuleError::new(RuleErrorKind::InvalidUntil, s))?;
            Ok(Until::DateTime(date.and_time(time).and_utc()))
        }
    }
}

fn parse_time_field(digits: &str, token: &str) -> RuleResult<u32> {
    digits
        .parse()
        .map_err(|_| RuleError::new(RuleErrorKind::InvalidUntil, token))
}

/// Parses a basic ISO date, `YYYYMMDD`.
fn parse_date(s: &str) -> RuleResult<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RuleError::new(RuleErrorKind::InvalidUntil, s));
    }
    let year = parse_date_field(&s[0..4], s)?;
    let month = parse_date_field(&s[4..6], s)?;
    let day = parse_date_field(&s[6..8], s)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| RuleError::new(RuleErrorKind::InvalidUntil, s))
}

fn parse_date_field<T: std::str::FromStr>(digits: &str, token: &str) -> RuleResult<T> {
    digits
        .parse()
        .map_err(|_| RuleError::new(RuleErrorKind::InvalidUntil, token))
}
