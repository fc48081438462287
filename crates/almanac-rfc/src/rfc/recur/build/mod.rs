//! Canonical RRULE serialization.
//!
//! Key order is fixed (FREQ first, then the remaining parts in RFC
//! listing order) and defaulted parts (INTERVAL=1, WKST=MO) are omitted,
//! so `serialize(parse(text)) == text` holds for canonical input.

use super::core::{RecurrenceRule, Weekday};

/// Serializes a rule to its canonical RRULE text (without the `RRULE:`
/// property tag).
#[must_use]
pub fn serialize(rule: &RecurrenceRule) -> String {
    let mut out = String::new();
    out.push_str(&format!("FREQ={}", rule.frequency()));
    if rule.interval() != 1 {
        out.push_str(&format!(";INTERVAL={}", rule.interval()));
    }
    if let Some(count) = rule.count() {
        out.push_str(&format!(";COUNT={count}"));
    }
    if let Some(until) = rule.until() {
        out.push_str(&format!(";UNTIL={until}"));
    }
    if rule.week_start() != Weekday::Monday {
        out.push_str(&format!(";WKST={}", rule.week_start()));
    }
    push_list(&mut out, "BYSECOND", rule.by_second());
    push_list(&mut out, "BYMINUTE", rule.by_minute());
    push_list(&mut out, "BYHOUR", rule.by_hour());
    push_list(&mut out, "BYDAY", rule.by_day());
    push_list(&mut out, "BYMONTHDAY", rule.by_month_day());
    push_list(&mut out, "BYYEARDAY", rule.by_year_day());
    push_list(&mut out, "BYWEEKNO", rule.by_week_no());
    push_list(&mut out, "BYMONTH", rule.by_month());
    push_list(&mut out, "BYSETPOS", rule.by_set_pos());
    out
}

fn push_list<T: std::fmt::Display>(out: &mut String, key: &str, values: &[T]) {
    if values.is_empty() {
        return;
    }
    out.push_str(&format!(";{key}="));
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&value.to_string());
    }
}
