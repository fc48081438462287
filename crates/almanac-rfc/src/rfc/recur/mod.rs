//! Recurrence rules (RFC 5545 §3.3.10).
//!
//! Split the way the other RFC areas are: `core` holds the data model,
//! `parse` the text grammar, `build` the canonical serializer, and
//! `expand` the frequency/by-rule occurrence engine.

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
#[cfg(test)]
mod tests;

pub use build::serialize;
pub use core::{
    Frequency, RecurrenceRule, RecurrenceRuleBuilder, RuleError, RuleErrorKind, RuleResult, Until,
    Weekday, WeekdayNum,
};
pub use expand::{Recurrences, Temporal};
pub use parse::parse;
