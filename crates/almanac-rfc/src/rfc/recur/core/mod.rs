//! Recurrence-rule data model.
//!
//! These types are designed for:
//! - Immutability: a [`RecurrenceRule`] never changes after construction,
//!   so concurrent readers and derived streams need no locking
//! - Round-trip fidelity: parse → serialize reproduces canonical text
//! - Validation at the boundary: operand ranges and the COUNT/UNTIL
//!   exclusion are enforced before a rule can exist

mod error;
mod freq;
mod rule;
mod until;
mod weekday;

pub use error::{RuleError, RuleErrorKind, RuleResult};
pub use freq::Frequency;
pub use rule::{RecurrenceRule, RecurrenceRuleBuilder};
pub use until::Until;
pub use weekday::{Weekday, WeekdayNum};
