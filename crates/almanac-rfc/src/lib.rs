//! RFC 5545 recurrence-rule parsing and occurrence expansion.
//!
//! The entry points are [`rfc::recur::parse`] for turning RRULE text into
//! a [`rfc::recur::RecurrenceRule`], and [`rfc::recur::RecurrenceRule::stream`]
//! for lazily expanding occurrences from an anchor (DTSTART) instant.

pub mod error;
pub mod rfc;
