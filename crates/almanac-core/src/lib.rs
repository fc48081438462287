//! Minimal-dependency foundation for the almanac workspace.
//!
//! Holds the pure calendar arithmetic the recurrence engine is built on.
//! Everything here is total: unrepresentable dates come back as `None`,
//! never as a panic.

pub mod calendar;
