//! RFC implementations.

pub mod recur;
