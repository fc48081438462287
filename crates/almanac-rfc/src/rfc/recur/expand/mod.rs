//! Occurrence expansion: turns a rule plus an anchor into a lazy stream.
//!
//! The engine is split into three layers: `temporal` abstracts over the
//! anchor flavors (date, floating date-time, zoned date-time), `freq`
//! seeds one candidate per base-frequency period, and `byrule` refines
//! each period's candidates through the ordered BYxxx stages. `stream`
//! drives them from an [`Iterator`] so callers only pay for what they
//! take.

mod byrule;
mod freq;
mod stream;
mod temporal;

pub use stream::Recurrences;
pub use temporal::Temporal;
