//! Lazy occurrence streams.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use super::super::core::{Frequency, RecurrenceRule};
use super::byrule;
use super::freq::{self, Seed};
use super::temporal::Temporal;

/// By-rule combinations can be unsatisfiable (BYMONTHDAY=30 with
/// BYMONTH=2 never hits). After this many consecutive empty periods the
/// stream gives up rather than scanning the calendar forever.
///
/// The limit is scaled per base frequency to roughly a decade of
/// periods, longer than the eight-year stretch between leap days — the
/// widest gap a satisfiable rule can produce. SECONDLY is clamped to
/// about a year of periods to bound the scan cost of a dead rule, which
/// still covers the eleven-month gap of a BYMONTH filter.
const fn empty_period_limit(frequency: Frequency) -> u64 {
    match frequency {
        Frequency::Secondly => 33_000_000,
        Frequency::Minutely => 5_300_000,
        Frequency::Hourly => 88_000,
        Frequency::Daily => 3_700,
        Frequency::Weekly => 530,
        Frequency::Monthly => 125,
        Frequency::Yearly => 12,
    }
}

impl RecurrenceRule {
    /// Streams the occurrences of this rule for the given anchor
    /// (DTSTART).
    ///
    /// The anchor itself is always the first occurrence, whether or not
    /// it matches the rule's by-parts, and counts toward COUNT. Later
    /// occurrences ascend strictly, with no duplicates. The stream is
    /// lazy and borrows the rule; an unbounded rule yields forever, so
    /// bound it with [`Iterator::take`] or a [`Until`] check.
    ///
    /// [`Until`]: super::super::core::Until
    #[must_use]
    pub fn stream<T: Temporal>(&self, anchor: T) -> Recurrences<'_, T> {
        debug!(rule = %self, ?anchor, "streaming recurrences");
        Recurrences {
            rule: self,
            anchor,
            period: 0,
            buffer: VecDeque::new(),
            emitted: 0,
            started: false,
            finished: false,
        }
    }
}

/// Iterator over a rule's occurrences. Created by
/// [`RecurrenceRule::stream`].
#[derive(Debug)]
pub struct Recurrences<'a, T: Temporal> {
    rule: &'a RecurrenceRule,
    anchor: T,
    /// Index of the next base-frequency period to expand. Seeds are
    /// derived from the anchor and this index alone, so equal-parameter
    /// streams emit identical sequences.
    period: i64,
    buffer: VecDeque<T>,
    emitted: u64,
    started: bool,
    finished: bool,
}

impl<T: Temporal> Iterator for Recurrences<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.finished {
            return None;
        }
        if let Some(count) = self.rule.count() {
            if self.emitted >= u64::from(count) {
                self.finished = true;
                return None;
            }
        }
        if !self.started {
            self.started = true;
            if let Some(until) = self.rule.until() {
                if !self.anchor.is_within(until) {
                    self.finished = true;
                    return None;
                }
            }
            self.emitted += 1;
            return Some(self.anchor);
        }
        loop {
            if let Some(candidate) = self.buffer.pop_front() {
                if let Some(until) = self.rule.until() {
                    if !candidate.is_within(until) {
                        self.finished = true;
                        return None;
                    }
                }
                self.emitted += 1;
                return Some(candidate);
            }
            if !self.fill() {
                self.finished = true;
                return None;
            }
        }
    }
}

impl<T: Temporal> Recurrences<'_, T> {
    /// Expands periods until the buffer holds at least one occurrence
    /// past the anchor. Returns `false` once the stream is exhausted.
    fn fill(&mut self) -> bool {
        let limit = empty_period_limit(self.rule.frequency());
        let mut empty_periods: u64 = 0;
        loop {
            let Some(seed) = freq::seed(self.rule, self.anchor, self.period) else {
                trace!(period = self.period, "calendar range exhausted");
                return false;
            };
            self.period += 1;

            let candidates = expand_period(self.rule, self.anchor, seed);
            if candidates.is_empty() {
                empty_periods += 1;
                if empty_periods >= limit {
                    warn!(
                        rule = %self.rule,
                        scanned = limit,
                        "no occurrence within the scan limit, ending stream"
                    );
                    return false;
                }
                continue;
            }

            let mut found = false;
            for candidate in candidates {
                // Anchor-period candidates at or before the anchor were
                // already covered by the anchor itself.
                if candidate > self.anchor {
                    self.buffer.push_back(candidate);
                    found = true;
                }
            }
            if found {
                return true;
            }
        }
    }
}

/// One period's occurrences: frequency seed, date stages, time stages,
/// then BYSETPOS, sorted ascending.
fn expand_period<T: Temporal>(rule: &RecurrenceRule, anchor: T, seed: Seed<T>) -> Vec<T> {
    let candidates: Vec<T> = match seed {
        Seed::Instant(instant) => {
            if byrule::passes_date_limits(rule, instant.date()) {
                vec![instant]
            } else {
                Vec::new()
            }
        }
        Seed::Shape(shape) => byrule::refine_dates(rule, anchor.date(), shape)
            .into_iter()
            .filter_map(|date| anchor.with_date(date))
            .collect(),
    };
    let mut candidates = byrule::refine_times(rule, candidates);
    candidates.sort_unstable();
    candidates.dedup();
    byrule::apply_set_pos(rule.by_set_pos(), candidates)
}
