use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// UNTIL bound of a recurrence rule: either a DATE or a UTC DATE-TIME
/// (RFC 5545 §3.3.10). The bound is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Until {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl std::fmt::Display for Until {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y%m%dT%H%M%SZ")),
        }
    }
}
