use chrono::{DateTime, DurationRound, TimeDelta, Utc};

pub mod error;
pub mod post;
pub mod user;

/// Persisted timestamps are epoch milliseconds; in-memory values are floored
/// to match, so a record compares equal across a store round-trip.
pub(crate) fn millis_floor(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(ts)
}
