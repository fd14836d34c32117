use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

/// Current time truncated to the precision the store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Stamp for a mutation of something last changed at `previous`.
///
/// Always strictly after `previous`, even when the clock has not moved on
/// (or has moved backwards) since the last write.
pub fn next_change(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Fixed-width UTC rendering used for indexed columns; lexical order is
/// chronological order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
