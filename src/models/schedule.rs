//! Next scheduled balance check.

use chrono::{DateTime, Utc};

const NANOS_PER_MILLI: u64 = 1_000_000;

/// RFC 1123 rendering in UTC, e.g. `Tue, 14 Nov 2023 22:13:20 GMT`.
const DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Timestamp of the canister's next automatic check, in nanoseconds since
/// the Unix epoch as returned by `next_check_utc_ns`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct NextCheck {
    nanos: u64,
}

impl NextCheck {
    pub fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    pub fn as_nanos(self) -> u64 {
        self.nanos
    }

    /// Whole milliseconds since the epoch; sub-millisecond digits are dropped.
    pub fn as_millis(self) -> u64 {
        self.nanos / NANOS_PER_MILLI
    }

    /// Calendar time at millisecond resolution.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.as_millis()).ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    /// Display string, or `None` when the timestamp is outside chrono's range.
    pub fn display(self) -> Option<String> {
        self.to_datetime()
            .map(|at| at.format(DISPLAY_FORMAT).to_string())
    }
}
