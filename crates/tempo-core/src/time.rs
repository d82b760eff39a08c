//! Time primitives for the TEMPO game clock
//!
//! Game time is an absolute UTC instant that advances independently of the
//! OS clock. All wire and persistence formats carry it as an ISO-8601
//! (RFC 3339) string.

use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

use chrono::{DateTime, Duration as SignedDuration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{TimeError, TimeResult};

/// An absolute instant on the simulated game timeline (UTC)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTime(DateTime<Utc>);

impl GameTime {
    /// Default starting instant of the game timeline: 2048-11-13 08:00:00 UTC
    pub fn default_start() -> Self {
        // A fixed valid calendar date; UTC construction is never ambiguous
        match Utc.with_ymd_and_hms(2048, 11, 13, 8, 0, 0) {
            chrono::LocalResult::Single(dt) => GameTime(dt),
            _ => unreachable!("fixed UTC date is always valid"),
        }
    }

    #[inline]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        GameTime(dt)
    }

    /// Build from calendar components (UTC). Returns `None` for invalid dates.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(GameTime)
    }

    /// Parse an ISO-8601 timestamp. Accepts both offset-carrying RFC 3339
    /// strings and naive timestamps, which are taken as UTC.
    pub fn parse(s: &str) -> TimeResult<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(GameTime(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| GameTime(naive.and_utc()))
            .map_err(|_| TimeError::InvalidTimestamp(s.to_string()))
    }

    #[inline]
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    #[inline]
    pub fn timestamp_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// RFC 3339 rendering, the canonical wire form
    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339()
    }

    /// Add a real duration, saturating at the edge of representable time
    pub fn saturating_add(self, d: Duration) -> Self {
        match SignedDuration::from_std(d) {
            Ok(sd) => GameTime(self.0.checked_add_signed(sd).unwrap_or(DateTime::<Utc>::MAX_UTC)),
            Err(_) => GameTime(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Subtract a real duration, saturating at the edge of representable time
    pub fn saturating_sub(self, d: Duration) -> Self {
        match SignedDuration::from_std(d) {
            Ok(sd) => GameTime(self.0.checked_sub_signed(sd).unwrap_or(DateTime::<Utc>::MIN_UTC)),
            Err(_) => GameTime(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Signed distance from `earlier` to `self`
    #[inline]
    pub fn signed_duration_since(self, earlier: GameTime) -> SignedDuration {
        self.0.signed_duration_since(earlier.0)
    }
}

impl Add<Duration> for GameTime {
    type Output = GameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<Duration> for GameTime {
    type Output = GameTime;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl fmt::Debug for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameTime({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_start() {
        let t = GameTime::default_start();
        assert_eq!(t.to_rfc3339(), "2048-11-13T08:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_roundtrip() {
        let t = GameTime::from_ymd_hms(2049, 1, 2, 3, 4, 5).unwrap();
        let parsed = GameTime::parse(&t.to_rfc3339()).unwrap();
        assert_eq!(t, parsed);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let parsed = GameTime::parse("2048-11-13T08:00:00").unwrap();
        assert_eq!(parsed, GameTime::default_start());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            GameTime::parse("not-a-timestamp"),
            Err(TimeError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_add_sub_roundtrip() {
        let t = GameTime::default_start();
        let shifted = t + Duration::from_secs(3600);
        assert_eq!(shifted - Duration::from_secs(3600), t);
        assert_eq!(shifted.signed_duration_since(t).num_seconds(), 3600);
    }

    #[test]
    fn test_serde_as_string() {
        let t = GameTime::default_start();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.starts_with("\"2048-11-13T08:00:00"));
        let back: GameTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn add_then_sub_restores(secs in 0u64..4_000_000_000) {
                let t = GameTime::default_start();
                let d = Duration::from_secs(secs);
                prop_assert_eq!((t + d) - d, t);
            }

            #[test]
            fn parse_display_roundtrip(secs in 0u64..4_000_000_000) {
                let t = GameTime::default_start() + Duration::from_secs(secs);
                prop_assert_eq!(GameTime::parse(&t.to_rfc3339()).unwrap(), t);
            }
        }
    }
}
