//! Value types exchanged with the time-series module
//!
//! # Key Types
//!
//! - **`TimeStamp`**: a bounded millisecond timestamp or one of the `-`, `+`, `*` sentinels
//! - **`TimeBucket`**: a strictly positive millisecond duration used for aggregation windows
//! - **`Sample`**: a single (timestamp, value) measurement
//! - **`Label`**: key/value metadata attached to a series
//! - **`Rule`**: a compaction rule from a source series into a destination series
//! - **`Aggregation`**, **`Reducer`**, **`DuplicatePolicy`**: closed sets of wire tokens
//! - **`SeriesInfo`**: the decoded reply of `TS.INFO`
//!
//! # Example
//!
//! ```rust
//! use kuba_ts_client::types::{Aggregation, Rule, TimeBucket, TimeStamp};
//!
//! let ts = TimeStamp::from_millis(1_000).unwrap();
//! assert_eq!(ts.as_millis(), Some(1_000));
//!
//! // Sentinels are spelled exactly like on the wire
//! assert_eq!("+".parse::<TimeStamp>().unwrap(), TimeStamp::MAX);
//! assert!("now".parse::<TimeStamp>().is_err());
//!
//! let rule = Rule::new("cpu:avg:1m", TimeBucket::from_millis(60_000).unwrap(), Aggregation::Avg);
//! assert_eq!(rule.aggregation.as_str(), "avg");
//! ```

use crate::error::{Error, Result};

use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Earliest accepted timestamp (the Unix epoch)
pub const MIN_TIMESTAMP_MS: i64 = 0;

/// Latest accepted timestamp: 9999-12-31T23:59:59.999Z
pub const MAX_TIMESTAMP_MS: i64 = 253_402_271_999_999;

/// Shortest accepted time bucket
pub const MIN_TIME_BUCKET_MS: u64 = 1;

/// Longest accepted time bucket
pub const MAX_TIME_BUCKET_MS: u64 = MAX_TIMESTAMP_MS as u64;

// ============================================================================
// TimeStamp
// ============================================================================

/// Timestamp placeholders understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// `-`: the earliest sample of a series
    Min,
    /// `+`: the latest sample of a series
    Max,
    /// `*`: the server's current time
    Now,
}

impl Sentinel {
    /// Wire token for this sentinel
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::Min => "-",
            Sentinel::Max => "+",
            Sentinel::Now => "*",
        }
    }

    /// Exact (case-sensitive) inverse of [`Sentinel::as_str`]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "-" => Some(Sentinel::Min),
            "+" => Some(Sentinel::Max),
            "*" => Some(Sentinel::Now),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimeStampRepr {
    Millis(i64),
    Sentinel(Sentinel),
}

/// A point in time as the server understands it
///
/// Either a millisecond offset from the Unix epoch, bounded to
/// `[0, 253402271999999]`, or one of the three [`Sentinel`]s. Values are
/// immutable and can only be built through validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeStamp(TimeStampRepr);

impl TimeStamp {
    /// `-`
    pub const MIN: TimeStamp = TimeStamp(TimeStampRepr::Sentinel(Sentinel::Min));
    /// `+`
    pub const MAX: TimeStamp = TimeStamp(TimeStampRepr::Sentinel(Sentinel::Max));
    /// `*`
    pub const NOW: TimeStamp = TimeStamp(TimeStampRepr::Sentinel(Sentinel::Now));

    /// Create a timestamp from milliseconds since the Unix epoch
    ///
    /// Fails with [`Error::OutOfRange`] outside `[0, 253402271999999]`.
    pub fn from_millis(millis: i64) -> Result<Self> {
        if !(MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS).contains(&millis) {
            return Err(Error::OutOfRange {
                field: "timestamp",
                value: millis.to_string(),
                min: MIN_TIMESTAMP_MS.to_string(),
                max: MAX_TIMESTAMP_MS.to_string(),
            });
        }
        Ok(Self(TimeStampRepr::Millis(millis)))
    }

    /// Create a sentinel timestamp
    pub const fn sentinel(sentinel: Sentinel) -> Self {
        Self(TimeStampRepr::Sentinel(sentinel))
    }

    /// Create a timestamp from a UTC date-time, truncated to millisecond precision
    pub fn from_datetime(datetime: DateTime<Utc>) -> Result<Self> {
        Self::from_millis(datetime.timestamp_millis())
    }

    /// Create a timestamp from a date-time carrying an explicit offset
    ///
    /// Only a zero offset is accepted; local times are rejected rather than
    /// silently shifted.
    pub fn from_fixed_offset(datetime: DateTime<FixedOffset>) -> Result<Self> {
        if datetime.offset().local_minus_utc() != 0 {
            return Err(Error::invalid_argument(format!(
                "timestamp date-time must be UTC, got offset {}",
                datetime.offset()
            )));
        }
        Self::from_datetime(datetime.with_timezone(&Utc))
    }

    /// Milliseconds since the epoch, `None` for sentinels
    pub fn as_millis(&self) -> Option<i64> {
        match self.0 {
            TimeStampRepr::Millis(ms) => Some(ms),
            TimeStampRepr::Sentinel(_) => None,
        }
    }

    /// The sentinel, `None` for concrete timestamps
    pub fn as_sentinel(&self) -> Option<Sentinel> {
        match self.0 {
            TimeStampRepr::Millis(_) => None,
            TimeStampRepr::Sentinel(s) => Some(s),
        }
    }

    /// True for `-`, `+` and `*`
    pub fn is_sentinel(&self) -> bool {
        self.as_sentinel().is_some()
    }

    /// Milliseconds since the epoch, failing with [`Error::InvalidCast`] for sentinels
    pub fn to_millis(&self) -> Result<i64> {
        self.as_millis().ok_or_else(|| {
            Error::InvalidCast(format!(
                "sentinel timestamp '{}' has no integer value",
                self
            ))
        })
    }

    /// UTC date-time, failing with [`Error::InvalidCast`] for sentinels
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let millis = self.to_millis()?;
        DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            Error::InvalidCast(format!("timestamp {} is not a valid date-time", millis))
        })
    }

    /// Wire token: the integer or the sentinel character
    pub fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            TimeStampRepr::Millis(ms) => write!(f, "{}", ms),
            TimeStampRepr::Sentinel(s) => f.write_str(s.as_str()),
        }
    }
}

impl From<Sentinel> for TimeStamp {
    fn from(sentinel: Sentinel) -> Self {
        TimeStamp::sentinel(sentinel)
    }
}

impl FromStr for TimeStamp {
    type Err = Error;

    /// Accepts exactly `-`, `+` or `*`
    fn from_str(s: &str) -> Result<Self> {
        Sentinel::from_token(s)
            .map(TimeStamp::sentinel)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "timestamp string must be one of '-', '+', '*', got '{}'",
                    s
                ))
            })
    }
}

impl TryFrom<&str> for TimeStamp {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<i64> for TimeStamp {
    type Error = Error;

    fn try_from(millis: i64) -> Result<Self> {
        TimeStamp::from_millis(millis)
    }
}

impl TryFrom<DateTime<Utc>> for TimeStamp {
    type Error = Error;

    fn try_from(datetime: DateTime<Utc>) -> Result<Self> {
        TimeStamp::from_datetime(datetime)
    }
}

impl TryFrom<DateTime<FixedOffset>> for TimeStamp {
    type Error = Error;

    fn try_from(datetime: DateTime<FixedOffset>) -> Result<Self> {
        TimeStamp::from_fixed_offset(datetime)
    }
}

impl TryFrom<TimeStamp> for i64 {
    type Error = Error;

    fn try_from(ts: TimeStamp) -> Result<Self> {
        ts.to_millis()
    }
}

impl TryFrom<TimeStamp> for DateTime<Utc> {
    type Error = Error;

    fn try_from(ts: TimeStamp) -> Result<Self> {
        ts.to_datetime()
    }
}

// ============================================================================
// TimeBucket
// ============================================================================

/// Width of an aggregation window in milliseconds, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeBucket(u64);

impl TimeBucket {
    /// Create a bucket, failing with [`Error::OutOfRange`] outside `[1, 253402271999999]`
    pub fn from_millis(millis: u64) -> Result<Self> {
        if !(MIN_TIME_BUCKET_MS..=MAX_TIME_BUCKET_MS).contains(&millis) {
            return Err(Error::OutOfRange {
                field: "time bucket",
                value: millis.to_string(),
                min: MIN_TIME_BUCKET_MS.to_string(),
                max: MAX_TIME_BUCKET_MS.to_string(),
            });
        }
        Ok(Self(millis))
    }

    /// Create a bucket from a duration, truncated to whole milliseconds
    pub fn from_duration(duration: Duration) -> Result<Self> {
        let millis = u64::try_from(duration.as_millis()).map_err(|_| Error::OutOfRange {
            field: "time bucket",
            value: format!("{:?}", duration),
            min: MIN_TIME_BUCKET_MS.to_string(),
            max: MAX_TIME_BUCKET_MS.to_string(),
        })?;
        Self::from_millis(millis)
    }

    /// The distance between two concrete timestamps
    ///
    /// `to` must lie at least one millisecond after `from`.
    pub fn between(from: TimeStamp, to: TimeStamp) -> Result<Self> {
        let diff = to.to_millis()? - from.to_millis()?;
        if diff < MIN_TIME_BUCKET_MS as i64 {
            return Err(Error::OutOfRange {
                field: "time bucket",
                value: diff.to_string(),
                min: MIN_TIME_BUCKET_MS.to_string(),
                max: MAX_TIME_BUCKET_MS.to_string(),
            });
        }
        Self::from_millis(diff as u64)
    }

    /// Width in milliseconds
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Width as a std duration
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for TimeBucket {
    type Error = Error;

    fn try_from(millis: u64) -> Result<Self> {
        TimeBucket::from_millis(millis)
    }
}

impl TryFrom<Duration> for TimeBucket {
    type Error = Error;

    fn try_from(duration: Duration) -> Result<Self> {
        TimeBucket::from_duration(duration)
    }
}

// ============================================================================
// Sample / Label / Rule
// ============================================================================

/// A single measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// When the value was recorded
    pub timestamp: TimeStamp,
    /// The measured value
    pub value: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(timestamp: TimeStamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.timestamp, self.value)
    }
}

/// Key/value metadata attached to a series
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    /// Label name
    pub key: String,
    /// Label value
    pub value: String,
}

impl Label {
    /// Create a new label
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Label {
    fn from((key, value): (K, V)) -> Self {
        Label::new(key, value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Compaction rule: the source series is aggregated into `dest_key`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Key of the destination series
    pub dest_key: String,
    /// Aggregation window
    pub time_bucket: TimeBucket,
    /// Aggregation applied per window
    pub aggregation: Aggregation,
}

impl Rule {
    /// Create a new rule
    pub fn new(dest_key: impl Into<String>, time_bucket: TimeBucket, aggregation: Aggregation) -> Self {
        Self {
            dest_key: dest_key.into(),
            time_bucket,
            aggregation,
        }
    }
}

// ============================================================================
// Closed token sets
// ============================================================================

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire token
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }

            /// Inverse of `as_str`; the server echoes tokens in either case
            pub fn from_token(token: &str) -> Result<Self> {
                $(
                    if token.eq_ignore_ascii_case($token) {
                        return Ok($name::$variant);
                    }
                )+
                Err(Error::unexpected_reply(format!(
                    concat!("unknown ", $what, " token '{}'"),
                    token
                )))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            /// Parses caller-supplied text, so an unknown token is an invalid argument
            fn from_str(s: &str) -> Result<Self> {
                $name::from_token(s).map_err(|_| {
                    Error::invalid_argument(format!(concat!("unknown ", $what, " '{}'"), s))
                })
            }
        }
    };
}

wire_enum! {
    /// Per-bucket aggregation for range queries and compaction rules
    Aggregation, "aggregation" {
        /// Arithmetic mean
        Avg => "avg",
        /// Sum of values
        Sum => "sum",
        /// Minimum value
        Min => "min",
        /// Maximum value
        Max => "max",
        /// Difference between max and min
        Range => "range",
        /// Number of values
        Count => "count",
        /// First value in the bucket
        First => "first",
        /// Last value in the bucket
        Last => "last",
        /// Population standard deviation
        StdP => "std.p",
        /// Sample standard deviation
        StdS => "std.s",
        /// Population variance
        VarP => "var.p",
        /// Sample variance
        VarS => "var.s",
        /// Time-weighted average
        Twa => "twa",
    }
}

wire_enum! {
    /// Reduction applied across the series of one `GROUPBY` group
    Reducer, "reducer" {
        /// Minimum across series
        Min => "min",
        /// Maximum across series
        Max => "max",
        /// Sum across series
        Sum => "sum",
        /// Mean across series
        Avg => "avg",
        /// Max minus min across series
        Range => "range",
        /// Number of series with a value
        Count => "count",
        /// Population standard deviation
        StdP => "std.p",
        /// Sample standard deviation
        StdS => "std.s",
        /// Population variance
        VarP => "var.p",
        /// Sample variance
        VarS => "var.s",
    }
}

wire_enum! {
    /// How a sample colliding on timestamp with an existing one is resolved
    DuplicatePolicy, "duplicate policy" {
        /// Reject the new sample with an error
        Block => "BLOCK",
        /// Keep the existing sample
        First => "FIRST",
        /// Replace with the new sample
        Last => "LAST",
        /// Keep the smaller value
        Min => "MIN",
        /// Keep the larger value
        Max => "MAX",
        /// Store the sum of both values
        Sum => "SUM",
    }
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::Block
    }
}

impl serde::Serialize for DuplicatePolicy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for DuplicatePolicy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Query results
// ============================================================================

/// Decoded `TS.INFO` reply
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesInfo {
    /// Number of samples in the series
    pub total_samples: u64,
    /// Bytes used by the series
    pub memory_usage: u64,
    /// Timestamp of the first sample
    pub first_timestamp: Option<TimeStamp>,
    /// Timestamp of the last sample
    pub last_timestamp: Option<TimeStamp>,
    /// Retention in milliseconds, 0 meaning unbounded
    pub retention_time: u64,
    /// Number of memory chunks
    pub chunk_count: u64,
    /// Chunk size in bytes
    pub chunk_size: u64,
    /// Chunk encoding, e.g. `compressed`
    pub chunk_type: Option<String>,
    /// Labels of the series
    pub labels: Vec<Label>,
    /// Source series, when this series is a compaction destination
    pub source_key: Option<String>,
    /// Compaction rules, when this series is a compaction source
    pub rules: Vec<Rule>,
    /// Effective duplicate policy; `None` when the server default applies
    pub duplicate_policy: Option<DuplicatePolicy>,
}

/// One `TS.MGET` entry
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    /// Series key
    pub key: String,
    /// Labels returned for the series (empty unless requested)
    pub labels: Vec<Label>,
    /// Latest sample, `None` for an empty series
    pub sample: Option<Sample>,
}

/// One `TS.MRANGE` / `TS.MREVRANGE` entry
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSeries {
    /// Series key (or group name when grouping)
    pub key: String,
    /// Labels returned for the series (empty unless requested)
    pub labels: Vec<Label>,
    /// Samples in reply order
    pub samples: Vec<Sample>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_bounds() {
        assert_eq!(TimeStamp::from_millis(0).unwrap().as_millis(), Some(0));
        assert_eq!(
            TimeStamp::from_millis(MAX_TIMESTAMP_MS).unwrap().as_millis(),
            Some(MAX_TIMESTAMP_MS)
        );
        assert!(matches!(
            TimeStamp::from_millis(-1),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            TimeStamp::from_millis(MAX_TIMESTAMP_MS + 1),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_timestamp_millis_roundtrip_samples() {
        for ms in [0, 1, 999, 1_600_000_000_000, MAX_TIMESTAMP_MS - 1, MAX_TIMESTAMP_MS] {
            let ts = TimeStamp::from_millis(ms).unwrap();
            assert_eq!(i64::try_from(ts).unwrap(), ms);
        }
    }

    #[test]
    fn test_sentinel_parsing_is_exact() {
        assert_eq!("-".parse::<TimeStamp>().unwrap(), TimeStamp::MIN);
        assert_eq!("+".parse::<TimeStamp>().unwrap(), TimeStamp::MAX);
        assert_eq!("*".parse::<TimeStamp>().unwrap(), TimeStamp::NOW);

        for bad in ["", " -", "+ ", "**", "max", "123", "MIN"] {
            assert!(
                matches!(bad.parse::<TimeStamp>(), Err(Error::InvalidArgument(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_sentinel_to_integer_is_invalid_cast() {
        for ts in [TimeStamp::MIN, TimeStamp::MAX, TimeStamp::NOW] {
            assert!(matches!(i64::try_from(ts), Err(Error::InvalidCast(_))));
            assert!(matches!(ts.to_datetime(), Err(Error::InvalidCast(_))));
        }
    }

    #[test]
    fn test_datetime_roundtrip() {
        let cases = [
            Utc.timestamp_millis_opt(0).unwrap(),
            Utc.with_ymd_and_hms(2021, 3, 14, 15, 9, 26).unwrap(),
            Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap() + chrono::Duration::milliseconds(999),
        ];
        for dt in cases {
            let ts = TimeStamp::from_datetime(dt).unwrap();
            assert_eq!(ts.to_datetime().unwrap(), dt);
        }
    }

    #[test]
    fn test_datetime_before_epoch_rejected() {
        let dt = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert!(matches!(
            TimeStamp::from_datetime(dt),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_non_utc_offset_rejected() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = plus_two.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            TimeStamp::try_from(local),
            Err(Error::InvalidArgument(_))
        ));

        let zero = FixedOffset::east_opt(0).unwrap();
        let utc = zero.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            TimeStamp::try_from(utc).unwrap().as_millis(),
            Some(1_640_995_200_000)
        );
    }

    #[test]
    fn test_timestamp_wire_tokens() {
        assert_eq!(TimeStamp::MIN.to_arg(), "-");
        assert_eq!(TimeStamp::MAX.to_arg(), "+");
        assert_eq!(TimeStamp::NOW.to_arg(), "*");
        assert_eq!(TimeStamp::from_millis(42).unwrap().to_arg(), "42");
    }

    #[test]
    fn test_time_bucket_bounds() {
        assert!(matches!(
            TimeBucket::from_millis(0),
            Err(Error::OutOfRange { .. })
        ));
        assert_eq!(TimeBucket::from_millis(1).unwrap().as_millis(), 1);
        assert!(TimeBucket::from_millis(MAX_TIME_BUCKET_MS).is_ok());
        assert!(TimeBucket::from_millis(MAX_TIME_BUCKET_MS + 1).is_err());
        assert_eq!(
            TimeBucket::from_duration(Duration::from_secs(60)).unwrap().as_millis(),
            60_000
        );
    }

    #[test]
    fn test_time_bucket_between() {
        let a = TimeStamp::from_millis(1_000).unwrap();
        let b = TimeStamp::from_millis(1_001).unwrap();

        assert_eq!(TimeBucket::between(a, b).unwrap().as_millis(), 1);
        assert!(TimeBucket::between(a, a).is_err());
        assert!(TimeBucket::between(b, a).is_err());
        assert!(matches!(
            TimeBucket::between(TimeStamp::MIN, b),
            Err(Error::InvalidCast(_))
        ));
    }

    #[test]
    fn test_aggregation_tokens() {
        for agg in Aggregation::ALL {
            assert_eq!(Aggregation::from_token(agg.as_str()).unwrap(), *agg);
            assert_eq!(agg.as_str(), agg.as_str().to_lowercase());
        }
        assert_eq!(Aggregation::from_token("AVG").unwrap(), Aggregation::Avg);
        assert_eq!(Aggregation::from_token("STD.P").unwrap(), Aggregation::StdP);
        assert!(matches!(
            Aggregation::from_token("median"),
            Err(Error::UnexpectedReply(_))
        ));
    }

    #[test]
    fn test_duplicate_policy_tokens() {
        let tokens: Vec<_> = DuplicatePolicy::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(tokens, ["BLOCK", "FIRST", "LAST", "MIN", "MAX", "SUM"]);
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Block);
        assert_eq!("sum".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Sum);
        assert!(matches!(
            "keep".parse::<DuplicatePolicy>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            "median".parse::<Aggregation>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reducer_tokens() {
        for reducer in Reducer::ALL {
            assert_eq!(reducer.as_str().parse::<Reducer>().unwrap(), *reducer);
        }
        assert!(Reducer::from_token("first").is_err());
    }

    #[test]
    fn test_structural_equality() {
        let bucket = TimeBucket::from_millis(1_000).unwrap();
        assert_eq!(
            Rule::new("dest", bucket, Aggregation::Max),
            Rule::new("dest".to_string(), bucket, Aggregation::Max)
        );
        assert_ne!(
            Rule::new("dest", bucket, Aggregation::Max),
            Rule::new("dest", bucket, Aggregation::Min)
        );
        assert_eq!(Label::new("a", "b"), Label::from(("a", "b")));

        let ts = TimeStamp::from_millis(5).unwrap();
        assert_eq!(Sample::new(ts, 1.5), Sample::new(ts, 1.5));
        assert_ne!(Sample::new(ts, 1.5), Sample::new(ts, 1.6));
    }
}
