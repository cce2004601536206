//! Property tests for value types and rule encoding
//!
//! Uses property-based testing (proptest) over the whole timestamp domain,
//! UTC date-times, and generated compaction rules.

use chrono::{DateTime, FixedOffset, Utc};
use kuba_ts_client::args::encode_rule;
use kuba_ts_client::reply::parse_rule;
use kuba_ts_client::types::{
    MAX_TIMESTAMP_MS, MAX_TIME_BUCKET_MS, MIN_TIMESTAMP_MS, MIN_TIME_BUCKET_MS,
};
use kuba_ts_client::{Aggregation, Error, Rule, TimeBucket, TimeStamp};
use proptest::prelude::*;
use redis::Value;

// =============================================================================
// Strategies
// =============================================================================

/// Millisecond values outside the accepted range, on both sides
fn out_of_range_millis() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..MIN_TIMESTAMP_MS, (MAX_TIMESTAMP_MS + 1)..=i64::MAX]
}

/// Non-zero UTC offsets in seconds
fn non_utc_offset() -> impl Strategy<Value = i32> {
    prop_oneof![-86_399i32..0, 1i32..86_400]
}

fn rule_strategy() -> impl Strategy<Value = Rule> {
    (
        "[a-z][a-z0-9:_]{0,24}",
        MIN_TIME_BUCKET_MS..=MAX_TIME_BUCKET_MS,
        prop::sample::select(Aggregation::ALL),
    )
        .prop_map(|(dest, bucket, aggregation)| {
            Rule::new(dest, TimeBucket::from_millis(bucket).unwrap(), aggregation)
        })
}

fn bulk(s: &str) -> Value {
    Value::BulkString(s.as_bytes().to_vec())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_millis_round_trip(ms in MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS) {
        let ts = TimeStamp::from_millis(ms).unwrap();
        prop_assert_eq!(ts.to_millis().unwrap(), ms);
        prop_assert_eq!(i64::try_from(ts).unwrap(), ms);
        prop_assert_eq!(ts.to_arg(), ms.to_string());
        prop_assert!(!ts.is_sentinel());
    }

    #[test]
    fn prop_millis_out_of_range_rejected(ms in out_of_range_millis()) {
        let is_out_of_range = matches!(TimeStamp::from_millis(ms), Err(Error::OutOfRange { .. }));
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn prop_utc_datetime_round_trip(ms in MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS) {
        let datetime = DateTime::<Utc>::from_timestamp_millis(ms).unwrap();
        let ts = TimeStamp::from_datetime(datetime).unwrap();
        prop_assert_eq!(ts.to_datetime().unwrap(), datetime);
        prop_assert_eq!(ts.as_millis(), Some(ms));
    }

    #[test]
    fn prop_non_utc_datetime_rejected(
        ms in MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS,
        offset in non_utc_offset(),
    ) {
        let offset = FixedOffset::east_opt(offset).unwrap();
        let datetime = DateTime::<Utc>::from_timestamp_millis(ms)
            .unwrap()
            .with_timezone(&offset);
        let is_invalid = matches!(
            TimeStamp::from_fixed_offset(datetime),
            Err(Error::InvalidArgument(_))
        );
        prop_assert!(is_invalid);
    }

    #[test]
    fn prop_rule_encode_decode_round_trip(rule in rule_strategy()) {
        // encode: [dest, AGGREGATION, token, bucket]; info reply: [dest, bucket, token]
        let encoded = encode_rule(&rule);
        prop_assert_eq!(encoded.len(), 4);
        prop_assert_eq!(encoded[1].as_str(), "AGGREGATION");

        let reply = Value::Array(vec![
            bulk(&encoded[0]),
            Value::Int(encoded[3].parse::<i64>().unwrap()),
            bulk(&encoded[2]),
        ]);
        prop_assert_eq!(parse_rule(&reply).unwrap(), rule);
    }
}
