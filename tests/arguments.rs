//! Argument builder integration tests
//!
//! Exercises the public `args` API end to end: typed options in, exact wire
//! tokens out, and local rejection of requests the server would refuse.

use kuba_ts_client::args;
use kuba_ts_client::options::{
    AddOptions, AlterOptions, CreateOptions, IncrByOptions, MGetOptions, MRangeOptions,
    RangeOptions,
};
use kuba_ts_client::{Aggregation, DuplicatePolicy, Error, Filter, Reducer, Rule, TimeBucket, TimeStamp};

fn ts(ms: i64) -> TimeStamp {
    TimeStamp::from_millis(ms).unwrap()
}

fn tokens(cmd: &kuba_ts_client::command::TsCommand) -> Vec<&str> {
    cmd.arguments().iter().map(String::as_str).collect()
}

// ============================================================
// Write commands
// ============================================================

#[test]
fn test_create_full_option_order() {
    let options = CreateOptions::new()
        .with_retention(60_000)
        .uncompressed()
        .with_chunk_size(4096)
        .with_duplicate_policy(DuplicatePolicy::Last)
        .with_label("sensor", "t1")
        .with_label("room", "kitchen");

    let cmd = args::create("temp:1", &options).unwrap();
    assert_eq!(
        tokens(&cmd),
        vec![
            "temp:1", "RETENTION", "60000", "UNCOMPRESSED", "CHUNK_SIZE", "4096",
            "DUPLICATE_POLICY", "LAST", "LABELS", "sensor", "t1", "room", "kitchen",
        ]
    );
    assert_eq!(cmd.key(), Some("temp:1"));
}

#[test]
fn test_create_empty_labels_vs_absent_labels() {
    let bare = args::create("k", &CreateOptions::new()).unwrap();
    assert_eq!(tokens(&bare), vec!["k"]);

    let empty = CreateOptions {
        labels: Some(vec![]),
        ..CreateOptions::default()
    };
    let cmd = args::create("k", &empty).unwrap();
    assert_eq!(tokens(&cmd), vec!["k", "LABELS"]);
}

#[test]
fn test_alter_clear_labels() {
    let cmd = args::alter("k", &AlterOptions::new().with_retention(10).clear_labels()).unwrap();
    assert_eq!(tokens(&cmd), vec!["k", "RETENTION", "10", "LABELS"]);
}

#[test]
fn test_add_with_on_duplicate_and_labels_last() {
    let options = AddOptions::new()
        .on_duplicate(DuplicatePolicy::Sum)
        .with_label("a", "b");
    let cmd = args::add("k", ts(1000), 1.5, &options).unwrap();
    assert_eq!(
        tokens(&cmd),
        vec!["k", "1000", "1.5", "ON_DUPLICATE", "SUM", "LABELS", "a", "b"]
    );
}

#[test]
fn test_add_rejects_range_sentinels() {
    for bad in [TimeStamp::MIN, TimeStamp::MAX] {
        let err = args::add("k", bad, 1.0, &AddOptions::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
    let cmd = args::add("k", TimeStamp::NOW, 1.0, &AddOptions::new()).unwrap();
    assert_eq!(tokens(&cmd), vec!["k", "*", "1"]);
}

#[test]
fn test_madd_flattens_triples() {
    let cmd = args::madd(&[("a", ts(1), 1.0), ("b", ts(2), 2.5)]).unwrap();
    assert_eq!(tokens(&cmd), vec!["a", "1", "1", "b", "2", "2.5"]);
    assert_eq!(cmd.key(), None);

    let empty: [(&str, TimeStamp, f64); 0] = [];
    assert!(matches!(args::madd(&empty), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_incrby_decrby_timestamp_keyword() {
    let options = IncrByOptions::new().with_timestamp(ts(42)).with_retention(5);
    let inc = args::incr_by("c", 3.0, &options).unwrap();
    assert_eq!(tokens(&inc), vec!["c", "3", "TIMESTAMP", "42", "RETENTION", "5"]);

    let dec = args::decr_by("c", 3.0, &IncrByOptions::new()).unwrap();
    assert_eq!(dec.to_string(), "TS.DECRBY c 3");
}

#[test]
fn test_rule_commands() {
    let rule = Rule::new("avg:1m", TimeBucket::from_millis(60_000).unwrap(), Aggregation::Avg);
    let cmd = args::create_rule("raw", &rule).unwrap();
    assert_eq!(tokens(&cmd), vec!["raw", "avg:1m", "AGGREGATION", "avg", "60000"]);

    let cmd = args::delete_rule("raw", "avg:1m").unwrap();
    assert_eq!(cmd.to_string(), "TS.DELETERULE raw avg:1m");
}

// ============================================================
// Read commands
// ============================================================

#[test]
fn test_range_option_order() {
    let options = RangeOptions::new()
        .filter_by_ts([ts(10), ts(20)])
        .filter_by_value(0.0, 100.0)
        .with_count(5)
        .with_align(TimeStamp::MIN)
        .with_aggregation(Aggregation::Max, TimeBucket::from_millis(10).unwrap());

    let cmd = args::range("k", TimeStamp::MIN, TimeStamp::MAX, &options).unwrap();
    assert_eq!(
        tokens(&cmd),
        vec![
            "k", "-", "+", "FILTER_BY_TS", "10", "20", "FILTER_BY_VALUE", "0", "100", "COUNT",
            "5", "ALIGN", "-", "AGGREGATION", "max", "10",
        ]
    );

    let rev = args::rev_range("k", ts(0), ts(5), &RangeOptions::new()).unwrap();
    assert_eq!(rev.to_string(), "TS.REVRANGE k 0 5");
}

#[test]
fn test_range_rejects_now_bound() {
    let err = args::range("k", TimeStamp::NOW, TimeStamp::MAX, &RangeOptions::new()).unwrap_err();
    assert!(err.is_local());
}

#[test]
fn test_mrange_full_order() {
    let options = MRangeOptions::new()
        .with_count(10)
        .select_labels(["room"])
        .with_aggregation(Aggregation::Twa, TimeBucket::from_millis(1000).unwrap())
        .group_by("room", Reducer::Max);

    let cmd = args::mrange(
        TimeStamp::MIN,
        TimeStamp::MAX,
        &[Filter::eq("metric", "temp"), Filter::any_of("room", ["a", "b"])],
        &options,
    )
    .unwrap();
    assert_eq!(
        tokens(&cmd),
        vec![
            "-", "+", "SELECTED_LABELS", "room", "COUNT", "10", "AGGREGATION", "twa", "1000",
            "FILTER", "metric=temp", "room=(a,b)", "GROUPBY", "room", "REDUCE", "max",
        ]
    );
    assert_eq!(cmd.key(), None);
}

#[test]
fn test_mrange_local_rejections() {
    let filters = [Filter::eq("a", "b")];

    let err = args::mrange(TimeStamp::MIN, TimeStamp::MAX, &[], &MRangeOptions::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let both = MRangeOptions::new().include_labels().select_labels(["x"]);
    let err = args::mrev_range(TimeStamp::MIN, TimeStamp::MAX, &filters, &both).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let mut no_bucket = MRangeOptions::new();
    no_bucket.range.aggregation = Some(Aggregation::Sum);
    let err = args::mrange(TimeStamp::MIN, TimeStamp::MAX, &filters, &no_bucket).unwrap_err();
    assert!(err.to_string().contains("time bucket"));
}

#[test]
fn test_empty_label_selection_rejected() {
    let filters = [Filter::eq("a", "b")];
    let none: [&str; 0] = [];

    let err = args::mrange(
        TimeStamp::MIN,
        TimeStamp::MAX,
        &filters,
        &MRangeOptions::new().select_labels(none),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = args::mget(&filters, &MGetOptions::new().select_labels(none)).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_mget_and_queryindex() {
    let cmd = args::mget(&[Filter::exists("room")], &MGetOptions::new().include_labels()).unwrap();
    assert_eq!(tokens(&cmd), vec!["WITHLABELS", "FILTER", "room!="]);

    let cmd = args::query_index(&[Filter::not_eq("a", "1"), Filter::missing("b")]).unwrap();
    assert_eq!(cmd.to_string(), "TS.QUERYINDEX a!=1 b=");

    assert!(args::query_index(&[]).is_err());
    assert!(args::mget(&[], &MGetOptions::new()).is_err());
}

#[test]
fn test_single_key_commands() {
    assert_eq!(args::get("k").unwrap().to_string(), "TS.GET k");
    assert_eq!(args::info("k").unwrap().to_string(), "TS.INFO k");
    assert_eq!(
        args::del("k", ts(1), TimeStamp::MAX).unwrap().to_string(),
        "TS.DEL k 1 +"
    );
}
