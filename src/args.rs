//! Argument builders
//!
//! Each builder turns typed parameters into a [`TsCommand`]: required
//! positionals first, then `KEYWORD value...` for every optional that is set.
//! Everything the server would reject for reasons visible on the client side is
//! rejected here, before a command exists.

use crate::command::{keyword, Command, TsCommand};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::options::{
    AddOptions, AlterOptions, CreateOptions, IncrByOptions, MGetOptions, MRangeOptions,
    RangeOptions,
};
use crate::types::{DuplicatePolicy, Label, Rule, Sentinel, TimeStamp};

/// `TS.CREATE key [RETENTION] [UNCOMPRESSED] [CHUNK_SIZE] [DUPLICATE_POLICY] [LABELS ...]`
pub fn create(key: &str, options: &CreateOptions) -> Result<TsCommand> {
    let mut cmd = TsCommand::new(Command::Create);
    cmd.arg(key);
    append_retention(&mut cmd, options.retention);
    append_uncompressed(&mut cmd, options.uncompressed);
    append_chunk_size(&mut cmd, options.chunk_size);
    append_policy(&mut cmd, keyword::DUPLICATE_POLICY, options.duplicate_policy);
    append_labels(&mut cmd, options.labels.as_deref());
    Ok(cmd)
}

/// `TS.ALTER key [RETENTION] [CHUNK_SIZE] [DUPLICATE_POLICY] [LABELS ...]`
pub fn alter(key: &str, options: &AlterOptions) -> Result<TsCommand> {
    let mut cmd = TsCommand::new(Command::Alter);
    cmd.arg(key);
    append_retention(&mut cmd, options.retention);
    append_chunk_size(&mut cmd, options.chunk_size);
    append_policy(&mut cmd, keyword::DUPLICATE_POLICY, options.duplicate_policy);
    append_labels(&mut cmd, options.labels.as_deref());
    Ok(cmd)
}

/// `TS.ADD key timestamp value [RETENTION] [UNCOMPRESSED] [CHUNK_SIZE] [ON_DUPLICATE] [LABELS ...]`
///
/// `timestamp` may be `*` (server time) but not `-` or `+`.
pub fn add(key: &str, timestamp: TimeStamp, value: f64, options: &AddOptions) -> Result<TsCommand> {
    ensure_writable(timestamp)?;

    let mut cmd = TsCommand::new(Command::Add);
    cmd.arg(key).arg(timestamp).arg(value);
    append_retention(&mut cmd, options.retention);
    append_uncompressed(&mut cmd, options.uncompressed);
    append_chunk_size(&mut cmd, options.chunk_size);
    append_policy(&mut cmd, keyword::ON_DUPLICATE, options.on_duplicate);
    append_labels(&mut cmd, options.labels.as_deref());
    Ok(cmd)
}

/// `TS.MADD key timestamp value [key timestamp value ...]`
pub fn madd<K: AsRef<str>>(entries: &[(K, TimeStamp, f64)]) -> Result<TsCommand> {
    if entries.is_empty() {
        return Err(Error::invalid_argument("at least one sample required"));
    }

    let mut cmd = TsCommand::new(Command::MAdd);
    for (key, timestamp, value) in entries {
        ensure_writable(*timestamp)?;
        cmd.arg(key.as_ref()).arg(timestamp).arg(value);
    }
    Ok(cmd)
}

/// `TS.INCRBY key value [TIMESTAMP] [RETENTION] [UNCOMPRESSED] [CHUNK_SIZE] [LABELS ...]`
pub fn incr_by(key: &str, value: f64, options: &IncrByOptions) -> Result<TsCommand> {
    counter(Command::IncrBy, key, value, options)
}

/// `TS.DECRBY key value [TIMESTAMP] [RETENTION] [UNCOMPRESSED] [CHUNK_SIZE] [LABELS ...]`
pub fn decr_by(key: &str, value: f64, options: &IncrByOptions) -> Result<TsCommand> {
    counter(Command::DecrBy, key, value, options)
}

fn counter(command: Command, key: &str, value: f64, options: &IncrByOptions) -> Result<TsCommand> {
    let mut cmd = TsCommand::new(command);
    cmd.arg(key).arg(value);
    if let Some(timestamp) = options.timestamp {
        ensure_writable(timestamp)?;
        cmd.arg(keyword::TIMESTAMP).arg(timestamp);
    }
    append_retention(&mut cmd, options.retention);
    append_uncompressed(&mut cmd, options.uncompressed);
    append_chunk_size(&mut cmd, options.chunk_size);
    append_labels(&mut cmd, options.labels.as_deref());
    Ok(cmd)
}

/// `TS.DEL key from to`
pub fn del(key: &str, from: TimeStamp, to: TimeStamp) -> Result<TsCommand> {
    ensure_bound(from, "from")?;
    ensure_bound(to, "to")?;

    let mut cmd = TsCommand::new(Command::Del);
    cmd.arg(key).arg(from).arg(to);
    Ok(cmd)
}

/// `TS.CREATERULE source dest AGGREGATION agg bucket`
pub fn create_rule(source_key: &str, rule: &Rule) -> Result<TsCommand> {
    let mut cmd = TsCommand::new(Command::CreateRule);
    cmd.arg(source_key).args(encode_rule(rule));
    Ok(cmd)
}

/// `TS.DELETERULE source dest`
pub fn delete_rule(source_key: &str, dest_key: &str) -> Result<TsCommand> {
    let mut cmd = TsCommand::new(Command::DeleteRule);
    cmd.arg(source_key).arg(dest_key);
    Ok(cmd)
}

/// Rule tokens in wire order: destination key, `AGGREGATION`, token, bucket
pub fn encode_rule(rule: &Rule) -> Vec<String> {
    vec![
        rule.dest_key.clone(),
        keyword::AGGREGATION.to_string(),
        rule.aggregation.as_str().to_string(),
        rule.time_bucket.to_string(),
    ]
}

/// `TS.GET key`
pub fn get(key: &str) -> Result<TsCommand> {
    let mut cmd = TsCommand::new(Command::Get);
    cmd.arg(key);
    Ok(cmd)
}

/// `TS.MGET [WITHLABELS | SELECTED_LABELS ...] FILTER ...`
pub fn mget(filters: &[Filter], options: &MGetOptions) -> Result<TsCommand> {
    ensure_filters(filters)?;
    ensure_label_selection(options.with_labels, options.select_labels.as_deref())?;

    let mut cmd = TsCommand::new(Command::MGet);
    append_label_selection(&mut cmd, options.with_labels, options.select_labels.as_deref());
    append_filters(&mut cmd, filters);
    Ok(cmd)
}

/// `TS.RANGE key from to ...`
pub fn range(key: &str, from: TimeStamp, to: TimeStamp, options: &RangeOptions) -> Result<TsCommand> {
    single_range(Command::Range, key, from, to, options)
}

/// `TS.REVRANGE key from to ...`
pub fn rev_range(key: &str, from: TimeStamp, to: TimeStamp, options: &RangeOptions) -> Result<TsCommand> {
    single_range(Command::RevRange, key, from, to, options)
}

fn single_range(
    command: Command,
    key: &str,
    from: TimeStamp,
    to: TimeStamp,
    options: &RangeOptions,
) -> Result<TsCommand> {
    ensure_bound(from, "from")?;
    ensure_bound(to, "to")?;
    ensure_range_options(options)?;

    let mut cmd = TsCommand::new(command);
    cmd.arg(key).arg(from).arg(to);
    append_sample_filters(&mut cmd, options);
    append_bucketing(&mut cmd, options);
    Ok(cmd)
}

/// `TS.MRANGE from to ... FILTER ... [GROUPBY label REDUCE reducer]`
pub fn mrange(from: TimeStamp, to: TimeStamp, filters: &[Filter], options: &MRangeOptions) -> Result<TsCommand> {
    multi_range(Command::MRange, from, to, filters, options)
}

/// `TS.MREVRANGE from to ... FILTER ... [GROUPBY label REDUCE reducer]`
pub fn mrev_range(from: TimeStamp, to: TimeStamp, filters: &[Filter], options: &MRangeOptions) -> Result<TsCommand> {
    multi_range(Command::MRevRange, from, to, filters, options)
}

fn multi_range(
    command: Command,
    from: TimeStamp,
    to: TimeStamp,
    filters: &[Filter],
    options: &MRangeOptions,
) -> Result<TsCommand> {
    ensure_filters(filters)?;
    ensure_bound(from, "from")?;
    ensure_bound(to, "to")?;
    ensure_range_options(&options.range)?;
    ensure_label_selection(options.with_labels, options.select_labels.as_deref())?;

    let mut cmd = TsCommand::new(command);
    cmd.arg(from).arg(to);
    append_sample_filters(&mut cmd, &options.range);
    append_label_selection(&mut cmd, options.with_labels, options.select_labels.as_deref());
    append_bucketing(&mut cmd, &options.range);
    append_filters(&mut cmd, filters);
    if let Some(group_by) = &options.group_by {
        cmd.arg(keyword::GROUPBY)
            .arg(&group_by.label)
            .arg(keyword::REDUCE)
            .arg(group_by.reducer.as_str());
    }
    Ok(cmd)
}

/// `TS.INFO key`
pub fn info(key: &str) -> Result<TsCommand> {
    let mut cmd = TsCommand::new(Command::Info);
    cmd.arg(key);
    Ok(cmd)
}

/// `TS.QUERYINDEX filter ...`
pub fn query_index(filters: &[Filter]) -> Result<TsCommand> {
    ensure_filters(filters)?;

    let mut cmd = TsCommand::new(Command::QueryIndex);
    cmd.args(filters.iter().map(Filter::to_arg));
    Ok(cmd)
}

// ============================================================================
// Validation
// ============================================================================

fn ensure_filters(filters: &[Filter]) -> Result<()> {
    if filters.is_empty() {
        return Err(Error::invalid_argument("at least one filter required"));
    }
    Ok(())
}

fn ensure_label_selection(with_labels: bool, select_labels: Option<&[String]>) -> Result<()> {
    if with_labels && select_labels.is_some() {
        return Err(Error::invalid_argument(
            "withLabels and selectLabels cannot be specified together",
        ));
    }
    if select_labels.is_some_and(|labels| labels.is_empty()) {
        return Err(Error::invalid_argument("selectLabels requires at least one label"));
    }
    Ok(())
}

fn ensure_range_options(options: &RangeOptions) -> Result<()> {
    if options.aggregation.is_some() && options.time_bucket.is_none() {
        return Err(Error::invalid_argument("aggregation requires a time bucket"));
    }
    if let Some(timestamps) = &options.filter_by_ts {
        if timestamps.iter().any(TimeStamp::is_sentinel) {
            return Err(Error::invalid_argument(
                "filter by timestamp accepts integer timestamps only",
            ));
        }
    }
    if options.align.and_then(|a| a.as_sentinel()) == Some(Sentinel::Now) {
        return Err(Error::invalid_argument(
            "align accepts '-', '+' or an integer timestamp",
        ));
    }
    Ok(())
}

/// Range bounds are integers, `-` or `+`
fn ensure_bound(ts: TimeStamp, name: &str) -> Result<()> {
    if ts.as_sentinel() == Some(Sentinel::Now) {
        return Err(Error::invalid_argument(format!(
            "'{}' must be '-', '+' or an integer timestamp",
            name
        )));
    }
    Ok(())
}

/// Sample timestamps are integers or `*`
fn ensure_writable(ts: TimeStamp) -> Result<()> {
    match ts.as_sentinel() {
        Some(Sentinel::Min) | Some(Sentinel::Max) => Err(Error::invalid_argument(format!(
            "sample timestamp must be '*' or an integer, got '{}'",
            ts
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// Token emitters
// ============================================================================

fn append_retention(cmd: &mut TsCommand, retention: Option<u64>) {
    if let Some(ms) = retention {
        cmd.arg(keyword::RETENTION).arg(ms);
    }
}

fn append_uncompressed(cmd: &mut TsCommand, uncompressed: bool) {
    if uncompressed {
        cmd.arg(keyword::UNCOMPRESSED);
    }
}

fn append_chunk_size(cmd: &mut TsCommand, chunk_size: Option<u64>) {
    if let Some(bytes) = chunk_size {
        cmd.arg(keyword::CHUNK_SIZE).arg(bytes);
    }
}

fn append_policy(cmd: &mut TsCommand, kw: &str, policy: Option<DuplicatePolicy>) {
    if let Some(policy) = policy {
        cmd.arg(kw).arg(policy.as_str());
    }
}

/// `LABELS` must stay last: the server reads pairs until the end of the line
fn append_labels(cmd: &mut TsCommand, labels: Option<&[Label]>) {
    if let Some(labels) = labels {
        cmd.arg(keyword::LABELS);
        for label in labels {
            cmd.arg(&label.key).arg(&label.value);
        }
    }
}

fn append_label_selection(cmd: &mut TsCommand, with_labels: bool, select_labels: Option<&[String]>) {
    if with_labels {
        cmd.arg(keyword::WITHLABELS);
    } else if let Some(labels) = select_labels {
        cmd.arg(keyword::SELECTED_LABELS).args(labels);
    }
}

fn append_filters(cmd: &mut TsCommand, filters: &[Filter]) {
    cmd.arg(keyword::FILTER).args(filters.iter().map(Filter::to_arg));
}

fn append_sample_filters(cmd: &mut TsCommand, options: &RangeOptions) {
    if let Some(timestamps) = &options.filter_by_ts {
        cmd.arg(keyword::FILTER_BY_TS).args(timestamps);
    }
    if let Some((min, max)) = options.filter_by_value {
        cmd.arg(keyword::FILTER_BY_VALUE).arg(min).arg(max);
    }
}

fn append_bucketing(cmd: &mut TsCommand, options: &RangeOptions) {
    if let Some(count) = options.count {
        cmd.arg(keyword::COUNT).arg(count);
    }
    if let Some(align) = options.align {
        cmd.arg(keyword::ALIGN).arg(align);
    }
    if let (Some(aggregation), Some(bucket)) = (options.aggregation, options.time_bucket) {
        cmd.arg(keyword::AGGREGATION)
            .arg(aggregation.as_str())
            .arg(bucket);
    }
}
