//! Response parsers
//!
//! Pure decoders from [`redis::Value`] into the crate's value types. Both RESP2
//! (flat arrays, bulk-string doubles) and RESP3 (maps, native doubles) reply
//! shapes are accepted.
//!
//! "No data" is not an error: a null reply decodes to `None` for single
//! samples and to an empty `Vec` for every list.

use crate::error::{Error, Result};
use crate::types::{
    Aggregation, DuplicatePolicy, Label, LabeledSample, LabeledSeries, Rule, Sample, SeriesInfo,
    TimeBucket, TimeStamp,
};

use redis::Value;
use tracing::trace;

/// Chunk size used to be reported as a sample count; one sample took 16 bytes
pub const LEGACY_BYTES_PER_SAMPLE: u64 = 16;

// ============================================================================
// Scalars
// ============================================================================

/// An `OK` status reply; any other reply is an error
pub fn parse_ok(value: &Value) -> Result<()> {
    let ok = match value {
        Value::Okay => true,
        Value::SimpleString(s) => s == "OK",
        Value::BulkString(bytes) => bytes.as_slice() == b"OK",
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(Error::unexpected_reply(format!("expected OK, got {:?}", value)))
    }
}

/// A UTF-8 string reply
pub fn parse_string(value: &Value) -> Result<String> {
    match value {
        Value::BulkString(bytes) => String::from_utf8(bytes.clone())
            .map_err(|e| Error::unexpected_reply(format!("invalid UTF-8 in reply: {}", e))),
        Value::SimpleString(s) => Ok(s.clone()),
        Value::VerbatimString { text, .. } => Ok(text.clone()),
        Value::Okay => Ok("OK".to_string()),
        Value::Int(i) => Ok(i.to_string()),
        other => Err(Error::unexpected_reply(format!(
            "expected string, got {:?}",
            other
        ))),
    }
}

/// An integer reply (bulk strings holding integers are accepted)
pub fn parse_integer(value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::BulkString(_) | Value::SimpleString(_) => {
            let s = parse_string(value)?;
            s.trim()
                .parse()
                .map_err(|_| Error::unexpected_reply(format!("expected integer, got '{}'", s)))
        },
        other => Err(Error::unexpected_reply(format!(
            "expected integer, got {:?}",
            other
        ))),
    }
}

/// A non-negative integer reply
pub fn parse_unsigned(value: &Value) -> Result<u64> {
    let i = parse_integer(value)?;
    u64::try_from(i)
        .map_err(|_| Error::unexpected_reply(format!("expected non-negative integer, got {}", i)))
}

/// A floating-point reply: RESP3 double, integer, or RESP2 bulk string
pub fn parse_double(value: &Value) -> Result<f64> {
    match value {
        Value::Double(d) => Ok(*d),
        Value::Int(i) => Ok(*i as f64),
        Value::BulkString(_) | Value::SimpleString(_) => {
            let s = parse_string(value)?;
            s.trim()
                .parse()
                .map_err(|_| Error::unexpected_reply(format!("expected number, got '{}'", s)))
        },
        other => Err(Error::unexpected_reply(format!(
            "expected number, got {:?}",
            other
        ))),
    }
}

/// An integer timestamp reply
pub fn parse_timestamp(value: &Value) -> Result<TimeStamp> {
    TimeStamp::from_millis(parse_integer(value)?)
}

/// `TS.MADD`: one timestamp per added sample
pub fn parse_timestamps(value: &Value) -> Result<Vec<TimeStamp>> {
    items(value)?.iter().map(parse_timestamp).collect()
}

/// An aggregation token
pub fn parse_aggregation(value: &Value) -> Result<Aggregation> {
    Aggregation::from_token(&parse_string(value)?)
}

/// A duplicate-policy token; null means "server default"
pub fn parse_duplicate_policy(value: &Value) -> Result<Option<DuplicatePolicy>> {
    match value {
        Value::Nil => Ok(None),
        other => DuplicatePolicy::from_token(&parse_string(other)?).map(Some),
    }
}

// ============================================================================
// Samples and labels
// ============================================================================

/// `[timestamp, value]`; null or an empty array decode to `None`
pub fn parse_sample(value: &Value) -> Result<Option<Sample>> {
    let parts = match value {
        Value::Nil => return Ok(None),
        Value::Array(parts) if parts.is_empty() => return Ok(None),
        Value::Array(parts) => parts,
        other => {
            return Err(Error::unexpected_reply(format!(
                "expected sample array, got {:?}",
                other
            )))
        },
    };

    match parts.as_slice() {
        [ts, val] => Ok(Some(Sample::new(parse_timestamp(ts)?, parse_double(val)?))),
        _ => Err(Error::unexpected_reply(format!(
            "sample must have 2 elements, got {}",
            parts.len()
        ))),
    }
}

/// An array of samples, in reply order
pub fn parse_samples(value: &Value) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    for item in items(value)? {
        match parse_sample(item)? {
            Some(sample) => samples.push(sample),
            None => {
                return Err(Error::unexpected_reply("empty sample inside sample list"));
            },
        }
    }
    Ok(samples)
}

/// `[[key, value], ...]` or a RESP3 map
///
/// Selected labels missing on a series come back with a null value and are dropped.
pub fn parse_labels(value: &Value) -> Result<Vec<Label>> {
    let mut labels = Vec::new();
    let mut push = |key: &Value, val: &Value| -> Result<()> {
        let key = parse_string(key)?;
        if matches!(val, Value::Nil) {
            trace!(label = %key, "skipping label without value");
            return Ok(());
        }
        labels.push(Label::new(key, parse_string(val)?));
        Ok(())
    };

    match value {
        Value::Map(pairs) => {
            for (key, val) in pairs {
                push(key, val)?;
            }
        },
        other => {
            for pair in items(other)? {
                match items(pair)? {
                    [key, val] => push(key, val)?,
                    parts => {
                        return Err(Error::unexpected_reply(format!(
                            "label must have 2 elements, got {}",
                            parts.len()
                        )))
                    },
                }
            }
        },
    }
    Ok(labels)
}

// ============================================================================
// Rules
// ============================================================================

/// `[destKey, bucket, aggregation]`; trailing elements (newer servers add alignment) are ignored
pub fn parse_rule(value: &Value) -> Result<Rule> {
    match items(value)? {
        [dest, rest @ ..] => parse_rule_body(parse_string(dest)?, rest),
        [] => Err(Error::unexpected_reply("empty rule")),
    }
}

fn parse_rule_body(dest_key: String, body: &[Value]) -> Result<Rule> {
    match body {
        [bucket, aggregation, ..] => {
            let bucket = TimeBucket::from_millis(parse_unsigned(bucket)?)?;
            Ok(Rule::new(dest_key, bucket, parse_aggregation(aggregation)?))
        },
        _ => Err(Error::unexpected_reply(format!(
            "rule for '{}' must have bucket and aggregation",
            dest_key
        ))),
    }
}

/// A list of rules; RESP3 servers send `{destKey: [bucket, aggregation, ...]}`
pub fn parse_rules(value: &Value) -> Result<Vec<Rule>> {
    match value {
        Value::Map(pairs) => {
            let mut rules = Vec::with_capacity(pairs.len());
            for (dest, body) in pairs {
                rules.push(parse_rule_body(parse_string(dest)?, items(body)?)?);
            }
            Ok(rules)
        },
        other => items(other)?.iter().map(parse_rule).collect(),
    }
}

// ============================================================================
// Multi-series replies
// ============================================================================

/// `TS.MGET`: `[[key, labels, sample], ...]` or `{key: [labels, sample]}`
pub fn parse_labeled_samples(value: &Value) -> Result<Vec<LabeledSample>> {
    let entries = keyed_entries(value)?;
    let mut out = Vec::with_capacity(entries.len());
    for (key, body) in entries {
        let (labels, sample) = match body {
            [labels, sample] => (parse_labels(labels)?, parse_sample(sample)?),
            _ => {
                return Err(Error::unexpected_reply(format!(
                    "mget entry for '{}' must have labels and sample",
                    key
                )))
            },
        };
        out.push(LabeledSample { key, labels, sample });
    }
    Ok(out)
}

/// `TS.MRANGE`: `[[key, labels, samples], ...]` or `{key: [labels, ..., samples]}`
pub fn parse_labeled_series(value: &Value) -> Result<Vec<LabeledSeries>> {
    let entries = keyed_entries(value)?;
    let mut out = Vec::with_capacity(entries.len());
    for (key, body) in entries {
        let (labels, samples) = match body {
            [labels, .., samples] => (parse_labels(labels)?, parse_samples(samples)?),
            _ => {
                return Err(Error::unexpected_reply(format!(
                    "mrange entry for '{}' must have labels and samples",
                    key
                )))
            },
        };
        out.push(LabeledSeries { key, labels, samples });
    }
    Ok(out)
}

/// `TS.QUERYINDEX`: a list (or RESP3 set) of keys
pub fn parse_keys(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Set(keys) => keys.iter().map(parse_string).collect(),
        other => items(other)?.iter().map(parse_string).collect(),
    }
}

/// Splits per-key entries into `(key, remaining elements)` for both protocol versions
fn keyed_entries(value: &Value) -> Result<Vec<(String, &[Value])>> {
    let mut entries = Vec::new();
    match value {
        Value::Map(pairs) => {
            for (key, body) in pairs {
                entries.push((parse_string(key)?, items(body)?));
            }
        },
        other => {
            for entry in items(other)? {
                match items(entry)? {
                    [key, rest @ ..] => entries.push((parse_string(key)?, rest)),
                    [] => return Err(Error::unexpected_reply("empty multi-series entry")),
                }
            }
        },
    }
    Ok(entries)
}

// ============================================================================
// Series info
// ============================================================================

/// `TS.INFO`: alternating `name, value` pairs (or a RESP3 map)
///
/// Unknown field names are skipped. The legacy `maxSamplesPerChunk` field is
/// converted to bytes unless the reply also carries `chunkSize`.
pub fn parse_info(value: &Value) -> Result<SeriesInfo> {
    let pairs: Vec<(&Value, &Value)> = match value {
        Value::Map(pairs) => pairs.iter().map(|(k, v)| (k, v)).collect(),
        other => {
            let flat = items(other)?;
            if flat.len() % 2 != 0 {
                return Err(Error::unexpected_reply(format!(
                    "info reply must hold name/value pairs, got {} elements",
                    flat.len()
                )));
            }
            flat.chunks_exact(2).map(|pair| (&pair[0], &pair[1])).collect()
        },
    };

    let mut info = SeriesInfo::default();
    let mut chunk_size = None;
    let mut legacy_chunk_samples = None;

    for (name, val) in pairs {
        let name = parse_string(name)?;
        match name.as_str() {
            "totalSamples" => info.total_samples = parse_unsigned(val)?,
            "memoryUsage" => info.memory_usage = parse_unsigned(val)?,
            "firstTimestamp" => info.first_timestamp = Some(parse_timestamp(val)?),
            "lastTimestamp" => info.last_timestamp = Some(parse_timestamp(val)?),
            "retentionTime" => info.retention_time = parse_unsigned(val)?,
            "chunkCount" => info.chunk_count = parse_unsigned(val)?,
            "chunkSize" => chunk_size = Some(parse_unsigned(val)?),
            "maxSamplesPerChunk" => legacy_chunk_samples = Some(parse_unsigned(val)?),
            "chunkType" => info.chunk_type = Some(parse_string(val)?),
            "labels" => info.labels = parse_labels(val)?,
            "sourceKey" => {
                info.source_key = match val {
                    Value::Nil => None,
                    other => Some(parse_string(other)?),
                }
            },
            "rules" => info.rules = parse_rules(val)?,
            "duplicatePolicy" => info.duplicate_policy = parse_duplicate_policy(val)?,
            unknown => trace!(field = unknown, "ignoring unknown info field"),
        }
    }

    info.chunk_size = match (chunk_size, legacy_chunk_samples) {
        (Some(bytes), _) => bytes,
        (None, Some(samples)) => samples.checked_mul(LEGACY_BYTES_PER_SAMPLE).ok_or_else(|| {
            Error::unexpected_reply(format!("maxSamplesPerChunk {} overflows a byte count", samples))
        })?,
        (None, None) => 0,
    };

    Ok(info)
}

/// Elements of an array reply; null counts as empty
fn items(value: &Value) -> Result<&[Value]> {
    match value {
        Value::Nil => Ok(&[]),
        Value::Array(items) | Value::Set(items) => Ok(items),
        other => Err(Error::unexpected_reply(format!(
            "expected array, got {:?}",
            other
        ))),
    }
}
