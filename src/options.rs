//! Optional parameters for each command
//!
//! Every field left at its default emits nothing on the wire, so the server's
//! own default (or, for `TS.ALTER`, the series' current setting) applies.
//!
//! Labels are tri-state: `None` leaves them alone, `Some(vec![])` sends a
//! bare `LABELS` keyword, which clears them on `TS.ALTER`.
//!
//! # Example
//!
//! ```rust
//! use kuba_ts_client::options::{CreateOptions, MRangeOptions};
//! use kuba_ts_client::types::{Aggregation, DuplicatePolicy, Reducer, TimeBucket};
//!
//! let create = CreateOptions::new()
//!     .with_retention(86_400_000)
//!     .with_duplicate_policy(DuplicatePolicy::Last)
//!     .with_label("host", "web-1");
//!
//! let mrange = MRangeOptions::new()
//!     .with_aggregation(Aggregation::Avg, TimeBucket::from_millis(60_000).unwrap())
//!     .group_by("region", Reducer::Max);
//! ```

use crate::types::{Aggregation, DuplicatePolicy, Label, Reducer, TimeBucket, TimeStamp};

/// Options for `TS.CREATE`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Maximum age of samples in milliseconds, relative to the last sample
    pub retention: Option<u64>,
    /// Store samples without compression
    pub uncompressed: bool,
    /// Memory chunk size in bytes
    pub chunk_size: Option<u64>,
    /// Policy for samples colliding on timestamp
    pub duplicate_policy: Option<DuplicatePolicy>,
    /// Series labels
    pub labels: Option<Vec<Label>>,
}

impl CreateOptions {
    /// Options that send nothing beyond the key
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Store samples uncompressed
    pub fn uncompressed(mut self) -> Self {
        self.uncompressed = true;
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }

    /// Add one label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(Vec::new)
            .push(Label::new(key, value));
        self
    }

    /// Replace the label set
    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

/// Options for `TS.ALTER`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterOptions {
    /// New retention in milliseconds
    pub retention: Option<u64>,
    /// New chunk size in bytes
    pub chunk_size: Option<u64>,
    /// New duplicate policy
    pub duplicate_policy: Option<DuplicatePolicy>,
    /// Replacement label set; `Some(vec![])` removes every label
    pub labels: Option<Vec<Label>>,
}

impl AlterOptions {
    /// Options that change nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }

    /// Add one label to the replacement set
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(Vec::new)
            .push(Label::new(key, value));
        self
    }

    /// Replace the label set
    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Remove every label from the series
    pub fn clear_labels(mut self) -> Self {
        self.labels = Some(Vec::new());
        self
    }
}

/// Options for `TS.ADD`; all except `on_duplicate` only apply when the add creates the series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddOptions {
    /// Retention in milliseconds
    pub retention: Option<u64>,
    /// Store samples without compression
    pub uncompressed: bool,
    /// Chunk size in bytes
    pub chunk_size: Option<u64>,
    /// Policy override for this sample only (`ON_DUPLICATE`)
    pub on_duplicate: Option<DuplicatePolicy>,
    /// Labels
    pub labels: Option<Vec<Label>>,
}

impl AddOptions {
    /// Options that send nothing beyond key, timestamp and value
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Store samples uncompressed
    pub fn uncompressed(mut self) -> Self {
        self.uncompressed = true;
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Override the duplicate policy for this sample
    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = Some(policy);
        self
    }

    /// Add one label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(Vec::new)
            .push(Label::new(key, value));
        self
    }

    /// Replace the label set
    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

/// Options for `TS.INCRBY` / `TS.DECRBY`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncrByOptions {
    /// Timestamp of the updated sample; the server uses its clock when absent
    pub timestamp: Option<TimeStamp>,
    /// Retention in milliseconds
    pub retention: Option<u64>,
    /// Store samples without compression
    pub uncompressed: bool,
    /// Chunk size in bytes
    pub chunk_size: Option<u64>,
    /// Labels
    pub labels: Option<Vec<Label>>,
}

impl IncrByOptions {
    /// Options that send nothing beyond key and delta
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sample timestamp
    pub fn with_timestamp(mut self, timestamp: TimeStamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the retention in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Store samples uncompressed
    pub fn uncompressed(mut self) -> Self {
        self.uncompressed = true;
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Add one label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(Vec::new)
            .push(Label::new(key, value));
        self
    }
}

/// Options shared by `TS.RANGE` and `TS.REVRANGE`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeOptions {
    /// Only return samples at these timestamps
    pub filter_by_ts: Option<Vec<TimeStamp>>,
    /// Only return samples with `min <= value <= max`
    pub filter_by_value: Option<(f64, f64)>,
    /// Maximum number of samples (or buckets) returned
    pub count: Option<u64>,
    /// Bucket alignment: `-`, `+` or an integer timestamp
    pub align: Option<TimeStamp>,
    /// Per-bucket aggregation; requires `time_bucket`
    pub aggregation: Option<Aggregation>,
    /// Bucket width; ignored without `aggregation`
    pub time_bucket: Option<TimeBucket>,
}

impl RangeOptions {
    /// Options returning every raw sample in range
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given timestamps
    pub fn filter_by_ts<I>(mut self, timestamps: I) -> Self
    where
        I: IntoIterator<Item = TimeStamp>,
    {
        self.filter_by_ts = Some(timestamps.into_iter().collect());
        self
    }

    /// Restrict to values in `[min, max]`
    pub fn filter_by_value(mut self, min: f64, max: f64) -> Self {
        self.filter_by_value = Some((min, max));
        self
    }

    /// Limit the number of returned entries
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Align buckets to the given timestamp
    pub fn with_align(mut self, align: TimeStamp) -> Self {
        self.align = Some(align);
        self
    }

    /// Aggregate into buckets of the given width
    pub fn with_aggregation(mut self, aggregation: Aggregation, time_bucket: TimeBucket) -> Self {
        self.aggregation = Some(aggregation);
        self.time_bucket = Some(time_bucket);
        self
    }
}

/// `GROUPBY <label> REDUCE <reducer>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupBy {
    /// Label whose values define the groups
    pub label: String,
    /// Reduction across the series of a group
    pub reducer: Reducer,
}

impl GroupBy {
    /// Create a grouping
    pub fn new(label: impl Into<String>, reducer: Reducer) -> Self {
        Self {
            label: label.into(),
            reducer,
        }
    }
}

/// Options for `TS.MRANGE` / `TS.MREVRANGE`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MRangeOptions {
    /// Per-series range options
    pub range: RangeOptions,
    /// Return every label of each series; exclusive with `select_labels`
    pub with_labels: bool,
    /// Return only these labels; exclusive with `with_labels`
    pub select_labels: Option<Vec<String>>,
    /// Group series by label and reduce each group
    pub group_by: Option<GroupBy>,
}

impl MRangeOptions {
    /// Options returning raw samples without labels
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing range options
    pub fn from_range(range: RangeOptions) -> Self {
        Self {
            range,
            ..Default::default()
        }
    }

    /// Restrict to the given timestamps
    pub fn filter_by_ts<I>(mut self, timestamps: I) -> Self
    where
        I: IntoIterator<Item = TimeStamp>,
    {
        self.range = self.range.filter_by_ts(timestamps);
        self
    }

    /// Restrict to values in `[min, max]`
    pub fn filter_by_value(mut self, min: f64, max: f64) -> Self {
        self.range = self.range.filter_by_value(min, max);
        self
    }

    /// Limit the number of entries per series
    pub fn with_count(mut self, count: u64) -> Self {
        self.range = self.range.with_count(count);
        self
    }

    /// Align buckets to the given timestamp
    pub fn with_align(mut self, align: TimeStamp) -> Self {
        self.range = self.range.with_align(align);
        self
    }

    /// Aggregate into buckets of the given width
    pub fn with_aggregation(mut self, aggregation: Aggregation, time_bucket: TimeBucket) -> Self {
        self.range = self.range.with_aggregation(aggregation, time_bucket);
        self
    }

    /// Return all labels (`WITHLABELS`)
    pub fn include_labels(mut self) -> Self {
        self.with_labels = true;
        self
    }

    /// Return only the named labels (`SELECTED_LABELS`)
    pub fn select_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Group by a label and reduce
    pub fn group_by(mut self, label: impl Into<String>, reducer: Reducer) -> Self {
        self.group_by = Some(GroupBy::new(label, reducer));
        self
    }
}

/// Options for `TS.MGET`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MGetOptions {
    /// Return every label of each series; exclusive with `select_labels`
    pub with_labels: bool,
    /// Return only these labels; exclusive with `with_labels`
    pub select_labels: Option<Vec<String>>,
}

impl MGetOptions {
    /// Options returning samples without labels
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all labels (`WITHLABELS`)
    pub fn include_labels(mut self) -> Self {
        self.with_labels = true;
        self
    }

    /// Return only the named labels (`SELECTED_LABELS`)
    pub fn select_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}
