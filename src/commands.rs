//! Time-series commands as extension traits
//!
//! [`TsCommands`] is implemented for every blocking [`Transport`] and
//! [`AsyncTsCommands`] for every [`AsyncTransport`], so a plain
//! `redis::Connection` or `redis::aio::MultiplexedConnection` gains the
//! `ts_*` methods once the trait is in scope.
//!
//! Each method builds its arguments first. A request that fails local
//! validation returns an error without touching the connection.
//!
//! # Example
//!
//! ```rust,no_run
//! use kuba_ts_client::{AsyncTsCommands, TimeStamp};
//! use kuba_ts_client::options::{CreateOptions, RangeOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = redis::Client::open("redis://127.0.0.1:6379")?;
//! let mut conn = client.get_multiplexed_async_connection().await?;
//!
//! conn.ts_create("temp:1", &CreateOptions::new().with_label("room", "kitchen")).await?;
//! conn.ts_add("temp:1", TimeStamp::from_millis(1_000)?, 21.5, &Default::default()).await?;
//!
//! let samples = conn
//!     .ts_range("temp:1", TimeStamp::MIN, TimeStamp::MAX, &RangeOptions::new())
//!     .await?;
//! assert_eq!(samples.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::args;
use crate::command::TsCommand;
use crate::error::Result;
use crate::filter::Filter;
use crate::options::{
    AddOptions, AlterOptions, CreateOptions, IncrByOptions, MGetOptions, MRangeOptions,
    RangeOptions,
};
use crate::reply;
use crate::transport::{AsyncTransport, Transport};
use crate::types::{LabeledSample, LabeledSeries, Rule, Sample, SeriesInfo, TimeStamp};

use async_trait::async_trait;
use tracing::debug;

fn log_issue(cmd: &TsCommand) {
    debug!(
        command = %cmd.command(),
        key = cmd.key().unwrap_or_default(),
        args = cmd.arguments().len(),
        "issuing time-series command"
    );
}

fn log_decoded(cmd: &TsCommand, items: usize) {
    debug!(command = %cmd.command(), items, "decoded time-series reply");
}

/// Blocking time-series commands
pub trait TsCommands: Transport {
    /// `TS.CREATE`; fails unless the server acknowledged with `OK`
    fn ts_create(&mut self, key: &str, options: &CreateOptions) -> Result<()> {
        let cmd = args::create(key, options)?;
        log_issue(&cmd);
        reply::parse_ok(&Transport::execute(self, &cmd)?)
    }

    /// `TS.ALTER`; fails unless the server acknowledged with `OK`
    fn ts_alter(&mut self, key: &str, options: &AlterOptions) -> Result<()> {
        let cmd = args::alter(key, options)?;
        log_issue(&cmd);
        reply::parse_ok(&Transport::execute(self, &cmd)?)
    }

    /// `TS.ADD`; returns the timestamp the sample was stored at
    fn ts_add(&mut self, key: &str, timestamp: TimeStamp, value: f64, options: &AddOptions) -> Result<TimeStamp> {
        let cmd = args::add(key, timestamp, value, options)?;
        log_issue(&cmd);
        reply::parse_timestamp(&Transport::execute(self, &cmd)?)
    }

    /// `TS.MADD`; one stored timestamp per entry, in order
    fn ts_madd<K: AsRef<str>>(&mut self, entries: &[(K, TimeStamp, f64)]) -> Result<Vec<TimeStamp>> {
        let cmd = args::madd(entries)?;
        log_issue(&cmd);
        let stored = reply::parse_timestamps(&Transport::execute(self, &cmd)?)?;
        log_decoded(&cmd, stored.len());
        Ok(stored)
    }

    /// `TS.INCRBY`; returns the timestamp of the updated sample
    fn ts_incrby(&mut self, key: &str, value: f64, options: &IncrByOptions) -> Result<TimeStamp> {
        let cmd = args::incr_by(key, value, options)?;
        log_issue(&cmd);
        reply::parse_timestamp(&Transport::execute(self, &cmd)?)
    }

    /// `TS.DECRBY`; returns the timestamp of the updated sample
    fn ts_decrby(&mut self, key: &str, value: f64, options: &IncrByOptions) -> Result<TimeStamp> {
        let cmd = args::decr_by(key, value, options)?;
        log_issue(&cmd);
        reply::parse_timestamp(&Transport::execute(self, &cmd)?)
    }

    /// `TS.DEL`; returns the number of deleted samples
    fn ts_del(&mut self, key: &str, from: TimeStamp, to: TimeStamp) -> Result<u64> {
        let cmd = args::del(key, from, to)?;
        log_issue(&cmd);
        reply::parse_unsigned(&Transport::execute(self, &cmd)?)
    }

    /// `TS.RANGE`; samples oldest first
    fn ts_range(&mut self, key: &str, from: TimeStamp, to: TimeStamp, options: &RangeOptions) -> Result<Vec<Sample>> {
        let cmd = args::range(key, from, to, options)?;
        log_issue(&cmd);
        let samples = reply::parse_samples(&Transport::execute(self, &cmd)?)?;
        log_decoded(&cmd, samples.len());
        Ok(samples)
    }

    /// `TS.REVRANGE`; samples newest first
    fn ts_revrange(&mut self, key: &str, from: TimeStamp, to: TimeStamp, options: &RangeOptions) -> Result<Vec<Sample>> {
        let cmd = args::rev_range(key, from, to, options)?;
        log_issue(&cmd);
        let samples = reply::parse_samples(&Transport::execute(self, &cmd)?)?;
        log_decoded(&cmd, samples.len());
        Ok(samples)
    }

    /// `TS.MRANGE`; one entry per matching series (or group)
    fn ts_mrange(
        &mut self,
        from: TimeStamp,
        to: TimeStamp,
        filters: &[Filter],
        options: &MRangeOptions,
    ) -> Result<Vec<LabeledSeries>> {
        let cmd = args::mrange(from, to, filters, options)?;
        log_issue(&cmd);
        let series = reply::parse_labeled_series(&Transport::execute(self, &cmd)?)?;
        log_decoded(&cmd, series.len());
        Ok(series)
    }

    /// `TS.MREVRANGE`; like [`ts_mrange`](Self::ts_mrange) with samples newest first
    fn ts_mrevrange(
        &mut self,
        from: TimeStamp,
        to: TimeStamp,
        filters: &[Filter],
        options: &MRangeOptions,
    ) -> Result<Vec<LabeledSeries>> {
        let cmd = args::mrev_range(from, to, filters, options)?;
        log_issue(&cmd);
        let series = reply::parse_labeled_series(&Transport::execute(self, &cmd)?)?;
        log_decoded(&cmd, series.len());
        Ok(series)
    }

    /// `TS.CREATERULE`
    fn ts_create_rule(&mut self, source_key: &str, rule: &Rule) -> Result<()> {
        let cmd = args::create_rule(source_key, rule)?;
        log_issue(&cmd);
        reply::parse_ok(&Transport::execute(self, &cmd)?)
    }

    /// `TS.DELETERULE`
    fn ts_delete_rule(&mut self, source_key: &str, dest_key: &str) -> Result<()> {
        let cmd = args::delete_rule(source_key, dest_key)?;
        log_issue(&cmd);
        reply::parse_ok(&Transport::execute(self, &cmd)?)
    }

    /// `TS.GET`; `None` for an empty series
    fn ts_get(&mut self, key: &str) -> Result<Option<Sample>> {
        let cmd = args::get(key)?;
        log_issue(&cmd);
        reply::parse_sample(&Transport::execute(self, &cmd)?)
    }

    /// `TS.MGET`; latest sample of every matching series
    fn ts_mget(&mut self, filters: &[Filter], options: &MGetOptions) -> Result<Vec<LabeledSample>> {
        let cmd = args::mget(filters, options)?;
        log_issue(&cmd);
        let entries = reply::parse_labeled_samples(&Transport::execute(self, &cmd)?)?;
        log_decoded(&cmd, entries.len());
        Ok(entries)
    }

    /// `TS.INFO`
    fn ts_info(&mut self, key: &str) -> Result<SeriesInfo> {
        let cmd = args::info(key)?;
        log_issue(&cmd);
        reply::parse_info(&Transport::execute(self, &cmd)?)
    }

    /// `TS.QUERYINDEX`; keys of every matching series
    fn ts_queryindex(&mut self, filters: &[Filter]) -> Result<Vec<String>> {
        let cmd = args::query_index(filters)?;
        log_issue(&cmd);
        let keys = reply::parse_keys(&Transport::execute(self, &cmd)?)?;
        log_decoded(&cmd, keys.len());
        Ok(keys)
    }
}

impl<T: Transport + ?Sized> TsCommands for T {}

/// Async time-series commands, same semantics as [`TsCommands`]
#[async_trait]
pub trait AsyncTsCommands: AsyncTransport {
    /// `TS.CREATE`; fails unless the server acknowledged with `OK`
    async fn ts_create(&mut self, key: &str, options: &CreateOptions) -> Result<()> {
        let cmd = args::create(key, options)?;
        log_issue(&cmd);
        reply::parse_ok(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.ALTER`; fails unless the server acknowledged with `OK`
    async fn ts_alter(&mut self, key: &str, options: &AlterOptions) -> Result<()> {
        let cmd = args::alter(key, options)?;
        log_issue(&cmd);
        reply::parse_ok(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.ADD`; returns the timestamp the sample was stored at
    async fn ts_add(&mut self, key: &str, timestamp: TimeStamp, value: f64, options: &AddOptions) -> Result<TimeStamp> {
        let cmd = args::add(key, timestamp, value, options)?;
        log_issue(&cmd);
        reply::parse_timestamp(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.MADD`; one stored timestamp per entry, in order
    async fn ts_madd<K>(&mut self, entries: &[(K, TimeStamp, f64)]) -> Result<Vec<TimeStamp>>
    where
        K: AsRef<str> + Sync,
    {
        let cmd = args::madd(entries)?;
        log_issue(&cmd);
        let stored = reply::parse_timestamps(&AsyncTransport::execute(self, &cmd).await?)?;
        log_decoded(&cmd, stored.len());
        Ok(stored)
    }

    /// `TS.INCRBY`; returns the timestamp of the updated sample
    async fn ts_incrby(&mut self, key: &str, value: f64, options: &IncrByOptions) -> Result<TimeStamp> {
        let cmd = args::incr_by(key, value, options)?;
        log_issue(&cmd);
        reply::parse_timestamp(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.DECRBY`; returns the timestamp of the updated sample
    async fn ts_decrby(&mut self, key: &str, value: f64, options: &IncrByOptions) -> Result<TimeStamp> {
        let cmd = args::decr_by(key, value, options)?;
        log_issue(&cmd);
        reply::parse_timestamp(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.DEL`; returns the number of deleted samples
    async fn ts_del(&mut self, key: &str, from: TimeStamp, to: TimeStamp) -> Result<u64> {
        let cmd = args::del(key, from, to)?;
        log_issue(&cmd);
        reply::parse_unsigned(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.RANGE`; samples oldest first
    async fn ts_range(&mut self, key: &str, from: TimeStamp, to: TimeStamp, options: &RangeOptions) -> Result<Vec<Sample>> {
        let cmd = args::range(key, from, to, options)?;
        log_issue(&cmd);
        let samples = reply::parse_samples(&AsyncTransport::execute(self, &cmd).await?)?;
        log_decoded(&cmd, samples.len());
        Ok(samples)
    }

    /// `TS.REVRANGE`; samples newest first
    async fn ts_revrange(&mut self, key: &str, from: TimeStamp, to: TimeStamp, options: &RangeOptions) -> Result<Vec<Sample>> {
        let cmd = args::rev_range(key, from, to, options)?;
        log_issue(&cmd);
        let samples = reply::parse_samples(&AsyncTransport::execute(self, &cmd).await?)?;
        log_decoded(&cmd, samples.len());
        Ok(samples)
    }

    /// `TS.MRANGE`; one entry per matching series (or group)
    async fn ts_mrange(
        &mut self,
        from: TimeStamp,
        to: TimeStamp,
        filters: &[Filter],
        options: &MRangeOptions,
    ) -> Result<Vec<LabeledSeries>> {
        let cmd = args::mrange(from, to, filters, options)?;
        log_issue(&cmd);
        let series = reply::parse_labeled_series(&AsyncTransport::execute(self, &cmd).await?)?;
        log_decoded(&cmd, series.len());
        Ok(series)
    }

    /// `TS.MREVRANGE`
    async fn ts_mrevrange(
        &mut self,
        from: TimeStamp,
        to: TimeStamp,
        filters: &[Filter],
        options: &MRangeOptions,
    ) -> Result<Vec<LabeledSeries>> {
        let cmd = args::mrev_range(from, to, filters, options)?;
        log_issue(&cmd);
        let series = reply::parse_labeled_series(&AsyncTransport::execute(self, &cmd).await?)?;
        log_decoded(&cmd, series.len());
        Ok(series)
    }

    /// `TS.CREATERULE`
    async fn ts_create_rule(&mut self, source_key: &str, rule: &Rule) -> Result<()> {
        let cmd = args::create_rule(source_key, rule)?;
        log_issue(&cmd);
        reply::parse_ok(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.DELETERULE`
    async fn ts_delete_rule(&mut self, source_key: &str, dest_key: &str) -> Result<()> {
        let cmd = args::delete_rule(source_key, dest_key)?;
        log_issue(&cmd);
        reply::parse_ok(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.GET`; `None` for an empty series
    async fn ts_get(&mut self, key: &str) -> Result<Option<Sample>> {
        let cmd = args::get(key)?;
        log_issue(&cmd);
        reply::parse_sample(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.MGET`; latest sample of every matching series
    async fn ts_mget(&mut self, filters: &[Filter], options: &MGetOptions) -> Result<Vec<LabeledSample>> {
        let cmd = args::mget(filters, options)?;
        log_issue(&cmd);
        let entries = reply::parse_labeled_samples(&AsyncTransport::execute(self, &cmd).await?)?;
        log_decoded(&cmd, entries.len());
        Ok(entries)
    }

    /// `TS.INFO`
    async fn ts_info(&mut self, key: &str) -> Result<SeriesInfo> {
        let cmd = args::info(key)?;
        log_issue(&cmd);
        reply::parse_info(&AsyncTransport::execute(self, &cmd).await?)
    }

    /// `TS.QUERYINDEX`; keys of every matching series
    async fn ts_queryindex(&mut self, filters: &[Filter]) -> Result<Vec<String>> {
        let cmd = args::query_index(filters)?;
        log_issue(&cmd);
        let keys = reply::parse_keys(&AsyncTransport::execute(self, &cmd).await?)?;
        log_decoded(&cmd, keys.len());
        Ok(keys)
    }
}

#[async_trait]
impl<T: AsyncTransport> AsyncTsCommands for T {}
