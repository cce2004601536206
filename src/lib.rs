//! Kuba TS client - typed bindings for the Redis time-series module
//!
//! This library provides:
//! - Validated value types for timestamps, time buckets, labels and rules
//! - Argument builders that turn typed options into exact `TS.*` token lists
//! - Reply parsers that turn raw replies into samples, series and metadata
//! - Blocking ([`TsCommands`]) and async ([`AsyncTsCommands`]) facades over
//!   any `redis` connection
//!
//! Connection management stays with the `redis` crate: open a connection the
//! usual way, bring a facade trait into scope and call `ts_*` on it.
//!
//! # Example
//!
//! ```rust,no_run
//! use kuba_ts_client::{Filter, TimeStamp, TsCommands};
//! use kuba_ts_client::options::{CreateOptions, MRangeOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = redis::Client::open("redis://127.0.0.1:6379")?;
//! let mut conn = client.get_connection()?;
//!
//! conn.ts_create("cpu:host1", &CreateOptions::new().with_label("metric", "cpu"))?;
//! conn.ts_add("cpu:host1", TimeStamp::NOW, 0.42, &Default::default())?;
//!
//! let series = conn.ts_mrange(
//!     TimeStamp::MIN,
//!     TimeStamp::MAX,
//!     &[Filter::eq("metric", "cpu")],
//!     &MRangeOptions::new().include_labels(),
//! )?;
//! for s in series {
//!     println!("{}: {} samples", s.key, s.samples.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod command;
pub mod error;
pub mod filter;
pub mod options;
pub mod reply;
pub mod types;

/// Transport seam between the facades and `redis` connections
pub mod transport;

/// Blocking and async `ts_*` facades
pub mod commands;

/// Configuration management with TOML support
pub mod config;

/// Credential-safe URL helpers
pub mod util;

/// Scripted transport for tests
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

// Re-export main types
pub use commands::{AsyncTsCommands, TsCommands};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use filter::Filter;
pub use transport::{AsyncTransport, Transport};
pub use types::{
    Aggregation, DuplicatePolicy, Label, LabeledSample, LabeledSeries, Reducer, Rule, Sample,
    SeriesInfo, TimeBucket, TimeStamp,
};
