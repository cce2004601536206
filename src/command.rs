//! Wire vocabulary: command names, keywords and the assembled command

use std::fmt;

/// Commands exposed by the time-series module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Create a series
    Create,
    /// Update series settings
    Alter,
    /// Append one sample
    Add,
    /// Append samples to several series
    MAdd,
    /// Increase the latest value
    IncrBy,
    /// Decrease the latest value
    DecrBy,
    /// Delete samples in a time range
    Del,
    /// Create a compaction rule
    CreateRule,
    /// Delete a compaction rule
    DeleteRule,
    /// Latest sample of one series
    Get,
    /// Latest samples of matching series
    MGet,
    /// Samples of one series, oldest first
    Range,
    /// Samples of one series, newest first
    RevRange,
    /// Samples of matching series, oldest first
    MRange,
    /// Samples of matching series, newest first
    MRevRange,
    /// Series metadata and statistics
    Info,
    /// Keys of matching series
    QueryIndex,
}

impl Command {
    /// The bare command token (`CREATE`, `MRANGE`, ...)
    pub fn token(&self) -> &'static str {
        match self {
            Command::Create => "CREATE",
            Command::Alter => "ALTER",
            Command::Add => "ADD",
            Command::MAdd => "MADD",
            Command::IncrBy => "INCRBY",
            Command::DecrBy => "DECRBY",
            Command::Del => "DEL",
            Command::CreateRule => "CREATERULE",
            Command::DeleteRule => "DELETERULE",
            Command::Get => "GET",
            Command::MGet => "MGET",
            Command::Range => "RANGE",
            Command::RevRange => "REVRANGE",
            Command::MRange => "MRANGE",
            Command::MRevRange => "MREVRANGE",
            Command::Info => "INFO",
            Command::QueryIndex => "QUERYINDEX",
        }
    }

    /// The name sent to the server, inside the module's `TS.` namespace
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create => "TS.CREATE",
            Command::Alter => "TS.ALTER",
            Command::Add => "TS.ADD",
            Command::MAdd => "TS.MADD",
            Command::IncrBy => "TS.INCRBY",
            Command::DecrBy => "TS.DECRBY",
            Command::Del => "TS.DEL",
            Command::CreateRule => "TS.CREATERULE",
            Command::DeleteRule => "TS.DELETERULE",
            Command::Get => "TS.GET",
            Command::MGet => "TS.MGET",
            Command::Range => "TS.RANGE",
            Command::RevRange => "TS.REVRANGE",
            Command::MRange => "TS.MRANGE",
            Command::MRevRange => "TS.MREVRANGE",
            Command::Info => "TS.INFO",
            Command::QueryIndex => "TS.QUERYINDEX",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword tokens used inside argument lists
pub mod keyword {
    /// `RETENTION <ms>`
    pub const RETENTION: &str = "RETENTION";
    /// `CHUNK_SIZE <bytes>`
    pub const CHUNK_SIZE: &str = "CHUNK_SIZE";
    /// `LABELS [k v ...]`
    pub const LABELS: &str = "LABELS";
    /// `UNCOMPRESSED`
    pub const UNCOMPRESSED: &str = "UNCOMPRESSED";
    /// `COUNT <n>`
    pub const COUNT: &str = "COUNT";
    /// `AGGREGATION <agg> <bucket>`
    pub const AGGREGATION: &str = "AGGREGATION";
    /// `FILTER <expr> ...`
    pub const FILTER: &str = "FILTER";
    /// `WITHLABELS`
    pub const WITHLABELS: &str = "WITHLABELS";
    /// `TIMESTAMP <ts>`
    pub const TIMESTAMP: &str = "TIMESTAMP";
    /// `DUPLICATE_POLICY <policy>`
    pub const DUPLICATE_POLICY: &str = "DUPLICATE_POLICY";
    /// `ON_DUPLICATE <policy>`
    pub const ON_DUPLICATE: &str = "ON_DUPLICATE";
    /// `SELECTED_LABELS <label> ...`
    pub const SELECTED_LABELS: &str = "SELECTED_LABELS";
    /// `GROUPBY <label>`
    pub const GROUPBY: &str = "GROUPBY";
    /// `REDUCE <reducer>`
    pub const REDUCE: &str = "REDUCE";
    /// `FILTER_BY_TS <ts> ...`
    pub const FILTER_BY_TS: &str = "FILTER_BY_TS";
    /// `FILTER_BY_VALUE <min> <max>`
    pub const FILTER_BY_VALUE: &str = "FILTER_BY_VALUE";
    /// `ALIGN <ts>`
    pub const ALIGN: &str = "ALIGN";
}

/// A fully assembled command: name plus ordered argument tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsCommand {
    command: Command,
    args: Vec<String>,
}

impl TsCommand {
    /// Start a command with no arguments
    pub fn new(command: Command) -> Self {
        Self {
            command,
            args: Vec::new(),
        }
    }

    /// Append one token
    pub fn arg(&mut self, token: impl ToString) -> &mut Self {
        self.args.push(token.to_string());
        self
    }

    /// Append several tokens
    pub fn args<I, T>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.args.extend(tokens.into_iter().map(|t| t.to_string()));
        self
    }

    /// The command
    pub fn command(&self) -> Command {
        self.command
    }

    /// The argument tokens, in wire order
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// First argument, which is the series key for single-key commands
    pub fn key(&self) -> Option<&str> {
        match self.command {
            Command::MAdd | Command::MGet | Command::MRange | Command::MRevRange | Command::QueryIndex => None,
            _ => self.args.first().map(String::as_str),
        }
    }

    /// Convert into a `redis` command ready to be sent
    pub fn to_redis_cmd(&self) -> redis::Cmd {
        let mut cmd = redis::cmd(self.command.name());
        for arg in &self.args {
            cmd.arg(arg.as_str());
        }
        cmd
    }
}

impl fmt::Display for TsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command.name())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
