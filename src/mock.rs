//! Scripted transport for tests
//!
//! [`MockTransport`] replays queued replies in order and records every command
//! it was asked to run, so tests can assert both what was sent and how the
//! reply was decoded without a server.
//!
//! ```rust
//! use kuba_ts_client::mock::MockTransport;
//! use kuba_ts_client::TsCommands;
//!
//! let mut mock = MockTransport::new();
//! mock.push_ok();
//! mock.ts_create("temp:1", &Default::default()).unwrap();
//! assert_eq!(mock.issued()[0].to_string(), "TS.CREATE temp:1");
//! ```

use crate::command::TsCommand;
use crate::error::{Error, Result};
use crate::transport::{AsyncTransport, Transport};

use async_trait::async_trait;
use redis::{ErrorKind, RedisError, Value};
use std::collections::VecDeque;

/// In-memory transport with a queue of canned replies
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: VecDeque<std::result::Result<Value, String>>,
    issued: Vec<TsCommand>,
}

impl MockTransport {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw reply
    pub fn push_reply(&mut self, value: Value) -> &mut Self {
        self.replies.push_back(Ok(value));
        self
    }

    /// Queue a simple `OK`
    pub fn push_ok(&mut self) -> &mut Self {
        self.push_reply(Value::Okay)
    }

    /// Queue an integer reply
    pub fn push_int(&mut self, value: i64) -> &mut Self {
        self.push_reply(Value::Int(value))
    }

    /// Queue a server error carrying `message`
    pub fn push_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.replies.push_back(Err(message.into()));
        self
    }

    /// Every command executed so far, oldest first
    pub fn issued(&self) -> &[TsCommand] {
        &self.issued
    }

    /// Issued commands rendered as `TS.NAME arg ...` lines
    pub fn issued_lines(&self) -> Vec<String> {
        self.issued.iter().map(ToString::to_string).collect()
    }

    /// Number of queued replies not yet consumed
    pub fn pending(&self) -> usize {
        self.replies.len()
    }

    fn next_reply(&mut self, command: &TsCommand) -> Result<Value> {
        self.issued.push(command.clone());
        match self.replies.pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(Error::Remote(message)),
            None => Err(Error::Transport(RedisError::from((
                ErrorKind::ClientError,
                "mock transport has no scripted reply",
            )))),
        }
    }
}

impl Transport for MockTransport {
    fn execute(&mut self, command: &TsCommand) -> Result<Value> {
        self.next_reply(command)
    }
}

#[async_trait]
impl AsyncTransport for MockTransport {
    async fn execute(&mut self, command: &TsCommand) -> Result<Value> {
        self.next_reply(command)
    }
}
