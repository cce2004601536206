//! Transport seam
//!
//! The client never opens, pools or retries connections itself. Anything that
//! can run one command and hand back the reply is a transport: every blocking
//! `redis::ConnectionLike` (e.g. `redis::Connection`) implements [`Transport`],
//! and every `redis::aio::ConnectionLike` (e.g. `MultiplexedConnection`,
//! `ConnectionManager`) implements [`AsyncTransport`].
//!
//! Server errors come back as [`Error::Remote`](crate::Error::Remote) with the
//! server's text unchanged.

use crate::command::TsCommand;
use crate::error::Result;

use async_trait::async_trait;
use redis::Value;

/// Runs one command and returns the raw reply, blocking the caller
pub trait Transport {
    /// Execute `command`
    fn execute(&mut self, command: &TsCommand) -> Result<Value>;
}

/// Runs one command and returns the raw reply without blocking the caller
#[async_trait]
pub trait AsyncTransport: Send {
    /// Execute `command`
    async fn execute(&mut self, command: &TsCommand) -> Result<Value>;
}

impl<C> Transport for C
where
    C: redis::ConnectionLike,
{
    fn execute(&mut self, command: &TsCommand) -> Result<Value> {
        let value = command.to_redis_cmd().query::<Value>(self)?;
        Ok(value)
    }
}

#[async_trait]
impl<C> AsyncTransport for C
where
    C: redis::aio::ConnectionLike + Send,
{
    async fn execute(&mut self, command: &TsCommand) -> Result<Value> {
        let cmd = command.to_redis_cmd();
        let value = cmd.query_async::<Value>(self).await?;
        Ok(value)
    }
}
