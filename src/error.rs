//! Runtime error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input event channel closed")]
    EventChannelClosed,

    #[error("no tokio runtime is active on this thread")]
    NoRuntime,
}

pub type Result<T> = std::result::Result<T, Error>;
