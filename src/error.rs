//! Error types for the logging library.
//!
//! Only two failure modes ever reach a caller; every other I/O problem is
//! absorbed and reported through the writer's own LoggerError console channel.

use thiserror::Error;

/// Errors surfaced to callers of the writer and template APIs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    /// A template parameter was set without being registered first.
    #[error("line parameter `{0}` is not registered")]
    ParamNotFound(String),

    /// The active log file could not be (re)established for the current day.
    #[error("could not establish the runtime log file: {0}")]
    RuntimeLogFileGeneration(String),
}
