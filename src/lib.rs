//! daylog - dual-sink logger with templated line prefixes and
//! date-partitioned, self-rotating log files.
//!
//! Entries are classified by severity; two independent per-severity rule
//! sets decide what is displayed on the console and what is persisted. Every
//! log line starts with a rendered prefix built from a parameterized
//! template. Persistence goes to `{root}/runtime/{month}-{year}/
//! log-{month}-{day}.log`; the writer re-derives that path on every save and
//! transparently reopens storage when the day rolls over.
//!
//! ```no_run
//! use daylog::Writer;
//!
//! let mut log = Writer::builder()
//!     .service_name("billing")
//!     .log_path("/var/log/billing")
//!     .build();
//! log.initialize();
//! log.info("service started");
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod retention;
pub mod rotation;
pub mod rules;
pub mod severity;
pub mod template;
pub mod writer;

pub use config::WriterConfig;
pub use console::{ConsoleSink, MemoryConsole, TermConsole};
pub use error::LogError;
pub use retention::{cleanup_runtime_logs, cleanup_runtime_logs_with_retention};
pub use rotation::TargetOs;
pub use rules::{DisplayRules, WriterRules};
pub use severity::Severity;
pub use template::LineTemplate;
pub use writer::{Writer, WriterBuilder};
