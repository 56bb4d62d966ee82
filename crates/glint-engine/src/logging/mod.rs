//! One-shot `env_logger` setup for binaries and tests.

mod init;

pub use init::{init_logging, LoggingConfig};
