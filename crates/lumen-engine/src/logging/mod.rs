//! Logging setup.
//!
//! Library code only talks to the `log` facade; binaries and tests pick the
//! `env_logger` backend through [`init_logging`].

mod init;

pub use init::{LoggingConfig, init_logging};
