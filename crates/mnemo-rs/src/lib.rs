//! Public surface for mnemo configuration handling.
//!
//! This crate re-exports the type model and the validator and provides a
//! small logging helper to keep consumer setup consistent.

pub mod report;

/// Re-export for convenience.
pub use mnemo_rs_config as config;
/// Re-export for convenience.
pub use mnemo_rs_protocol as protocol;

pub use mnemo_rs_config::{ConfigError, ValidationFailure, Validator, validate};
pub use mnemo_rs_protocol::MemoryConfig;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
