//! Framework error type.
//!
//! Sub-crates define their own error enums (`WorldError`, `MessageError`,
//! `SimError`) and either convert `CoreError` via `From` or wrap it as one
//! variant.  Recoverable in-tick failures are *not* errors — they travel as
//! `ActionResult` values so the scheduler never unwinds mid-tick.

use thiserror::Error;

/// The top-level error type for `gw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `gw-core` fallible operations.
pub type CoreResult<T> = Result<T, CoreError>;
