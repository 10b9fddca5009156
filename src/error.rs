//! Error types for the city core.
//!
//! The mapping, picking and physics operations are total over well-formed
//! input and never return errors; [`CoreError`] exists for host-facing
//! configuration validation only.

use thiserror::Error;

/// Error type for configuration handed in by the host.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid layout rules: {field} = {value} ({reason})")]
    InvalidRules {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("invalid camera config: {field} = {value} ({reason})")]
    InvalidCamera {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
