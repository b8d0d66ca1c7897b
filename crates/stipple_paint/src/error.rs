//! Context errors

use stipple_core::Status;
use thiserror::Error;

/// Drawing context errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// Non-success status reported by the backend, surfaced verbatim
    #[error(transparent)]
    Backend(#[from] Status),

    #[error("restore() without matching save()")]
    InvalidRestore,

    #[error("end_transparency_layer() without matching begin_transparency_layer()")]
    UnbalancedTransparencyLayer,
}

pub type Result<T> = std::result::Result<T, ContextError>;
