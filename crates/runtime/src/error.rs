//! Runtime error types.

use thornvale_core::CoreError;

use crate::save::SaveError;

/// Errors that abort the run loop.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("input source failed: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("battle setup failed: {0}")]
    Core(#[from] CoreError),
}
