//! Error types for pipeline operations.

use edgeview_core::PixelFormat;
use thiserror::Error;

/// Error type for pipeline operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Buffer has the wrong channel count for a stage.
    #[error("channel mismatch: stage requires {expected}, buffer is {got}")]
    ChannelMismatch {
        /// Format the stage requires.
        expected: PixelFormat,
        /// Format the buffer actually has.
        got: PixelFormat,
    },

    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Buffer(#[from] edgeview_core::Error),
}

/// Result type for pipeline operations.
pub type OpsResult<T> = Result<T, OpsError>;
