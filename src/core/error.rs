//! Error types for the spatial renderer.

use thiserror::Error;

/// Errors reported while building or driving a [`SpatialEngine`](crate::spatial::engine::SpatialEngine).
///
/// Configuration variants are raised once, at construction. `ShapeMismatch` is
/// the only error a running engine can return, and it is raised before any
/// state is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// Only mono and stereo pan laws exist.
    #[error("unsupported channel count {0}: expected 1 or 2")]
    UnsupportedChannels(usize),

    #[error("invalid sample rate {0}: must be finite and > 0")]
    InvalidSampleRate(f32),

    #[error("invalid block length {0}: must be > 0")]
    InvalidBlockLength(usize),

    /// A delay line duration is non-positive or rounds down to zero samples.
    #[error("invalid {line} line duration {duration_ms} ms: must hold at least one sample")]
    InvalidLineDuration {
        /// Which line was rejected (`"distance"` or `"vertical"`).
        line: &'static str,
        /// The requested duration.
        duration_ms: f32,
    },

    /// The vertical line cannot hold the largest delay a polar angle can request.
    #[error("vertical line of {length} samples cannot hold a delay of {max_delay} samples")]
    VerticalLineTooShort {
        /// Line length in samples.
        length: usize,
        /// Largest delay the polar mapping produces, in samples.
        max_delay: usize,
    },

    /// A block did not have `channels * block_length` samples.
    #[error("block shape mismatch: expected {expected} samples, got {got}")]
    ShapeMismatch {
        /// The configured number of samples per block.
        expected: usize,
        /// The number of samples supplied.
        got: usize,
    },
}

/// Convenience Result type for spatial rendering operations.
pub type Result<T> = core::result::Result<T, SpatialError>;
