use thiserror::Error;

use crate::data::model::SpectrumId;

/// Errors raised by peak and spectrum operations.
///
/// Every failing call returns before touching state, so a caller can retry
/// with corrected input without cleaning up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeakError {
    /// A coordinate or peak index was read or written past the end of its
    /// sequence.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The handle points at a spectrum that was released or never existed.
    #[error("unknown spectrum {0}")]
    UnknownSpectrum(SpectrumId),

    #[error("x has {x} values but y has {y}")]
    AxisLengthMismatch { x: usize, y: usize },
}

pub type Result<T> = std::result::Result<T, PeakError>;
