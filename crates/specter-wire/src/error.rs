//! Error types for the SPECTER wire codec.

use thiserror::Error;

/// Wire codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Buffer cannot hold the field being read or written
    #[error("buffer too small: need {needed} bytes, have {actual}")]
    BufferTooSmall {
        /// Bytes the operation needs the buffer to hold
        needed: usize,
        /// Bytes the buffer actually holds
        actual: usize,
    },

    /// Value too wide for any flag encoding
    #[error("unsupported field width: {width} bytes")]
    UnsupportedWidth {
        /// Natural width of the rejected value
        width: usize,
    },

    /// Flag bits with no defined decoding
    #[error("unrecognized flag combination: 0x{bits:02X}")]
    UnrecognizedFlags {
        /// The offending bits
        bits: u8,
    },
}
