//! Error types for archive encoding.

use thiserror::Error;

/// Errors that can occur while building a ZIP archive.
///
/// Every variant except [`ZipError::Io`] is detected before the first byte
/// reaches the sink.
#[derive(Debug, Error)]
pub enum ZipError {
    /// Entry name does not fit the 16-bit file name length field.
    #[error("entry name is {len} bytes, maximum is {max}", max = u16::MAX)]
    NameTooLong { len: u64 },

    /// Entry payload exceeds the supported 16-bit size bound.
    #[error("entry payload is {len} bytes, maximum is {max}", max = u16::MAX)]
    PayloadTooLarge { len: u64 },

    /// More entries than the 16-bit entry count fields can hold.
    #[error("archive has {0} entries, maximum is {max}", max = u16::MAX)]
    TooManyEntries(usize),

    /// An offset or size would not fit a 32-bit field (ZIP64 is not supported).
    #[error("archive would be {0} bytes, which needs ZIP64")]
    ArchiveTooLarge(u64),

    /// Observed sink position disagrees with the precomputed layout.
    ///
    /// Not reachable through [`ZipWriter`](super::ZipWriter), whose counting
    /// sink always advances by exactly the planned record lengths.
    #[error("{field} mismatch: expected {expected}, wrote at {actual}")]
    LayoutMismatch {
        field: &'static str,
        expected: u64,
        actual: u64,
    },

    /// The output sink rejected a write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for archive encoding.
pub type Result<T> = std::result::Result<T, ZipError>;
