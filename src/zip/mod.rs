//! ZIP archive encoding.
//!
//! This module builds minimal, valid ZIP archives whose entries use the
//! STORED method (no compression).
//!
//! ## Architecture
//!
//! - [`crc32`]: CRC-32 checksum of entry payloads
//! - [`structures`]: the three fixed-size records and the [`ZipEntry`] data model
//! - [`layout`]: offset arithmetic and format limit checks, done before writing
//! - [`writer`]: single-pass emission into any [`std::io::Write`] sink
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers, each followed by the entry name and data
//! 2. Central Directory with one header (plus name) per entry
//! 3. End of Central Directory (EOCD) record at the end
//!
//! All integers are little-endian. Each central directory header points back
//! at its local header by absolute offset, and the EOCD records where the
//! central directory starts and how long it is.
//!
//! ## Limitations
//!
//! - STORED method only
//! - No ZIP64, encryption, multi-disk archives or comments
//! - Names and payloads are limited to 65535 bytes each

pub mod crc32;
mod error;
mod layout;
mod structures;
mod writer;

pub use error::{Result, ZipError};
pub use layout::ArchiveLayout;
pub use structures::*;
pub use writer::{ArchiveSummary, CountingWriter, ZipWriter, encode_to_vec};
