//! Offset bookkeeping for an archive, computed before anything is written.
//!
//! Every size in a stored archive follows from name and payload lengths, so
//! the whole layout can be derived by arithmetic alone. This lets the writer
//! reject archives whose offsets would overflow their 32-bit fields without
//! emitting a single byte, and emit strictly forward to a non-seekable sink.

use super::error::{Result, ZipError};
use super::structures::{
    CentralDirectoryHeader, EndOfCentralDirectory, LocalFileHeader, ZipEntry,
};

/// Byte positions of every record in an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Start of each entry's Local File Header, in entry order.
    pub local_offsets: Vec<u32>,
    /// Start of the first Central Directory Header.
    pub cd_offset: u32,
    /// Length of all Central Directory Headers including their names.
    pub cd_size: u32,
    /// Start of the End of Central Directory record.
    pub eocd_offset: u32,
    /// Total archive length.
    pub total_len: u64,
}

impl ArchiveLayout {
    /// Compute the layout for `entries`, validating the 16 and 32-bit limits.
    pub fn plan(entries: &[ZipEntry]) -> Result<Self> {
        Self::from_lengths(
            entries
                .iter()
                .map(|e| (e.name().len() as u64, e.data().len() as u64)),
        )
    }

    /// Compute the layout from `(name_len, data_len)` pairs in entry order.
    ///
    /// Lengths are bounds-checked before they are summed, so the running
    /// position stays far below `u64::MAX`.
    pub fn from_lengths<I>(lengths: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let lengths: Vec<(u64, u64)> = lengths.into_iter().collect();
        if lengths.len() > u16::MAX as usize {
            return Err(ZipError::TooManyEntries(lengths.len()));
        }

        let mut local_offsets = Vec::with_capacity(lengths.len());
        let mut pos = 0u64;
        for &(name_len, data_len) in &lengths {
            if name_len > u16::MAX as u64 {
                return Err(ZipError::NameTooLong { len: name_len });
            }
            if data_len > u16::MAX as u64 {
                return Err(ZipError::PayloadTooLarge { len: data_len });
            }
            local_offsets.push(pos);
            pos += LocalFileHeader::SIZE as u64 + name_len + data_len;
        }

        let cd_offset = pos;
        for &(name_len, _) in &lengths {
            pos += CentralDirectoryHeader::SIZE as u64 + name_len;
        }

        let eocd_offset = pos;
        let total_len = eocd_offset + EndOfCentralDirectory::SIZE as u64;

        // Everything before the EOCD is addressed through 32-bit fields.
        if eocd_offset > u32::MAX as u64 {
            return Err(ZipError::ArchiveTooLarge(total_len));
        }

        Ok(Self {
            local_offsets: local_offsets.into_iter().map(|o| o as u32).collect(),
            cd_offset: cd_offset as u32,
            cd_size: (eocd_offset - cd_offset) as u32,
            eocd_offset: eocd_offset as u32,
            total_len,
        })
    }

    pub fn entry_count(&self) -> u16 {
        self.local_offsets.len() as u16
    }
}
