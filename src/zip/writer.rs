//! Single-pass ZIP archive encoder.
//!
//! Records are emitted strictly in order:
//! 1. For each entry: Local File Header, name, payload
//! 2. For each entry: Central Directory Header, name
//! 3. End of Central Directory record
//!
//! Offsets are taken from the length-tracking [`CountingWriter`] as each
//! record is emitted and cross-checked against the [`ArchiveLayout`]
//! computed up front, so the sink never needs to seek.

use std::io::{self, Write};

use tracing::debug;

use super::error::{Result, ZipError};
use super::layout::ArchiveLayout;
use super::structures::{
    CentralDirectoryHeader, EndOfCentralDirectory, LocalFileHeader, ZipEntry,
};

/// A [`Write`] adapter that counts the bytes passed through it.
pub struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Bytes accepted by the inner writer so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Offsets observed while writing an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub entries: u16,
    pub local_offsets: Vec<u32>,
    pub cd_offset: u32,
    pub cd_size: u32,
    pub eocd_offset: u32,
    pub total_len: u64,
}

/// Writes stored ZIP archives to any [`Write`] sink.
///
/// ## Example
///
/// ```
/// use minzip::zip::{ZipEntry, ZipWriter};
///
/// let entry = ZipEntry::new("hello.txt", "Hello, ZIP!")?;
/// let mut writer = ZipWriter::new(Vec::new());
/// let summary = writer.write_archive(&[entry])?;
/// assert_eq!(summary.cd_offset, 50);
/// assert_eq!(writer.into_inner().len(), 127);
/// # Ok::<(), minzip::zip::ZipError>(())
/// ```
pub struct ZipWriter<W: Write> {
    sink: CountingWriter<W>,
}

impl<W: Write> ZipWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: CountingWriter::new(sink),
        }
    }

    /// Encode `entries` as one complete archive.
    ///
    /// All format limits are checked before the first write. Offsets are
    /// relative to the sink position when this is called.
    ///
    /// # Errors
    ///
    /// Returns [`ZipError::TooManyEntries`] or [`ZipError::ArchiveTooLarge`]
    /// without writing anything, or [`ZipError::Io`] if the sink fails.
    pub fn write_archive(&mut self, entries: &[ZipEntry]) -> Result<ArchiveSummary> {
        let layout = ArchiveLayout::plan(entries)?;
        let base = self.sink.written();

        let mut local_headers = Vec::with_capacity(entries.len());
        let mut local_offsets = Vec::with_capacity(entries.len());

        for (entry, &expected) in entries.iter().zip(&layout.local_offsets) {
            let offset = self.position(base, "local header offset", expected)?;
            let header = LocalFileHeader::for_entry(entry);

            header.write_to(&mut self.sink)?;
            self.sink.write_all(entry.name())?;
            self.sink.write_all(entry.data())?;

            debug!(
                name = %String::from_utf8_lossy(entry.name()),
                offset,
                size = entry.size(),
                crc32 = %format!("{:#010x}", entry.crc32()),
                "wrote local file header"
            );

            local_headers.push(header);
            local_offsets.push(offset);
        }

        let cd_offset = self.position(base, "central directory offset", layout.cd_offset)?;

        for ((entry, header), &offset) in entries.iter().zip(&local_headers).zip(&local_offsets) {
            CentralDirectoryHeader::from_local(header, offset).write_to(&mut self.sink)?;
            self.sink.write_all(entry.name())?;
        }

        let eocd_offset = self.position(base, "end of central directory offset", layout.eocd_offset)?;
        let cd_size = eocd_offset - cd_offset;
        debug!(cd_offset, cd_size, "wrote central directory");

        EndOfCentralDirectory::new(layout.entry_count(), cd_size, cd_offset)
            .write_to(&mut self.sink)?;
        self.sink.flush()?;

        Ok(ArchiveSummary {
            entries: layout.entry_count(),
            local_offsets,
            cd_offset,
            cd_size,
            eocd_offset,
            total_len: self.sink.written() - base,
        })
    }

    /// Total bytes written to the sink through this writer.
    pub fn bytes_written(&self) -> u64 {
        self.sink.written()
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    /// Current archive-relative position, which must match the planned offset.
    fn position(&self, base: u64, field: &'static str, expected: u32) -> Result<u32> {
        let actual = self.sink.written() - base;
        if actual != expected as u64 {
            return Err(ZipError::LayoutMismatch {
                field,
                expected: expected as u64,
                actual,
            });
        }
        Ok(expected)
    }
}

/// Encode `entries` into an in-memory archive.
pub fn encode_to_vec(entries: &[ZipEntry]) -> Result<Vec<u8>> {
    let layout = ArchiveLayout::plan(entries)?;
    let mut writer = ZipWriter::new(Vec::with_capacity(layout.total_len as usize));
    writer.write_archive(entries)?;
    Ok(writer.into_inner())
}
