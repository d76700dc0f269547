use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result as AnyResult, bail};

use super::crc32;
use super::error::{Result, ZipError};

/// Version needed to extract / version made by: 2.0, the baseline for stored entries.
pub const ZIP_VERSION: u16 = 20;

/// Compression method 0: payload bytes are written verbatim.
pub const METHOD_STORED: u16 = 0;

/// Placeholder DOS time and date. No real timestamps are recorded, which
/// keeps the output byte-identical across runs.
pub const DOS_TIME_PLACEHOLDER: u16 = 0;
pub const DOS_DATE_PLACEHOLDER: u16 = 0;

/// Local File Header (LFH) - 30 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileHeader {
    pub version_needed: u16,
    pub flags: u16,
    pub compression: u16,
    pub mod_time: u16,
    pub mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_len: u16,
    pub extra_len: u16,
}

impl LocalFileHeader {
    pub const SIGNATURE: &'static [u8] = b"PK\x03\x04";
    pub const SIZE: usize = 30;

    /// Header for a stored entry.
    pub fn for_entry(entry: &ZipEntry) -> Self {
        Self {
            version_needed: ZIP_VERSION,
            flags: 0,
            compression: METHOD_STORED,
            mod_time: DOS_TIME_PLACEHOLDER,
            mod_date: DOS_DATE_PLACEHOLDER,
            crc32: entry.crc32(),
            compressed_size: entry.size(),
            uncompressed_size: entry.size(),
            file_name_len: entry.name_len(),
            extra_len: 0,
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(Self::SIGNATURE)?;
        w.write_u16::<LittleEndian>(self.version_needed)?;
        w.write_u16::<LittleEndian>(self.flags)?;
        w.write_u16::<LittleEndian>(self.compression)?;
        w.write_u16::<LittleEndian>(self.mod_time)?;
        w.write_u16::<LittleEndian>(self.mod_date)?;
        w.write_u32::<LittleEndian>(self.crc32)?;
        w.write_u32::<LittleEndian>(self.compressed_size)?;
        w.write_u32::<LittleEndian>(self.uncompressed_size)?;
        w.write_u16::<LittleEndian>(self.file_name_len)?;
        w.write_u16::<LittleEndian>(self.extra_len)?;
        Ok(())
    }
}

/// Central Directory File Header (CDFH) - 46 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralDirectoryHeader {
    pub version_made_by: u16,
    pub version_needed: u16,
    pub flags: u16,
    pub compression: u16,
    pub mod_time: u16,
    pub mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_len: u16,
    pub extra_len: u16,
    pub comment_len: u16,
    pub disk_number_start: u16,
    pub internal_attrs: u16,
    pub external_attrs: u32,
    pub lfh_offset: u32,
}

impl CentralDirectoryHeader {
    pub const SIGNATURE: &'static [u8] = b"PK\x01\x02";
    pub const SIZE: usize = 46;

    /// Directory record mirroring `local`, pointing back at `lfh_offset`.
    pub fn from_local(local: &LocalFileHeader, lfh_offset: u32) -> Self {
        Self {
            version_made_by: ZIP_VERSION,
            version_needed: local.version_needed,
            flags: local.flags,
            compression: local.compression,
            mod_time: local.mod_time,
            mod_date: local.mod_date,
            crc32: local.crc32,
            compressed_size: local.compressed_size,
            uncompressed_size: local.uncompressed_size,
            file_name_len: local.file_name_len,
            extra_len: 0,
            comment_len: 0,
            disk_number_start: 0,
            internal_attrs: 0,
            external_attrs: 0,
            lfh_offset,
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(Self::SIGNATURE)?;
        w.write_u16::<LittleEndian>(self.version_made_by)?;
        w.write_u16::<LittleEndian>(self.version_needed)?;
        w.write_u16::<LittleEndian>(self.flags)?;
        w.write_u16::<LittleEndian>(self.compression)?;
        w.write_u16::<LittleEndian>(self.mod_time)?;
        w.write_u16::<LittleEndian>(self.mod_date)?;
        w.write_u32::<LittleEndian>(self.crc32)?;
        w.write_u32::<LittleEndian>(self.compressed_size)?;
        w.write_u32::<LittleEndian>(self.uncompressed_size)?;
        w.write_u16::<LittleEndian>(self.file_name_len)?;
        w.write_u16::<LittleEndian>(self.extra_len)?;
        w.write_u16::<LittleEndian>(self.comment_len)?;
        w.write_u16::<LittleEndian>(self.disk_number_start)?;
        w.write_u16::<LittleEndian>(self.internal_attrs)?;
        w.write_u32::<LittleEndian>(self.external_attrs)?;
        w.write_u32::<LittleEndian>(self.lfh_offset)?;
        Ok(())
    }
}

/// End of Central Directory (EOCD) - 22 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    /// Single-disk trailer without a comment.
    pub fn new(entries: u16, cd_size: u32, cd_offset: u32) -> Self {
        Self {
            disk_number: 0,
            disk_with_cd: 0,
            disk_entries: entries,
            total_entries: entries,
            cd_size,
            cd_offset,
            comment_len: 0,
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(Self::SIGNATURE)?;
        w.write_u16::<LittleEndian>(self.disk_number)?;
        w.write_u16::<LittleEndian>(self.disk_with_cd)?;
        w.write_u16::<LittleEndian>(self.disk_entries)?;
        w.write_u16::<LittleEndian>(self.total_entries)?;
        w.write_u32::<LittleEndian>(self.cd_size)?;
        w.write_u32::<LittleEndian>(self.cd_offset)?;
        w.write_u16::<LittleEndian>(self.comment_len)?;
        Ok(())
    }
}

/// One file to be archived.
///
/// The checksum is computed once at construction; the entry cannot be
/// mutated afterwards, so the header fields derived from it always agree
/// with the bytes that get written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    name: Vec<u8>,
    data: Vec<u8>,
    crc32: u32,
}

impl ZipEntry {
    /// Create an entry, rejecting names or payloads over 65535 bytes.
    pub fn new(name: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Result<Self> {
        let name = name.into();
        let data = data.into();

        if name.len() > u16::MAX as usize {
            return Err(ZipError::NameTooLong {
                len: name.len() as u64,
            });
        }
        if data.len() > u16::MAX as usize {
            return Err(ZipError::PayloadTooLarge {
                len: data.len() as u64,
            });
        }

        let crc32 = crc32::checksum(&data);
        Ok(Self { name, data, crc32 })
    }

    /// Read a file from disk, naming the entry after its final path component.
    ///
    /// The name keeps the raw bytes of the file name, even when they are not UTF-8.
    pub async fn from_path(path: &Path) -> AnyResult<Self> {
        let Some(file_name) = path.file_name() else {
            bail!("No file name in path: {}", path.display());
        };
        let name = file_name.as_encoded_bytes().to_vec();

        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::new(name, data).with_context(|| format!("Cannot archive {}", path.display()))
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Payload length; compressed and uncompressed sizes are equal for stored entries.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn name_len(&self) -> u16 {
        self.name.len() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<F: Fn(&mut Vec<u8>) -> io::Result<()>>(f: F) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_entry_metadata() {
        let entry = ZipEntry::new("hello.txt", "Hello, ZIP!").unwrap();
        assert_eq!(entry.name(), b"hello.txt");
        assert_eq!(entry.data(), b"Hello, ZIP!");
        assert_eq!(entry.name_len(), 9);
        assert_eq!(entry.size(), 11);
        assert_eq!(entry.crc32(), crc32::checksum(b"Hello, ZIP!"));
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"some notes").unwrap();

        let entry = ZipEntry::from_path(&path).await.unwrap();
        assert_eq!(entry.name(), b"notes.txt");
        assert_eq!(entry.data(), b"some notes");
        assert_eq!(entry.crc32(), crc32::checksum(b"some notes"));

        assert!(ZipEntry::from_path(&dir.path().join("missing")).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_from_path_keeps_raw_name_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = b"caf\xe9.txt";
        let path = dir.path().join(OsStr::from_bytes(raw));
        if std::fs::write(&path, b"x").is_err() {
            // Filesystem only accepts UTF-8 names
            return;
        }

        let entry = ZipEntry::from_path(&path).await.unwrap();
        assert_eq!(entry.name(), raw);
    }

    #[test]
    fn test_entry_limits() {
        assert!(ZipEntry::new(vec![b'a'; 65535], Vec::new()).is_ok());
        assert!(matches!(
            ZipEntry::new(vec![b'a'; 65536], Vec::new()),
            Err(ZipError::NameTooLong { len: 65536 })
        ));
        assert!(ZipEntry::new("a", vec![0u8; 65535]).is_ok());
        assert!(matches!(
            ZipEntry::new("a", vec![0u8; 65536]),
            Err(ZipError::PayloadTooLarge { len: 65536 })
        ));
    }

    #[test]
    fn test_local_header_layout() {
        let entry = ZipEntry::new("hello.txt", "Hello, ZIP!").unwrap();
        let header = LocalFileHeader::for_entry(&entry);
        let bytes = encode(|b| header.write_to(b));

        assert_eq!(bytes.len(), LocalFileHeader::SIZE);
        assert_eq!(&bytes[0..4], &[0x50, 0x4B, 0x03, 0x04]);
        assert_eq!(&bytes[4..6], &[20, 0]);
        assert_eq!(&bytes[8..10], &[0, 0]);
        assert_eq!(&bytes[14..18], &entry.crc32().to_le_bytes());
        assert_eq!(&bytes[18..22], &[11, 0, 0, 0]);
        assert_eq!(&bytes[22..26], &[11, 0, 0, 0]);
        assert_eq!(&bytes[26..28], &[9, 0]);
        assert_eq!(&bytes[28..30], &[0, 0]);
    }

    #[test]
    fn test_central_header_layout() {
        let entry = ZipEntry::new("a.bin", vec![1u8; 300]).unwrap();
        let local = LocalFileHeader::for_entry(&entry);
        let header = CentralDirectoryHeader::from_local(&local, 0x0102_0304);
        let bytes = encode(|b| header.write_to(b));

        assert_eq!(bytes.len(), CentralDirectoryHeader::SIZE);
        assert_eq!(&bytes[0..4], b"PK\x01\x02");
        assert_eq!(&bytes[4..6], &[20, 0]);
        assert_eq!(&bytes[6..8], &[20, 0]);
        assert_eq!(&bytes[16..20], &entry.crc32().to_le_bytes());
        assert_eq!(&bytes[20..24], &[0x2C, 0x01, 0, 0]);
        assert_eq!(&bytes[24..28], &[0x2C, 0x01, 0, 0]);
        assert_eq!(&bytes[28..30], &[5, 0]);
        assert_eq!(&bytes[30..42], &[0u8; 12]);
        assert_eq!(&bytes[42..46], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_eocd_layout() {
        let eocd = EndOfCentralDirectory::new(1, 55, 50);
        let bytes = encode(|b| eocd.write_to(b));

        assert_eq!(bytes.len(), EndOfCentralDirectory::SIZE);
        assert_eq!(
            bytes,
            [
                0x50, 0x4B, 0x05, 0x06, 0, 0, 0, 0, 1, 0, 1, 0, 55, 0, 0, 0, 50, 0, 0, 0, 0, 0
            ]
        );
    }
}
