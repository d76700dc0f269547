//! # minzip
//!
//! A minimal ZIP archive writer.
//!
//! This library encodes entries into a structurally valid ZIP archive using
//! the STORED method: payloads are written verbatim, each protected by a
//! CRC-32 checksum. The encoder is a single forward pass; every offset the
//! format needs is computed from entry lengths before the first byte is
//! written, so the output can go to any append-only sink.
//!
//! ## Features
//!
//! - Byte-exact Local File Header, Central Directory Header and EOCD records
//! - Format limits (16-bit lengths and counts, 32-bit offsets) checked up front
//! - Deterministic output: no timestamps, identical input gives identical bytes
//! - Atomic file output: a failed write never leaves a file claiming success
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use minzip::{ArchiveSink, LocalFileSink, ZipEntry, encode_to_vec};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let entry = ZipEntry::new("hello.txt", "Hello, ZIP!")?;
//!     let archive = encode_to_vec(&[entry])?;
//!
//!     let mut sink = LocalFileSink::create(Path::new("minimal.zip"), true).await?;
//!     sink.write_all(&archive).await?;
//!     sink.commit().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use io::{ArchiveSink, LocalFileSink, StdoutSink};
pub use zip::{ZipEntry, ZipError, ZipWriter, encode_to_vec};
