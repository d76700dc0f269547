mod local;
mod stdout;

pub use local::LocalFileSink;
pub use stdout::StdoutSink;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for an append-only destination of archive bytes
#[async_trait]
pub trait ArchiveSink: Send {
    /// Append all of `buf` to the destination
    async fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Make the written bytes durable and visible. Nothing written before
    /// a successful commit may be treated as a valid archive.
    async fn commit(&mut self) -> Result<()>;

    /// Total bytes accepted so far
    fn bytes_written(&self) -> u64;
}
