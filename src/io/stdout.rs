use super::ArchiveSink;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};

/// Writes the archive to standard output (pipe mode)
pub struct StdoutSink {
    stdout: Stdout,
    written: u64,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            stdout: tokio::io::stdout(),
            written: 0,
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveSink for StdoutSink {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.stdout.write_all(buf).await?;
        self.written += buf.len() as u64;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.stdout.flush().await?;
        Ok(())
    }

    fn bytes_written(&self) -> u64 {
        self.written
    }
}
