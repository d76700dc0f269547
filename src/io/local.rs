use super::ArchiveSink;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Local file sink with all-or-nothing semantics.
///
/// Bytes go to a sibling `<name>.partial` file which is renamed over the
/// target only on [`commit`](ArchiveSink::commit). If the sink is dropped
/// before that, the partial file is removed and the target is untouched.
pub struct LocalFileSink {
    target: PathBuf,
    partial: PathBuf,
    file: Option<File>,
    written: u64,
    committed: bool,
}

impl LocalFileSink {
    pub async fn create(path: &Path, overwrite: bool) -> Result<Self> {
        let Some(file_name) = path.file_name() else {
            bail!("Invalid output path: {}", path.display());
        };

        let exists = fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to check {}", path.display()))?;
        if !overwrite && exists {
            bail!("{} already exists (use -o to overwrite)", path.display());
        }

        let mut partial_name = file_name.to_os_string();
        partial_name.push(".partial");
        let partial = path.with_file_name(partial_name);

        // Never clobber a file we did not create; it would be deleted on drop
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&partial)
            .await
            .with_context(|| format!("Failed to create {}", partial.display()))?;
        debug!(path = %partial.display(), "opened partial archive");

        Ok(Self {
            target: path.to_path_buf(),
            partial,
            file: Some(file),
            written: 0,
            committed: false,
        })
    }
}

#[async_trait]
impl ArchiveSink for LocalFileSink {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            bail!("Archive {} already committed", self.target.display());
        };
        file.write_all(buf)
            .await
            .with_context(|| format!("Failed to write {}", self.partial.display()))?;
        self.written += buf.len() as u64;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let Some(mut file) = self.file.take() else {
            bail!("Archive {} already committed", self.target.display());
        };
        file.flush().await?;
        file.sync_all()
            .await
            .with_context(|| format!("Failed to sync {}", self.partial.display()))?;
        drop(file);

        fs::rename(&self.partial, &self.target)
            .await
            .with_context(|| format!("Failed to move archive into {}", self.target.display()))?;
        self.committed = true;
        Ok(())
    }

    fn bytes_written(&self) -> u64 {
        self.written
    }
}

impl Drop for LocalFileSink {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Close the handle first so removal also works on Windows
        self.file.take();
        if let Err(e) = std::fs::remove_file(&self.partial) {
            warn!(path = %self.partial.display(), "failed to remove partial archive: {e}");
        }
    }
}
