//! Main entry point for the minzip CLI application.
//!
//! Builds the archive in memory, then hands the bytes to either a local
//! file sink or stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use minzip::{ArchiveSink, Cli, LocalFileSink, StdoutSink, ZipEntry, ZipWriter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let entries = collect_entries(&cli).await?;

    // Encode fully before touching the output, so format errors never
    // create a file.
    let mut writer = ZipWriter::new(Vec::new());
    let summary = writer
        .write_archive(&entries)
        .context("Failed to encode archive")?;
    let archive = writer.into_inner();

    let mut sink: Box<dyn ArchiveSink> = if cli.pipe {
        Box::new(StdoutSink::new())
    } else {
        Box::new(LocalFileSink::create(&cli.output, cli.overwrite).await?)
    };
    sink.write_all(&archive).await?;
    sink.commit().await?;

    info!(
        entries = summary.entries,
        cd_offset = summary.cd_offset,
        cd_size = summary.cd_size,
        bytes = sink.bytes_written(),
        "archive written"
    );

    if !cli.is_quiet() {
        println!("Created {} successfully!", cli.output.display());
    }

    Ok(())
}

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the CLI flags.
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Entries to archive: files named by `-a`, or the built-in entry.
async fn collect_entries(cli: &Cli) -> Result<Vec<ZipEntry>> {
    if cli.add.is_empty() {
        let entry = ZipEntry::new(cli.name.as_bytes(), cli.data.as_bytes())
            .with_context(|| format!("Cannot archive entry {}", cli.name))?;
        return Ok(vec![entry]);
    }

    let mut entries = Vec::with_capacity(cli.add.len());
    let mut seen = HashSet::new();

    for path in &cli.add {
        let entry = ZipEntry::from_path(path).await?;
        if !seen.insert(entry.name().to_vec()) {
            warn!(
                name = %String::from_utf8_lossy(entry.name()),
                "duplicate entry name in archive"
            );
        }
        if !cli.is_quiet() {
            println!("  adding: {}", path.display());
        }
        entries.push(entry);
    }

    Ok(entries)
}
