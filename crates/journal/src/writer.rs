//! Async JSON-lines writer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;

use crate::protocol::JournalRecord;

/// Append every record from `rx` to `path`, one JSON object per line.
///
/// Runs until the sender side is dropped, then flushes. Returns the number of
/// lines written. A write error ends the task; records still queued are lost.
pub async fn run_writer(path: PathBuf, mut rx: mpsc::UnboundedReceiver<JournalRecord>) -> Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let mut buf = Vec::with_capacity(256);
    let mut written = 0u64;
    while let Some(record) = rx.recv().await {
        buf.clear();
        serde_json::to_writer(&mut buf, &record)?;
        buf.push(b'\n');
        if out.write_all(&buf).await.is_err() {
            break;
        }
        written += 1;
        // Flush when the queue runs dry so the file stays tail-able.
        if rx.is_empty() && out.flush().await.is_err() {
            break;
        }
    }
    out.flush().await?;
    Ok(written)
}
