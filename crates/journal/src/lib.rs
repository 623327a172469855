//! Event journal - JSON-lines log of board events
//!
//! The game loop is synchronous; the journal owns a small tokio runtime and a
//! writer task fed through an unbounded channel, so recording an event never
//! blocks a frame.
//!
//! Enabled by `MATCH3_LOG_PATH`; `MATCH3_LOG_DISABLED=1` turns it off.

pub mod config;
pub mod protocol;
pub mod writer;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use tui_match3_types as types;

pub use config::JournalConfig;
pub use protocol::{CellRef, JournalRecord, PieceRecord, RecordBody};
pub use writer::run_writer;

use types::BoardEvent;

/// Running journal instance.
pub struct Journal {
    rt: Runtime,
    tx: mpsc::UnboundedSender<JournalRecord>,
    task: JoinHandle<Result<u64>>,
    seq: u64,
}

impl Journal {
    /// Start from environment variables.
    ///
    /// Returns `Ok(None)` when no path is configured or the journal is disabled.
    pub fn start_from_env() -> Result<Option<Self>> {
        let config = JournalConfig::from_env();
        match config.enabled_path() {
            Some(path) => Self::start(path.clone()).map(Some),
            None => Ok(None),
        }
    }

    pub fn start(path: PathBuf) -> Result<Self> {
        let rt = Runtime::new().context("creating journal runtime")?;
        let (tx, rx) = mpsc::unbounded_channel::<JournalRecord>();
        let task = rt.spawn(run_writer(path, rx));
        Ok(Self { rt, tx, task, seq: 0 })
    }

    /// Records sent so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, event: &BoardEvent) {
        self.send(event.into());
    }

    pub fn record_all<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a BoardEvent>,
    {
        for e in events {
            self.record(e);
        }
    }

    pub fn session(&mut self, seed: u32, free_swap: bool) {
        self.send(RecordBody::Session { seed, free_swap });
    }

    pub fn restart(&mut self, episode: u32) {
        self.send(RecordBody::Restart { episode });
    }

    fn send(&mut self, body: RecordBody) {
        self.seq += 1;
        let record = JournalRecord {
            seq: self.seq,
            ts: now_ms(),
            body,
        };
        // The writer may have stopped on an I/O error; the game goes on.
        let _ = self.tx.send(record);
    }

    /// Close the channel and wait for the writer to flush.
    ///
    /// Returns the number of lines written.
    pub fn shutdown(self) -> Result<u64> {
        let Journal { rt, tx, task, .. } = self;
        drop(tx);
        rt.block_on(task).context("journal writer panicked")?
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
