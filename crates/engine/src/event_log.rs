//! Structured session event log (JSON lines).
//!
//! Records are pushed through an unbounded channel to a writer task, so the
//! game loop never waits on disk. A disabled log drops everything, and write
//! failures stop the writer without touching the game.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    Started,
    Spawned { kind: PieceKind },
    Locked { lines_cleared: u32, score: u32 },
    LevelUp { level: u32, interval_ms: u32 },
    GameOver { score: u32, lines: u32, level: u32 },
    Restarted,
}

/// One line of the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Milliseconds since the Unix epoch.
    pub ts: u64,
    #[serde(flatten)]
    pub event: LogEvent,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<LogRecord>>,
}

impl EventLog {
    /// A log that discards every record.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Log into a channel; the caller owns the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LogRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Append records to `path`, one JSON object per line.
    ///
    /// The file is opened up front, so a bad path is reported here rather
    /// than swallowed by the writer. Must be called inside a tokio runtime.
    /// The returned task finishes once every clone of the log has been
    /// dropped and the backlog is written.
    pub async fn to_file(path: impl AsRef<Path>) -> anyhow::Result<(Self, JoinHandle<()>)> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        let (log, mut rx) = Self::channel();

        let handle = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(256);

            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Ok((log, handle))
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn record(&self, event: LogEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        // A closed writer just means logging stopped.
        let _ = tx.send(LogRecord {
            ts: current_timestamp_ms(),
            event,
        });
    }
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
