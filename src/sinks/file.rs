//! # Append-only JSON Lines completion log.
//!
//! [`JsonlSink`] writes one JSON object per completed event, newline
//! terminated, to a file that is created on first write. The format is
//! greppable and trivially re-parseable with [`ScheduledEvent`]'s serde
//! implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::SinkError;
use crate::events::ScheduledEvent;
use crate::sinks::CompletionSink;

/// File-backed completion sink, one JSON line per event.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Creates a sink appending to `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CompletionSink for JsonlSink {
    async fn record(&self, event: &ScheduledEvent) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventId, EventStatus};
    use chrono::{TimeDelta, Utc};

    fn completed_event(title: &str) -> ScheduledEvent {
        ScheduledEvent {
            id: EventId::new(),
            title: title.into(),
            description: "logged".into(),
            scheduled_time: Utc::now() - TimeDelta::minutes(1),
            status: EventStatus::Completed,
        }
    }

    #[tokio::test]
    async fn record_appends_one_json_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("completed_events.log");
        let sink = JsonlSink::new(&path);

        let first = completed_event("standup");
        let second = completed_event("retro");
        sink.record(&first).await.unwrap();
        sink.record(&second).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let back: ScheduledEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(back, first);
        let back: ScheduledEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(back, second);
    }

    #[tokio::test]
    async fn record_surfaces_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        // A directory path is not writable as a file.
        let sink = JsonlSink::new(dir.path());

        let err = sink.record(&completed_event("standup")).await.unwrap_err();
        assert_eq!(err.as_label(), "sink_io");
    }
}
