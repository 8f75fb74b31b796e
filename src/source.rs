use crate::engine::SourceEventReader;
use crate::error::{source_error, SyncResult};
use crate::models::SourceEvent;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Source calendar reader backed by a JSON export file.
///
/// The file holds the full event list as a JSON array; the reader applies
/// the sync window and ordering on every read so a pass always sees the
/// current file contents.
pub struct FileSourceReader {
    path: PathBuf,
}

impl FileSourceReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SourceEventReader for FileSourceReader {
    async fn list_upcoming(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> SyncResult<Vec<SourceEvent>> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            source_error(&format!(
                "Failed to read source events from {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut events: Vec<SourceEvent> = serde_json::from_str(&content)
            .map_err(|e| source_error(&format!("Failed to parse source events: {}", e)))?;

        events.retain(|event| event.start >= window_start && event.end <= window_end);
        events.sort_by_key(|event| event.start);

        Ok(events)
    }
}
