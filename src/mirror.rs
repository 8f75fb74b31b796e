use crate::engine::MirrorStore;
use crate::error::{mirror_error, SyncResult};
use crate::models::CalendarEventRecord;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Mirror store backed by a JSON file.
///
/// Records are held in memory and the whole file is rewritten on every
/// mutation, so each add/update/remove is durable before it returns.
pub struct FileMirrorStore {
    path: PathBuf,
    records: Mutex<Vec<CalendarEventRecord>>,
}

impl FileMirrorStore {
    /// Open the store, loading existing records. A missing file is treated
    /// as an empty mirror.
    pub async fn open(path: impl AsRef<Path>) -> SyncResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| mirror_error(&format!("Failed to parse mirror file: {}", e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(mirror_error(&format!(
                    "Failed to read mirror file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    async fn persist(&self, records: &[CalendarEventRecord]) -> SyncResult<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json).await.map_err(|e| {
            mirror_error(&format!(
                "Failed to write mirror file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl MirrorStore for FileMirrorStore {
    async fn query_active_or_recurring(
        &self,
        horizon: NaiveDateTime,
    ) -> SyncResult<Vec<CalendarEventRecord>> {
        let records = self.records.lock().await;
        // Recurring records are always relevant; one-off records stay
        // relevant while they are still ongoing or upcoming
        Ok(records
            .iter()
            .filter(|r| r.is_recurring || r.end >= horizon)
            .cloned()
            .collect())
    }

    async fn add(&self, record: &CalendarEventRecord) -> SyncResult<()> {
        let mut records = self.records.lock().await;
        if records
            .iter()
            .any(|r| r.calendar_uid == record.calendar_uid)
        {
            return Err(mirror_error(&format!(
                "Duplicate calendar uid: {}",
                record.calendar_uid
            )));
        }
        records.push(record.clone());
        self.persist(&records).await
    }

    async fn update(&self, record: &CalendarEventRecord) -> SyncResult<()> {
        let mut records = self.records.lock().await;
        let existing = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| mirror_error(&format!("No record with id {}", record.id)))?;
        *existing = record.clone();
        self.persist(&records).await
    }

    async fn remove(&self, record: &CalendarEventRecord) -> SyncResult<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.id != record.id);
        if records.len() == before {
            return Err(mirror_error(&format!("No record with id {}", record.id)));
        }
        self.persist(&records).await
    }
}
