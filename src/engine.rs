use crate::error::{Error, SyncResult};
use crate::models::{
    CalendarEventRecord, EventDateTime, RemoteEventPayload, SourceEvent,
};
use crate::recurrence;
use chrono::{Duration, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::{info, warn};

/// Reads the current window of events from the authoritative source calendar
#[async_trait]
pub trait SourceEventReader: Send + Sync {
    /// List events starting within the window, ordered by start time
    async fn list_upcoming(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> SyncResult<Vec<SourceEvent>>;
}

/// CRUD over mirrored event records; every mutation persists immediately
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Records that are recurring or still end on/after the given horizon
    async fn query_active_or_recurring(
        &self,
        horizon: NaiveDateTime,
    ) -> SyncResult<Vec<CalendarEventRecord>>;

    async fn add(&self, record: &CalendarEventRecord) -> SyncResult<()>;
    async fn update(&self, record: &CalendarEventRecord) -> SyncResult<()>;
    async fn remove(&self, record: &CalendarEventRecord) -> SyncResult<()>;
}

/// Create/update/delete of events on the remote calendar service
#[async_trait]
pub trait RemoteCalendarClient: Send + Sync {
    /// Create an event, returning the identifier assigned by the service
    async fn create(&self, payload: &RemoteEventPayload) -> SyncResult<String>;
    async fn update(&self, remote_id: &str, payload: &RemoteEventPayload) -> SyncResult<()>;
    async fn delete(&self, remote_id: &str) -> SyncResult<()>;
}

/// Action the engine took (or attempted) for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
    Deleted,
}

/// Outcome of processing a single event within one sync pass
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub calendar_uid: String,
    pub summary: String,
    pub action: SyncAction,
    /// Failure reason, `None` when the action was applied successfully
    pub error: Option<String>,
}

impl EventOutcome {
    fn applied(calendar_uid: &str, summary: &str, action: SyncAction) -> Self {
        Self {
            calendar_uid: calendar_uid.to_string(),
            summary: summary.to_string(),
            action,
            error: None,
        }
    }

    fn failed(calendar_uid: &str, summary: &str, action: SyncAction, error: &Error) -> Self {
        Self {
            calendar_uid: calendar_uid.to_string(),
            summary: summary.to_string(),
            action,
            error: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-event outcomes of one sync pass
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub outcomes: Vec<EventOutcome>,
}

impl SyncReport {
    fn count(&self, action: SyncAction) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action == action && !o.is_failure())
            .count()
    }

    pub fn created(&self) -> usize {
        self.count(SyncAction::Created)
    }

    pub fn updated(&self) -> usize {
        self.count(SyncAction::Updated)
    }

    pub fn deleted(&self) -> usize {
        self.count(SyncAction::Deleted)
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// True when the pass changed nothing and nothing failed
    pub fn is_noop(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted, {} failed",
            self.created(),
            self.updated(),
            self.deleted(),
            self.failed()
        )
    }
}

/// Build the remote payload for a source event.
///
/// Start and end are sent as wall-clock times with the configured timezone
/// attached. A recurrence rule is attached only when the event is recurring
/// and the pattern translates to a non-empty rule.
pub fn build_payload(event: &SourceEvent, timezone: Tz) -> RemoteEventPayload {
    let recurrence = if event.is_recurring {
        event
            .recurrence
            .as_ref()
            .map(recurrence::translate)
            .filter(|rule| !rule.is_empty())
            .map(|rule| vec![rule])
    } else {
        None
    };

    RemoteEventPayload {
        summary: event.summary.clone(),
        description: event.description.clone(),
        start: EventDateTime {
            date_time: event.start,
            time_zone: timezone.name().to_string(),
        },
        end: EventDateTime {
            date_time: event.end,
            time_zone: timezone.name().to_string(),
        },
        recurrence,
        status: event.busy.remote_status().map(str::to_string),
        transparency: event.busy.transparency().to_string(),
    }
}

/// Drives one sync pass: diffs source events against the mirror and applies
/// the minimal create/update/delete set to the remote calendar
pub struct ReconciliationEngine {
    source: Arc<dyn SourceEventReader>,
    mirror: Arc<dyn MirrorStore>,
    remote: Arc<dyn RemoteCalendarClient>,
    timezone: Tz,
}

impl ReconciliationEngine {
    pub fn new(
        source: Arc<dyn SourceEventReader>,
        mirror: Arc<dyn MirrorStore>,
        remote: Arc<dyn RemoteCalendarClient>,
        timezone: Tz,
    ) -> Self {
        Self {
            source,
            mirror,
            remote,
            timezone,
        }
    }

    /// Run one sync pass.
    ///
    /// Only the two initial bulk reads are fatal; every per-event failure is
    /// recorded in the report and the pass continues with the next event. An
    /// event that failed is retried naturally on the next pass because its
    /// source/mirror mismatch persists.
    pub async fn sync(&self) -> SyncResult<SyncReport> {
        let today = Utc::now()
            .with_timezone(&self.timezone)
            .date_naive()
            .and_time(NaiveTime::MIN);
        let window_end = today + Duration::days(365);

        // Load the current events from the source calendar
        let events = self.source.list_upcoming(today, window_end).await?;
        info!("Loaded {} events from the source calendar", events.len());

        // Load the still-relevant records from the mirror
        let records = self.mirror.query_active_or_recurring(today).await?;
        info!("Loaded {} records from the mirror", records.len());

        let mut records_by_uid: HashMap<String, CalendarEventRecord> = records
            .into_iter()
            .map(|record| (record.calendar_uid.clone(), record))
            .collect();

        let mut report = SyncReport::default();

        for event in &events {
            // Removing the key marks the record as accounted for, whether or
            // not an update turns out to be needed
            match records_by_uid.remove(&event.uid) {
                Some(record) if record.differs_from(event) => {
                    info!("Updating event {}", event.summary);
                    let outcome = match self.update_event(event, &record).await {
                        Ok(()) => EventOutcome::applied(&event.uid, &event.summary, SyncAction::Updated),
                        Err(e) => {
                            warn!("Error updating event {}: {}", event.summary, e);
                            EventOutcome::failed(&event.uid, &event.summary, SyncAction::Updated, &e)
                        }
                    };
                    report.outcomes.push(outcome);
                }
                Some(_) => {
                    // Unchanged, nothing to do
                }
                None => {
                    info!("Creating event {}", event.summary);
                    let outcome = match self.create_event(event).await {
                        Ok(()) => EventOutcome::applied(&event.uid, &event.summary, SyncAction::Created),
                        Err(e) => {
                            warn!("Error creating event {}: {}", event.summary, e);
                            EventOutcome::failed(&event.uid, &event.summary, SyncAction::Created, &e)
                        }
                    };
                    report.outcomes.push(outcome);
                }
            }
        }

        // Remaining records have no matching source event any more
        for record in records_by_uid.into_values() {
            info!("Deleting event {}", record.summary);
            let outcome = match self.delete_event(&record).await {
                Ok(()) => {
                    EventOutcome::applied(&record.calendar_uid, &record.summary, SyncAction::Deleted)
                }
                Err(e) => {
                    warn!("Error deleting event {}: {}", record.summary, e);
                    EventOutcome::failed(&record.calendar_uid, &record.summary, SyncAction::Deleted, &e)
                }
            };
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    async fn create_event(&self, event: &SourceEvent) -> SyncResult<()> {
        let payload = build_payload(event, self.timezone);
        let remote_id = self.remote.create(&payload).await?;

        let record = CalendarEventRecord::from_source(event, remote_id);
        self.mirror.add(&record).await
    }

    async fn update_event(
        &self,
        event: &SourceEvent,
        record: &CalendarEventRecord,
    ) -> SyncResult<()> {
        let payload = build_payload(event, self.timezone);
        self.remote.update(&record.remote_id, &payload).await?;

        let mut updated = record.clone();
        updated.overwrite_from(event);
        self.mirror.update(&updated).await
    }

    async fn delete_event(&self, record: &CalendarEventRecord) -> SyncResult<()> {
        self.mirror.remove(record).await?;
        self.remote.delete(&record.remote_id).await
    }
}
