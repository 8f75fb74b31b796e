use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Busy status reported by the source calendar for an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusyIndicator {
    Busy,
    OutOfOffice,
    Tentative,
    Free,
    WorkingElsewhere,
}

impl BusyIndicator {
    /// Remote event status for this busy state, `None` when the remote
    /// default should be left in place
    pub fn remote_status(self) -> Option<&'static str> {
        match self {
            BusyIndicator::Busy | BusyIndicator::OutOfOffice => Some("confirmed"),
            BusyIndicator::Tentative => Some("tentative"),
            BusyIndicator::Free => Some("transparent"),
            BusyIndicator::WorkingElsewhere => None,
        }
    }

    /// Remote transparency flag: only free slots are transparent
    pub fn transparency(self) -> &'static str {
        match self {
            BusyIndicator::Free => "transparent",
            _ => "opaque",
        }
    }
}

impl Default for BusyIndicator {
    fn default() -> Self {
        BusyIndicator::Busy
    }
}

/// Set of weekdays encoded as a 7-bit mask, Monday in the lowest bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekdaySet(pub u8);

impl WeekdaySet {
    pub const MONDAY: u8 = 1 << 0;
    pub const TUESDAY: u8 = 1 << 1;
    pub const WEDNESDAY: u8 = 1 << 2;
    pub const THURSDAY: u8 = 1 << 3;
    pub const FRIDAY: u8 = 1 << 4;
    pub const SATURDAY: u8 = 1 << 5;
    pub const SUNDAY: u8 = 1 << 6;

    /// Build a set from individual day bits
    pub fn from_days(days: &[u8]) -> Self {
        Self(days.iter().fold(0, |mask, day| mask | day))
    }

    pub fn contains(self, day: u8) -> bool {
        self.0 & day != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Coarse recurrence type as reported by the source calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    MonthlyByWeekday,
    Yearly,
    YearlyByWeekday,
    #[serde(other)]
    Unsupported,
}

/// Recurrence description attached to a recurring source event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    pub kind: RecurrenceKind,
    /// Number of periods between occurrences, 1 for every period
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekdays the event occurs on, only meaningful for weekly recurrence
    #[serde(default)]
    pub weekdays: WeekdaySet,
}

fn default_interval() -> u32 {
    1
}

/// An appointment read from the authoritative source calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEvent {
    /// Stable identifier assigned by the source calendar
    pub uid: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    /// Wall-clock start, interpreted in the configured timezone
    pub start: NaiveDateTime,
    /// Wall-clock end, interpreted in the configured timezone
    pub end: NaiveDateTime,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence: Option<RecurrencePattern>,
    #[serde(default)]
    pub busy: BusyIndicator,
}

/// Mirror record linking a source event to its remote counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventRecord {
    /// Local surrogate key, assigned on creation
    pub id: Uuid,
    /// Natural key shared with the source calendar, unique in the mirror
    pub calendar_uid: String,
    /// Identifier assigned by the remote service on create
    pub remote_id: String,
    pub summary: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub description: String,
    pub is_recurring: bool,
}

impl CalendarEventRecord {
    /// Build a new record for a source event that was just created remotely
    pub fn from_source(event: &SourceEvent, remote_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            calendar_uid: event.uid.clone(),
            remote_id,
            summary: event.summary.clone(),
            start: event.start,
            end: event.end,
            description: event.description.clone(),
            is_recurring: event.is_recurring,
        }
    }

    /// Check whether the synced fields drifted from the source event
    pub fn differs_from(&self, event: &SourceEvent) -> bool {
        self.summary != event.summary
            || self.start != event.start
            || self.end != event.end
            || self.description != event.description
    }

    /// Overwrite the synced fields in place after a successful remote update
    pub fn overwrite_from(&mut self, event: &SourceEvent) {
        self.summary = event.summary.clone();
        self.start = event.start;
        self.end = event.end;
        self.description = event.description.clone();
        self.is_recurring = event.is_recurring;
    }
}

/// Start or end of a remote event: wall-clock time plus timezone name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: NaiveDateTime,
    pub time_zone: String,
}

/// Event payload sent to the remote calendar service on create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEventPayload {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub transparency: String,
}
