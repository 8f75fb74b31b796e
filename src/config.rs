use crate::error::{env_error, Error, SyncResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Default interval between sync passes, in seconds
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;

/// Main configuration structure for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Calendar ID to sync into
    pub google_calendar_id: String,
    /// OAuth bearer token for the Google Calendar API
    pub google_api_token: String,
    /// Base URL of the Google Calendar API
    pub google_api_base_url: String,
    /// Timezone that source event wall-clock times are interpreted in
    pub timezone: Tz,
    /// Seconds to wait between sync passes
    pub sync_interval_secs: u64,
    /// Path to the JSON file exported from the source calendar
    pub source_events_path: PathBuf,
    /// Path to the JSON file holding the mirror records
    pub mirror_db_path: PathBuf,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> SyncResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").map_err(|_| env_error("GOOGLE_CALENDAR_ID"))?;
        let google_api_token =
            env::var("GOOGLE_API_TOKEN").map_err(|_| env_error("GOOGLE_API_TOKEN"))?;

        let google_api_base_url = env::var("GOOGLE_API_BASE_URL")
            .unwrap_or_else(|_| String::from(crate::remote::DEFAULT_API_BASE_URL));

        // Default timezone
        let timezone_name = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| Error::Config(format!("Unknown timezone: {}", timezone_name)))?;

        let sync_interval_secs = match env::var("SYNC_INTERVAL_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid SYNC_INTERVAL_SECS format"))?,
            Err(_) => DEFAULT_SYNC_INTERVAL_SECS,
        };

        let source_events_path = env::var("SOURCE_EVENTS_PATH")
            .unwrap_or_else(|_| String::from("source_events.json"))
            .into();
        let mirror_db_path = env::var("MIRROR_DB_PATH")
            .unwrap_or_else(|_| String::from("mirror.json"))
            .into();

        Ok(Config {
            google_calendar_id,
            google_api_token,
            google_api_base_url,
            timezone,
            sync_interval_secs,
            source_events_path,
            mirror_db_path,
        })
    }
}
