use crate::config::Config;
use crate::engine::RemoteCalendarClient;
use crate::error::{remote_error, SyncResult};
use crate::models::RemoteEventPayload;
use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

/// Default base URL of the Google Calendar API
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar adapter for the remote calendar client interface
pub struct GoogleCalendarClient {
    client: Client,
    base_url: String,
    calendar_id: String,
    api_token: String,
}

impl GoogleCalendarClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.google_api_base_url.trim_end_matches('/').to_string(),
            calendar_id: config.google_calendar_id.clone(),
            api_token: config.google_api_token.clone(),
        }
    }

    fn events_url(&self) -> SyncResult<Url> {
        let url_str = format!("{}/calendars/{}/events", self.base_url, self.calendar_id);
        Url::parse(&url_str).map_err(|e| remote_error(&format!("Failed to parse URL: {}", e)))
    }

    fn event_url(&self, remote_id: &str) -> SyncResult<Url> {
        let url_str = format!(
            "{}/calendars/{}/events/{}",
            self.base_url, self.calendar_id, remote_id
        );
        Url::parse(&url_str).map_err(|e| remote_error(&format!("Failed to parse URL: {}", e)))
    }

    async fn check_status(operation: &str, response: Response) -> SyncResult<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(remote_error(&format!(
                "Failed to {} event: HTTP {} - {}",
                operation, status, error_body
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteCalendarClient for GoogleCalendarClient {
    async fn create(&self, payload: &RemoteEventPayload) -> SyncResult<String> {
        let response = self
            .client
            .post(self.events_url()?)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(payload)
            .send()
            .await
            .map_err(|e| remote_error(&format!("Failed to create event: {}", e)))?;

        let response = Self::check_status("create", response).await?;

        let created: serde_json::Value = response
            .json()
            .await
            .map_err(|e| remote_error(&format!("Failed to parse create response: {}", e)))?;

        created
            .get("id")
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
            .ok_or_else(|| remote_error("No event id in create response"))
    }

    async fn update(&self, remote_id: &str, payload: &RemoteEventPayload) -> SyncResult<()> {
        let response = self
            .client
            .put(self.event_url(remote_id)?)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(payload)
            .send()
            .await
            .map_err(|e| remote_error(&format!("Failed to update event: {}", e)))?;

        Self::check_status("update", response).await?;
        Ok(())
    }

    async fn delete(&self, remote_id: &str) -> SyncResult<()> {
        let response = self
            .client
            .delete(self.event_url(remote_id)?)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await
            .map_err(|e| remote_error(&format!("Failed to delete event: {}", e)))?;

        Self::check_status("delete", response).await?;
        Ok(())
    }
}
