use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::debug;

use crate::models::trip::{EventsResponse, Trip};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FerryError {
    #[error("failed to fetch ferry data: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("api returned status: {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client for the ferry operator's public schedule endpoint.
#[derive(Clone)]
pub struct FerryClient {
    http: reqwest::Client,
    base_url: Arc<String>,
}

impl FerryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: Arc::new(base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the events URL. `date` is `YYYY-MM-DD`; `direction` is a route
    /// code such as `VK`, `KV`, `HR` or `RH` and is passed through as given.
    pub fn events_url(&self, date: &str, direction: &str) -> String {
        format!(
            "{}/online/events?direction={direction}&departure-date={date}&time-shift=300",
            self.base_url()
        )
    }

    /// Fetches every departure for `date` in `direction`, regardless of
    /// availability, in upstream order.
    pub async fn fetch_trips(&self, date: &str, direction: &str) -> Result<Vec<Trip>, FerryError> {
        let url = self.events_url(date, direction);
        debug!(%date, %direction, "fetching ferry events");

        let response = self.http.get(&url).send().await.map_err(FerryError::Fetch)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FerryError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FerryError::Fetch)?;
        let events: EventsResponse = serde_json::from_slice(&body).map_err(FerryError::Decode)?;

        let trips: Vec<Trip> = events.items.into_iter().map(Trip::from).collect();
        debug!(%date, %direction, count = trips.len(), "ferry events fetched");
        Ok(trips)
    }
}
