use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::models::trip::Trip;

/// Upstream's usual timestamp shape, e.g. `2026-01-07T19:55:00.000+0200`.
const UPSTREAM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Inclusive time-of-day bounds in zero-padded 24h `HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureWindow {
    pub from: Option<String>,
    pub to: Option<String>,
    pub available_only: bool,
}

impl DepartureWindow {
    pub fn contains(&self, time_of_day: &str) -> bool {
        if let Some(from) = self.from.as_deref() {
            if time_of_day < from {
                return false;
            }
        }
        if let Some(to) = self.to.as_deref() {
            if time_of_day > to {
                return false;
            }
        }
        true
    }
}

/// Parses an upstream start timestamp, trying the millisecond fixed-offset
/// format before falling back to RFC 3339.
pub fn parse_departure(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, UPSTREAM_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Local `HH:MM` of the departure, in the timestamp's own offset.
pub fn departure_time_of_day(raw: &str) -> Option<String> {
    parse_departure(raw).map(|start| start.format("%H:%M").to_string())
}

/// Keeps the trips departing inside `window`, preserving order. Trips with an
/// unreadable start are dropped and logged.
pub fn filter_trips(trips: Vec<Trip>, window: &DepartureWindow) -> Vec<Trip> {
    trips
        .into_iter()
        .filter(|trip| {
            let Some(time_of_day) = departure_time_of_day(&trip.start) else {
                warn!(start = %trip.start, "skipping trip with unparseable start time");
                return false;
            };
            window.contains(&time_of_day)
        })
        .filter(|trip| !window.available_only || trip.car_spots > 0)
        .collect()
}
