use serde::{Deserialize, Serialize};

/// A single ferry departure as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    pub start: String,
    pub end: String,
    pub car_spots: i64,
}

/// Body of the upstream `online/events` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<EventItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventItem {
    pub dtstart: String,
    pub dtend: String,
    #[serde(default)]
    pub capacities: Option<Capacities>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Capacities {
    /// Small vehicles (cars).
    #[serde(default)]
    pub sv: Option<i64>,
}

impl From<EventItem> for Trip {
    fn from(item: EventItem) -> Self {
        Self {
            start: item.dtstart,
            end: item.dtend,
            car_spots: item
                .capacities
                .and_then(|capacities| capacities.sv)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_items() {
        let raw = r#"{
            "items": [
                {"dtstart": "2026-01-01T10:00:00.000+0200", "dtend": "2026-01-01T10:30:00.000+0200", "capacities": {"sv": 10, "bc": 2}}
            ]
        }"#;
        let resp: EventsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.items.len(), 1);
        let trip = Trip::from(resp.items[0].clone());
        assert_eq!(trip.car_spots, 10);
    }

    #[test]
    fn missing_capacities_count_as_zero() {
        let raw = r#"{"items": [{"dtstart": "a", "dtend": "b"}, {"dtstart": "c", "dtend": "d", "capacities": {}}]}"#;
        let resp: EventsResponse = serde_json::from_str(raw).unwrap();
        let trips: Vec<Trip> = resp.items.into_iter().map(Trip::from).collect();
        assert!(trips.iter().all(|trip| trip.car_spots == 0));
    }

    #[test]
    fn null_capacities_count_as_zero() {
        let raw = r#"{"items": [
            {"dtstart": "a", "dtend": "b", "capacities": null},
            {"dtstart": "c", "dtend": "d", "capacities": {"sv": null}}
        ]}"#;
        let resp: EventsResponse = serde_json::from_str(raw).unwrap();
        let trips: Vec<Trip> = resp.items.into_iter().map(Trip::from).collect();
        assert_eq!(trips.len(), 2);
        assert!(trips.iter().all(|trip| trip.car_spots == 0));
    }

    #[test]
    fn serializes_with_snake_case_spots() {
        let trip = Trip {
            start: "s".into(),
            end: "e".into(),
            car_spots: 4,
        };
        let value = serde_json::to_value(&trip).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"start": "s", "end": "e", "car_spots": 4})
        );
    }
}
