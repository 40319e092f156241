//! Safety events and their wire shape.
//!
//! One JSON object per event, identical bytes-on-the-wire for the journal
//! file and the MQTT payload. Field order and key names are part of the
//! interface consumed by downstream dashboards; do not reorder.

use serde::{Deserialize, Serialize};

/// Event taxonomy, highest severity first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Inside the restricted perimeter while missing required PPE.
    CriticalViolation,
    /// Inside the restricted perimeter, PPE compliant.
    PerimeterIntrusion,
    /// Missing PPE outside the perimeter. Logged and published only; no
    /// physical actuation.
    EpiMissing,
}

/// A classified safety event for one person in one cycle.
///
/// Immutable once created and handed to the sinks; the engine retains no
/// event history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM:SS`.
    pub timestamp: String,
    #[serde(rename = "camera")]
    pub camera_id: String,
    /// Person bounding box in pixel coordinates, `[x1, y1, x2, y2]`.
    pub person_bbox: [f32; 4],
    pub has_helmet: bool,
    pub has_harness: bool,
    pub in_perimeter: bool,
}

/// Event timestamp in the local-time format downstream consumers expect.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_to_the_reference_wire_shape() {
        let event = Event {
            event_type: EventType::CriticalViolation,
            timestamp: "2026-08-24T10:15:00".to_string(),
            camera_id: "0".to_string(),
            person_bbox: [100.0, 100.0, 200.0, 300.0],
            has_helmet: true,
            has_harness: false,
            in_perimeter: true,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "CRITICAL_VIOLATION");
        assert_eq!(value["timestamp"], "2026-08-24T10:15:00");
        assert_eq!(value["camera"], "0");
        assert_eq!(value["person_bbox"][0], 100.0);
        assert_eq!(value["person_bbox"][3], 300.0);
        assert_eq!(value["has_helmet"], true);
        assert_eq!(value["has_harness"], false);
        assert_eq!(value["in_perimeter"], true);
    }

    #[test]
    fn event_type_names_round_trip() {
        for (ty, name) in [
            (EventType::CriticalViolation, "\"CRITICAL_VIOLATION\""),
            (EventType::PerimeterIntrusion, "\"PERIMETER_INTRUSION\""),
            (EventType::EpiMissing, "\"EPI_MISSING\""),
        ] {
            assert_eq!(serde_json::to_string(&ty).unwrap(), name);
            let back: EventType = serde_json::from_str(name).unwrap();
            assert_eq!(back, ty);
        }
    }

    #[test]
    fn local_timestamp_has_the_expected_shape() {
        let ts = local_timestamp();
        // YYYY-MM-DDTHH:MM:SS
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[13..14], ":");
    }
}
