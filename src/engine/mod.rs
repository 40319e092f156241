//! Per-cycle evaluation pipeline.
//!
//! One call to [`SafetyEngine::evaluate`] processes one frame's detections
//! to completion: confidence filter, class partition, PPE association,
//! perimeter test, event classification. The engine holds only immutable
//! configuration; every cycle is evaluated independently, with no memory of
//! prior frames and no person tracking. Replaying the same batch yields the
//! same events.

mod associate;
mod classify;
mod perimeter;

pub use associate::is_wearing;
pub use classify::{classify, PersonState};
pub use perimeter::PerimeterZone;

use anyhow::Result;

use crate::detect::{ClassMap, ClassifiedDetections, DetectionBatch};
use crate::event::{Event, EventType};

/// The detection-to-event classification engine.
///
/// Construct one per camera. All fields are read-only after construction,
/// so independent engines can coexist in one process.
pub struct SafetyEngine {
    classes: ClassMap,
    min_confidence: f32,
    zone: PerimeterZone,
    camera_id: String,
}

impl SafetyEngine {
    pub fn new(
        classes: ClassMap,
        min_confidence: f32,
        zone: PerimeterZone,
        camera_id: String,
    ) -> Self {
        Self {
            classes,
            min_confidence,
            zone,
            camera_id,
        }
    }

    /// Evaluates one cycle's detection batch into zero or more events.
    ///
    /// `timestamp` is stamped verbatim onto every event of the cycle. An
    /// empty batch (or one fully removed by the confidence filter) is a
    /// valid cycle that produces no events.
    pub fn evaluate(&self, batch: &DetectionBatch, timestamp: &str) -> Result<Vec<Event>> {
        let parts = ClassifiedDetections::partition(batch, self.min_confidence, self.classes);
        if parts.persons.is_empty() {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        for person in &parts.persons {
            let state = PersonState {
                bbox: person.bbox,
                has_helmet: is_wearing(&person.bbox, &parts.helmets),
                has_harness: is_wearing(&person.bbox, &parts.harnesses),
                in_perimeter: self.zone.contains_person(&person.bbox)?,
            };
            if let Some(event_type) = classify(&state) {
                events.push(self.make_event(event_type, &state, timestamp));
            }
        }
        Ok(events)
    }

    fn make_event(&self, event_type: EventType, state: &PersonState, timestamp: &str) -> Event {
        Event {
            event_type,
            timestamp: timestamp.to_string(),
            camera_id: self.camera_id.clone(),
            person_bbox: state.bbox.to_array(),
            has_helmet: state.has_helmet,
            has_harness: state.has_harness,
            in_perimeter: state.in_perimeter,
        }
    }
}
