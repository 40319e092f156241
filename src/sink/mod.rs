//! Event sinks: local journal, MQTT publish, physical alarm.
//!
//! Delivery to every sink is best-effort, at-most-once: a failed write or
//! publish is logged and the cycle continues. Nothing is re-queued.

pub mod alarm;
pub mod journal;
pub mod mqtt;

pub use alarm::{AlarmController, AlarmDevice, AlarmPolicy, AlarmSettings, SimulatedAlarm};
pub use journal::EventJournal;
pub use mqtt::{MqttPublisher, MqttSettings};

use crate::event::{Event, EventType};

/// Fan-out of one classified event to all three sinks.
pub struct EventSinks {
    pub journal: EventJournal,
    pub publisher: Option<MqttPublisher>,
    pub alarm: AlarmController,
    pub policy: AlarmPolicy,
}

impl EventSinks {
    /// Dispatches one event: journal record, broker publish, and (for the
    /// actuating severities) an alarm pulse request.
    pub fn dispatch(&mut self, event: &Event) {
        match event.event_type {
            EventType::CriticalViolation => log::warn!("critical violation: {:?}", event),
            EventType::PerimeterIntrusion => log::info!("perimeter intrusion: {:?}", event),
            EventType::EpiMissing => log::info!("ppe missing (record only): {:?}", event),
        }

        if let Err(e) = self.journal.append(event) {
            log::warn!("failed to journal event: {}", e);
        }
        if let Some(publisher) = &self.publisher {
            publisher.publish(event);
        }
        if let Some(pulse) = self.policy.pulse_for(event.event_type) {
            self.alarm.engage(pulse);
        }
    }

    /// Flushes and tears down every sink. Called once on shutdown.
    pub fn shutdown(mut self) {
        if let Err(e) = self.journal.flush() {
            log::warn!("failed to flush event journal: {}", e);
        }
        if let Some(publisher) = self.publisher.take() {
            if let Err(e) = publisher.disconnect() {
                log::warn!("mqtt disconnect failed: {}", e);
            }
        }
        self.alarm.shutdown();
    }
}
