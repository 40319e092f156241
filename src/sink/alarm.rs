//! Physical strobe/buzzer actuation, decoupled from the cycle loop.
//!
//! The classifier emits a pulse *request*; a dedicated worker thread owns
//! the engaged timer. The device stays engaged for at least the requested
//! duration, and the hot loop never sleeps for the pulse — pulse length
//! therefore cannot inflate cycle latency or trip the watchdog.

use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread;
use std::time::Duration;

use crate::event::EventType;

/// Pending pulse requests beyond this are dropped with a warning.
const QUEUE_CAPACITY: usize = 8;

/// Actuation device settings. Disabled by default: a misconfigured site
/// must not drive real hardware.
#[derive(Clone, Debug)]
pub struct AlarmSettings {
    pub enabled: bool,
    pub strobe_pin: u8,
    pub buzzer_pin: u8,
    pub critical_pulse: Duration,
    pub intrusion_pulse: Duration,
}

impl Default for AlarmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            strobe_pin: 18,
            buzzer_pin: 23,
            critical_pulse: Duration::from_millis(1000),
            intrusion_pulse: Duration::from_millis(500),
        }
    }
}

/// Pulse duration per event severity. `EpiMissing` never actuates.
#[derive(Clone, Copy, Debug)]
pub struct AlarmPolicy {
    pub critical_pulse: Duration,
    pub intrusion_pulse: Duration,
}

impl AlarmPolicy {
    pub fn from_settings(settings: &AlarmSettings) -> Self {
        Self {
            critical_pulse: settings.critical_pulse,
            intrusion_pulse: settings.intrusion_pulse,
        }
    }

    pub fn pulse_for(&self, event_type: EventType) -> Option<Duration> {
        match event_type {
            EventType::CriticalViolation => Some(self.critical_pulse),
            EventType::PerimeterIntrusion => Some(self.intrusion_pulse),
            EventType::EpiMissing => None,
        }
    }
}

/// Physical device seam. The real GPIO driver lives outside this crate;
/// implementations set both strobe and buzzer lines together.
pub trait AlarmDevice: Send {
    fn set_engaged(&mut self, engaged: bool);
}

/// Stand-in device used when actuation is disabled. Logs the transitions
/// it would have driven.
pub struct SimulatedAlarm {
    strobe_pin: u8,
    buzzer_pin: u8,
}

impl SimulatedAlarm {
    pub fn new(strobe_pin: u8, buzzer_pin: u8) -> Self {
        Self {
            strobe_pin,
            buzzer_pin,
        }
    }
}

impl AlarmDevice for SimulatedAlarm {
    fn set_engaged(&mut self, engaged: bool) {
        log::info!(
            "[alarm-sim] strobe_pin={} buzzer_pin={} engaged={}",
            self.strobe_pin,
            self.buzzer_pin,
            engaged
        );
    }
}

enum Command {
    Engage(Duration),
}

/// Handle to the alarm worker. Requests are fire-and-forget; shutdown
/// completes any in-flight pulse and forces the device off.
pub struct AlarmController {
    tx: Option<SyncSender<Command>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl AlarmController {
    pub fn spawn(mut device: Box<dyn AlarmDevice>) -> Self {
        let (tx, rx) = mpsc::sync_channel(QUEUE_CAPACITY);
        let handle = thread::spawn(move || {
            while let Ok(Command::Engage(duration)) = rx.recv() {
                device.set_engaged(true);
                thread::sleep(duration);
                device.set_engaged(false);
            }
            // Sender gone: make sure the device is left disengaged.
            device.set_engaged(false);
        });
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Requests a pulse of at least `duration`. Never blocks: a full queue
    /// drops the request with a warning (best-effort, like every sink).
    pub fn engage(&self, duration: Duration) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(Command::Engage(duration)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                log::warn!(
                    "alarm queue full, dropping {:.2}s pulse request",
                    duration.as_secs_f32()
                );
            }
            Err(TrySendError::Disconnected(_)) => {
                log::warn!("alarm worker gone, dropping pulse request");
            }
        }
    }

    /// Drains pending pulses and joins the worker.
    pub fn shutdown(mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
