//! SIPA edge engine.
//!
//! Decision core for industrial-site safety monitoring: given per-frame
//! object-detection output (people, helmets, harnesses), classify, frame by
//! frame, whether each detected person lacks required protective equipment,
//! stands inside a restricted perimeter, or both, and emit one safety event
//! per violating person per cycle.
//!
//! # Architecture
//!
//! The cycle is single-threaded and synchronous: one frame's detections are
//! processed to completion before the next frame is accepted. Per cycle:
//!
//! ```text
//! frame -> detector -> confidence filter -> class partition
//!       -> { PPE association, perimeter test } -> event classifier
//!       -> { journal, MQTT publish, alarm pulse request }
//! ```
//!
//! The latency watchdog wraps the whole cycle and observes timing
//! independent of outcome. Only the alarm worker runs off-thread, so pulse
//! durations never stretch the cycle.
//!
//! # Module Structure
//!
//! - `geometry`: bounding-box and polygon primitives
//! - `detect`: detection types, confidence/class filter, backend seam
//! - `engine`: association, perimeter containment, event classification
//! - `event`: event taxonomy and JSON wire shape
//! - `watchdog`: per-cycle latency observation
//! - `ingest`: frame source seam (synthetic stub built in)
//! - `sink`: journal, MQTT publisher, decoupled alarm actuation
//! - `config`: TOML file + env overrides, validated at startup

pub mod config;
pub mod detect;
pub mod engine;
pub mod event;
pub mod geometry;
pub mod ingest;
pub mod sink;
pub mod watchdog;

pub use config::SipadConfig;
pub use detect::{ClassMap, ClassifiedDetections, Detection, DetectionBatch, Detector, StubDetector};
pub use engine::{classify, is_wearing, PerimeterZone, PersonState, SafetyEngine};
pub use event::{local_timestamp, Event, EventType};
pub use geometry::{to_normalized, BBox, Point, Polygon};
pub use ingest::{open_source, CameraConfig, Frame, FrameSource, SyntheticSource};
pub use sink::{
    AlarmController, AlarmDevice, AlarmPolicy, AlarmSettings, EventJournal, EventSinks,
    MqttPublisher, MqttSettings, SimulatedAlarm,
};
pub use watchdog::{CycleTimer, CycleWatchdog};
