//! End-to-end classification scenarios against the evaluation pipeline.

use std::time::Duration;

use sipa_edge::{
    AlarmPolicy, AlarmSettings, BBox, CameraConfig, ClassMap, CycleWatchdog, Detection,
    DetectionBatch, Detector, EventJournal, EventType, FrameSource, PerimeterZone, Point, Polygon,
    SafetyEngine, StubDetector, SyntheticSource,
};

const TS: &str = "2026-08-24T10:15:00";

fn restricted_band() -> Polygon {
    Polygon::new(vec![
        Point::new(0.2, 0.6),
        Point::new(0.8, 0.6),
        Point::new(0.8, 1.0),
        Point::new(0.2, 1.0),
    ])
    .unwrap()
}

/// Engine over the reference polygon at the given frame size. With a
/// 320x320 frame the test person's center lands inside the band; with
/// 1280x720 it lands outside.
fn engine(frame_w: u32, frame_h: u32) -> SafetyEngine {
    SafetyEngine::new(
        ClassMap::default(),
        0.5,
        PerimeterZone::new(restricted_band(), frame_w, frame_h).unwrap(),
        "0".to_string(),
    )
}

fn det(class_id: i64, x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
    Detection {
        bbox: BBox::new(x1, y1, x2, y2),
        score: 0.9,
        class_id,
    }
}

fn person() -> Detection {
    det(0, 100.0, 100.0, 200.0, 300.0)
}

fn helmet() -> Detection {
    // Center (150, 120), inside the person box.
    det(1, 120.0, 100.0, 180.0, 140.0)
}

fn harness() -> Detection {
    // Center (150, 220), inside the person box.
    det(2, 110.0, 180.0, 190.0, 260.0)
}

#[test]
fn scenario_a_missing_harness_inside_zone_is_critical() {
    let batch = DetectionBatch {
        detections: vec![person(), helmet()],
    };
    let events = engine(320, 320).evaluate(&batch, TS).unwrap();

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event_type, EventType::CriticalViolation);
    assert!(event.has_helmet);
    assert!(!event.has_harness);
    assert!(event.in_perimeter);
    assert_eq!(event.person_bbox, [100.0, 100.0, 200.0, 300.0]);
}

#[test]
fn scenario_b_fully_equipped_inside_zone_is_intrusion() {
    let batch = DetectionBatch {
        detections: vec![person(), helmet(), harness()],
    };
    let events = engine(320, 320).evaluate(&batch, TS).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::PerimeterIntrusion);
    assert!(events[0].has_helmet);
    assert!(events[0].has_harness);
}

#[test]
fn scenario_c_fully_equipped_outside_zone_is_silent() {
    let batch = DetectionBatch {
        detections: vec![person(), helmet(), harness()],
    };
    let events = engine(1280, 720).evaluate(&batch, TS).unwrap();
    assert!(events.is_empty());
}

#[test]
fn scenario_d_missing_ppe_outside_zone_is_record_only() {
    let batch = DetectionBatch {
        detections: vec![person(), harness()],
    };
    let events = engine(1280, 720).evaluate(&batch, TS).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::EpiMissing);
    assert!(!events[0].in_perimeter);

    // EPI_MISSING never issues an actuation request.
    let policy = AlarmPolicy::from_settings(&AlarmSettings::default());
    assert_eq!(policy.pulse_for(events[0].event_type), None);
}

#[test]
fn scenario_e_empty_batch_yields_no_events_but_is_measured() {
    let watchdog = CycleWatchdog::new(Duration::from_secs(1));
    let timer = watchdog.begin();

    let events = engine(1280, 720)
        .evaluate(&DetectionBatch::default(), TS)
        .unwrap();
    assert!(events.is_empty());

    let elapsed = watchdog.observe(timer, events.len());
    assert!(elapsed > Duration::ZERO);
}

#[test]
fn low_confidence_person_is_invisible_to_classification() {
    let mut quiet = person();
    quiet.score = 0.3;
    let batch = DetectionBatch {
        detections: vec![quiet],
    };
    let events = engine(320, 320).evaluate(&batch, TS).unwrap();
    assert!(events.is_empty());
}

#[test]
fn each_violating_person_gets_their_own_event() {
    // Two unequipped people inside the zone, disjoint boxes.
    let batch = DetectionBatch {
        detections: vec![det(0, 100.0, 200.0, 160.0, 300.0), det(0, 180.0, 200.0, 240.0, 300.0)],
    };
    let events = engine(320, 320).evaluate(&batch, TS).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|e| e.event_type == EventType::CriticalViolation));
}

#[test]
fn replaying_a_batch_is_idempotent() {
    let batch = DetectionBatch {
        detections: vec![person(), helmet()],
    };
    let engine = engine(320, 320);
    let first = engine.evaluate(&batch, TS).unwrap();
    let second = engine.evaluate(&batch, TS).unwrap();
    assert_eq!(first, second);
}

#[test]
fn full_cycle_from_stub_frame_to_journal_record() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let journal_path = dir.path().join("events.log");

    let camera = CameraConfig {
        source: "stub://yard".to_string(),
        width: 320,
        height: 320,
    };
    let mut source = SyntheticSource::new(camera.clone());
    let mut detector = StubDetector::new().with_batch(DetectionBatch {
        detections: vec![person(), helmet()],
    });
    let engine = SafetyEngine::new(
        ClassMap::default(),
        0.5,
        PerimeterZone::new(restricted_band(), camera.width, camera.height)?,
        camera.source.clone(),
    );
    let mut journal = EventJournal::open(&journal_path)?;

    let frame = source.next_frame()?;
    let batch = detector.infer(&frame)?;
    let events = engine.evaluate(&batch, TS)?;
    for event in &events {
        journal.append(event)?;
    }

    let raw = std::fs::read_to_string(&journal_path)?;
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0])?;
    assert_eq!(record["type"], "CRITICAL_VIOLATION");
    assert_eq!(record["camera"], "stub://yard");
    Ok(())
}
